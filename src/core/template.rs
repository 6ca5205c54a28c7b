/// Row templates: placeholder types, parsing, and substitution.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("unknown placeholder '{0}'")]
    UnknownPlaceholder(String),
}

/// A value slot in a report template: `{Title}`, `{ScTime}`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Id,
    ChapterNumber,
    SceneNumber,
    Title,
    Desc,
    AuthorName,
    Viewpoint,
    Tags,
    Notes,
    ScDate,
    ScTime,
    Duration,
    ReactionScene,
    Goal,
    Conflict,
    Outcome,
    Field1,
    Field2,
    Field3,
    Field4,
    FieldTitle1,
    FieldTitle2,
    FieldTitle3,
    FieldTitle4,
    WordsTotal,
    LettersTotal,
    WordCount,
    LetterCount,
    Status,
    Characters,
    Locations,
    Items,
}

impl Field {
    pub const RATINGS: [Field; 4] = [Field::Field1, Field::Field2, Field::Field3, Field::Field4];
    pub const RATING_TITLES: [Field; 4] = [
        Field::FieldTitle1,
        Field::FieldTitle2,
        Field::FieldTitle3,
        Field::FieldTitle4,
    ];

    /// Placeholder name as written between braces.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::ChapterNumber => "ChapterNumber",
            Self::SceneNumber => "SceneNumber",
            Self::Title => "Title",
            Self::Desc => "Desc",
            Self::AuthorName => "AuthorName",
            Self::Viewpoint => "Viewpoint",
            Self::Tags => "Tags",
            Self::Notes => "Notes",
            Self::ScDate => "ScDate",
            Self::ScTime => "ScTime",
            Self::Duration => "Duration",
            Self::ReactionScene => "ReactionScene",
            Self::Goal => "Goal",
            Self::Conflict => "Conflict",
            Self::Outcome => "Outcome",
            Self::Field1 => "Field1",
            Self::Field2 => "Field2",
            Self::Field3 => "Field3",
            Self::Field4 => "Field4",
            Self::FieldTitle1 => "FieldTitle1",
            Self::FieldTitle2 => "FieldTitle2",
            Self::FieldTitle3 => "FieldTitle3",
            Self::FieldTitle4 => "FieldTitle4",
            Self::WordsTotal => "WordsTotal",
            Self::LettersTotal => "LettersTotal",
            Self::WordCount => "WordCount",
            Self::LetterCount => "LetterCount",
            Self::Status => "Status",
            Self::Characters => "Characters",
            Self::Locations => "Locations",
            Self::Items => "Items",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    const ALL: [Field; 32] = [
        Field::Id,
        Field::ChapterNumber,
        Field::SceneNumber,
        Field::Title,
        Field::Desc,
        Field::AuthorName,
        Field::Viewpoint,
        Field::Tags,
        Field::Notes,
        Field::ScDate,
        Field::ScTime,
        Field::Duration,
        Field::ReactionScene,
        Field::Goal,
        Field::Conflict,
        Field::Outcome,
        Field::Field1,
        Field::Field2,
        Field::Field3,
        Field::Field4,
        Field::FieldTitle1,
        Field::FieldTitle2,
        Field::FieldTitle3,
        Field::FieldTitle4,
        Field::WordsTotal,
        Field::LettersTotal,
        Field::WordCount,
        Field::LetterCount,
        Field::Status,
        Field::Characters,
        Field::Locations,
        Field::Items,
    ];
}

/// Formatted values for one row, keyed by placeholder.
pub type FieldValues = FxHashMap<Field, String>;

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal markup, emitted as-is.
    Literal(String),
    /// Value slot: `{Field}`.
    Placeholder(Field),
}

/// A parsed template: a sequence of segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{Name}` → `Placeholder`, where `Name` is a [`Field`] name
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if chars[i] == '{' {
                // Escaped brace
                if i + 1 < len && chars[i + 1] == '{' {
                    literal_buf.push('{');
                    i += 2;
                    continue;
                }

                if !literal_buf.is_empty() {
                    segments.push(TemplateSegment::Literal(std::mem::take(&mut literal_buf)));
                }

                let start = i + 1;
                let mut end = start;
                while end < len && chars[end] != '}' {
                    if chars[end] == '{' {
                        return Err(TemplateError::Parse(
                            "nested braces are not allowed".to_string(),
                        ));
                    }
                    end += 1;
                }
                if end == len {
                    return Err(TemplateError::Parse("unclosed brace".to_string()));
                }

                let name: String = chars[start..end].iter().collect();
                if name.is_empty() {
                    return Err(TemplateError::Parse("empty braces".to_string()));
                }
                let field = Field::from_name(&name)
                    .ok_or_else(|| TemplateError::UnknownPlaceholder(name.clone()))?;
                segments.push(TemplateSegment::Placeholder(field));
                i = end + 1;
            } else if chars[i] == '}' {
                if i + 1 < len && chars[i + 1] == '}' {
                    literal_buf.push('}');
                    i += 2;
                    continue;
                }
                return Err(TemplateError::Parse(
                    "unmatched closing brace".to_string(),
                ));
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    /// Substitute `values` into the template. Placeholders without a
    /// value render as the empty string.
    pub fn render(&self, values: &FieldValues) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Placeholder(field) => {
                    if let Some(value) = values.get(field) {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }

    /// Placeholders in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = Field> + '_ {
        self.segments.iter().filter_map(|s| match s {
            TemplateSegment::Placeholder(f) => Some(*f),
            TemplateSegment::Literal(_) => None,
        })
    }
}

/// Escape literal braces so `text` can be embedded in template source.
pub fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literal_only() {
        let t = Template::parse("<td></td>").unwrap();
        assert_eq!(t.segments, vec![TemplateSegment::Literal("<td></td>".to_string())]);
    }

    #[test]
    fn parse_placeholder() {
        let t = Template::parse("<td>{Title}</td>").unwrap();
        assert_eq!(t.segments.len(), 3);
        assert_eq!(t.segments[1], TemplateSegment::Placeholder(Field::Title));
    }

    #[test]
    fn parse_escaped_braces() {
        let t = Template::parse("body {{font-family: sans-serif}}").unwrap();
        assert_eq!(
            t.segments,
            vec![TemplateSegment::Literal("body {font-family: sans-serif}".to_string())]
        );
    }

    #[test]
    fn parse_errors() {
        assert!(Template::parse("Bad {} here").is_err());
        assert!(Template::parse("Bad {Title{Desc}} here").is_err());
        assert!(Template::parse("Bad {Title here").is_err());
        assert!(Template::parse("Bad } here").is_err());
        assert_eq!(
            Template::parse("{Nope}").unwrap_err(),
            TemplateError::UnknownPlaceholder("Nope".to_string())
        );
    }

    #[test]
    fn every_field_name_round_trips() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn render_substitutes_and_blanks_missing() {
        let t = Template::parse("\"{Title}\",\"{Tags}\"").unwrap();
        let mut values = FieldValues::default();
        values.insert(Field::Title, "Sc1".to_string());
        assert_eq!(t.render(&values), "\"Sc1\",\"\"");
    }

    #[test]
    fn rendered_values_are_not_reparsed() {
        let t = Template::parse("{Title}").unwrap();
        let mut values = FieldValues::default();
        values.insert(Field::Title, "{Desc}".to_string());
        assert_eq!(t.render(&values), "{Desc}");
    }

    #[test]
    fn placeholders_in_order() {
        let t = Template::parse("{SceneNumber} {Title} {ScTime}").unwrap();
        let fields: Vec<Field> = t.placeholders().collect();
        assert_eq!(fields, vec![Field::SceneNumber, Field::Title, Field::ScTime]);
    }

    #[test]
    fn escape_braces_round_trips_through_parse() {
        let t = Template::parse(&escape_braces("a {b} c")).unwrap();
        assert_eq!(t.render(&FieldValues::default()), "a {b} c");
    }
}
