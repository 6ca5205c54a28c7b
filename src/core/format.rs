/// Output dialects: HTML table and CSV markup.

use serde::{Deserialize, Serialize};

use crate::core::classify::{RowClass, RowKind, RowLevel};
use crate::core::template::{escape_braces, Field};

const HTML_HEADER: &str = r#"<html>
<head>
<meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>

<style type="text/css">
body {font-family: sans-serif}
p.title {font-size: larger; font-weight: bold}
p.author {font-style: italic}
td, th {padding: 10}
th {font-size:smaller}
table {border-spacing: 0}
table, th, td {border: lightgrey solid 1px; vertical-align: top}
td.chtitle {font-weight: bold}
td.chdesc {font-style: italic}
tr.part {font-weight: bold}
tr.unused {color:gray}
tr.notes {color:blue}
tr.todo {color:firebrick}
tr.notexp {font-style: italic}
</style>

"#;

const HTML_FOOTER: &str = "</table>\n</body>\n</html>\n";

/// The file format a report is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputKind {
    #[default]
    Html,
    Csv,
}

impl OutputKind {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Csv => "csv",
        }
    }

    /// Make a plain-text value safe to place inside a cell.
    pub fn escape(&self, value: &str) -> String {
        match self {
            Self::Html => {
                let mut out = String::with_capacity(value.len());
                for c in value.chars() {
                    match c {
                        '&' => out.push_str("&amp;"),
                        '<' => out.push_str("&lt;"),
                        '>' => out.push_str("&gt;"),
                        '"' => out.push_str("&quot;"),
                        '\n' => out.push_str("<br />"),
                        '\r' => {}
                        _ => out.push(c),
                    }
                }
                out
            }
            Self::Csv => value.replace('"', "\"\""),
        }
    }

    /// Template source of one header cell.
    pub(crate) fn header_cell(&self, label: &HeaderLabel) -> String {
        let label = match label {
            HeaderLabel::Text(text) => escape_braces(text),
            HeaderLabel::FieldTitle(field) => format!("{{{}}}", field.name()),
        };
        match self {
            Self::Html => format!("<th>{}</th>", label),
            Self::Csv => format!("\"{}\"", label),
        }
    }

    /// Template source of one chapter-row cell. `None` is a column that
    /// only applies to scenes.
    pub(crate) fn chapter_cell(&self, field: Option<Field>, class: Option<&str>) -> String {
        match (self, field) {
            (Self::Html, Some(field)) => match class {
                Some(class) => format!("<td class=\"{}\">{{{}}}</td>", class, field.name()),
                None => format!("<td>{{{}}}</td>", field.name()),
            },
            (Self::Html, None) => "<td></td>".to_string(),
            (Self::Csv, Some(field)) => format!("\"{{{}}}\"", field.name()),
            (Self::Csv, None) => String::new(),
        }
    }

    /// Template source of one scene-row cell.
    pub(crate) fn scene_cell(&self, field: Field) -> String {
        match self {
            Self::Html => format!("<td>{{{}}}</td>", field.name()),
            Self::Csv => format!("\"{{{}}}\"", field.name()),
        }
    }

    /// Join header cells into the header row source.
    pub(crate) fn header_row(&self, cells: &[String]) -> String {
        match self {
            Self::Html => format!("<thead><tr>{}</tr></thead>", cells.concat()),
            Self::Csv => cells.join(",").trim_end_matches(',').to_string(),
        }
    }

    /// Join cells into a complete row of the given class.
    pub(crate) fn row(&self, class: RowClass, cells: &[String]) -> String {
        match self {
            Self::Html => match html_row_class(class) {
                Some(css) => format!("<tr class=\"{}\">{}</tr>", css, cells.concat()),
                None => format!("<tr>{}</tr>", cells.concat()),
            },
            Self::Csv => cells.join(","),
        }
    }

    /// Template source of everything before the first row.
    pub(crate) fn document_header(&self, header_row: &str) -> String {
        match self {
            Self::Html => format!(
                "{}<title>{{Title}}</title>\n</head>\n\n<body>\n<p class=title>{{Title}}</p>\n<p class=author>{{AuthorName}}</p>\n<br />\n<table>\n{}\n",
                escape_braces(HTML_HEADER),
                header_row
            ),
            Self::Csv => format!("{}\n", header_row),
        }
    }

    /// Everything after the last row.
    pub fn document_footer(&self) -> &'static str {
        match self {
            Self::Html => HTML_FOOTER,
            Self::Csv => "",
        }
    }
}

/// Label of a header cell: fixed text, or a project-defined title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLabel {
    Text(&'static str),
    FieldTitle(Field),
}

fn html_row_class(class: RowClass) -> Option<&'static str> {
    match class.kind {
        RowKind::Normal => None,
        RowKind::Part => Some("part"),
        RowKind::Unused => Some("unused"),
        RowKind::Notes => Some("notes"),
        RowKind::Todo => Some("todo"),
        RowKind::NotExported => match class.level {
            RowLevel::Scene => Some("notexp"),
            RowLevel::Chapter => None,
        },
    }
}
