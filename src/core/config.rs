/// Report configuration: output kind, filter, and row/column toggles.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::filter::SceneFilter;
use crate::core::format::OutputKind;
use crate::core::pipeline::ReportError;

/// Which levels and structural kinds of rows a report includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowToggles {
    pub chapters: bool,
    pub scenes: bool,
    /// Normal chapters, part headings and normal scenes.
    pub normal: bool,
    pub unused: bool,
    pub notes: bool,
    pub todo: bool,
    /// Scenes excluded from export.
    pub unexported: bool,
}

impl Default for RowToggles {
    fn default() -> Self {
        Self {
            chapters: true,
            scenes: true,
            normal: true,
            unused: false,
            notes: false,
            todo: false,
            unexported: false,
        }
    }
}

impl RowToggles {
    pub fn none() -> Self {
        Self {
            chapters: false,
            scenes: false,
            normal: false,
            unused: false,
            notes: false,
            todo: false,
            unexported: false,
        }
    }
}

/// Which columns a report shows. Column order is fixed; see
/// [`crate::core::columns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnToggles {
    pub id: bool,
    pub number: bool,
    pub title: bool,
    pub description: bool,
    pub viewpoint: bool,
    pub tags: bool,
    pub notes: bool,
    pub date: bool,
    pub time: bool,
    pub duration: bool,
    /// A/R, Goal, Conflict and Outcome as one unit.
    pub action_pattern: bool,
    pub rating1: bool,
    pub rating2: bool,
    pub rating3: bool,
    pub rating4: bool,
    pub words_total: bool,
    pub word_count: bool,
    pub letter_count: bool,
    pub status: bool,
    pub characters: bool,
    pub locations: bool,
    pub items: bool,
}

impl Default for ColumnToggles {
    fn default() -> Self {
        Self {
            number: true,
            title: true,
            description: true,
            viewpoint: true,
            ..Self::none()
        }
    }
}

impl ColumnToggles {
    pub fn none() -> Self {
        Self {
            id: false,
            number: false,
            title: false,
            description: false,
            viewpoint: false,
            tags: false,
            notes: false,
            date: false,
            time: false,
            duration: false,
            action_pattern: false,
            rating1: false,
            rating2: false,
            rating3: false,
            rating4: false,
            words_total: false,
            word_count: false,
            letter_count: false,
            status: false,
            characters: false,
            locations: false,
            items: false,
        }
    }

    pub fn all() -> Self {
        Self {
            id: true,
            number: true,
            title: true,
            description: true,
            viewpoint: true,
            tags: true,
            notes: true,
            date: true,
            time: true,
            duration: true,
            action_pattern: true,
            rating1: true,
            rating2: true,
            rating3: true,
            rating4: true,
            words_total: true,
            word_count: true,
            letter_count: true,
            status: true,
            characters: true,
            locations: true,
            items: true,
        }
    }

    /// Toggle all four rating columns at once.
    pub fn set_ratings(&mut self, on: bool) {
        self.rating1 = on;
        self.rating2 = on;
        self.rating3 = on;
        self.rating4 = on;
    }
}

/// Everything a report run needs besides the project itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output: OutputKind,
    /// Appended to the project file's base name, e.g. `_report`.
    pub suffix: String,
    pub filter: SceneFilter,
    /// Joins character, location, item and tag titles in one cell.
    pub list_separator: String,
    pub rows: RowToggles,
    pub columns: ColumnToggles,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: OutputKind::Html,
            suffix: "_report".to_string(),
            filter: SceneFilter::All,
            list_separator: ", ".to_string(),
            rows: RowToggles::default(),
            columns: ColumnToggles::default(),
        }
    }
}

impl ReportConfig {
    /// Load a report configuration from a RON file. Missing fields take
    /// their default values.
    pub fn load_from_ron(path: &Path) -> Result<ReportConfig, ReportError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<ReportConfig, ReportError> {
        Ok(ron::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::entity::CharacterId;

    #[test]
    fn defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.output, OutputKind::Html);
        assert_eq!(config.suffix, "_report");
        assert_eq!(config.filter, SceneFilter::All);
        assert!(config.rows.chapters && config.rows.scenes && config.rows.normal);
        assert!(!config.rows.unused);
        assert!(config.columns.title);
        assert!(!config.columns.items);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let config = ReportConfig::parse_ron(
            r#"(
                output: Csv,
                filter: Viewpoint(2),
                columns: (title: true, tags: true),
            )"#,
        )
        .unwrap();
        assert_eq!(config.output, OutputKind::Csv);
        assert_eq!(config.filter, SceneFilter::Viewpoint(CharacterId(2)));
        assert_eq!(config.suffix, "_report");
        assert!(config.columns.title && config.columns.tags);
        // Unlisted columns fall back to the struct default, not to false.
        assert!(config.columns.number);
        assert!(config.rows.scenes);
    }

    #[test]
    fn bad_ron_is_an_error() {
        assert!(matches!(
            ReportConfig::parse_ron("(output: Pdf)"),
            Err(ReportError::Ron(_))
        ));
    }

    #[test]
    fn set_ratings_toggles_all_four() {
        let mut columns = ColumnToggles::none();
        columns.set_ratings(true);
        assert!(columns.rating1 && columns.rating2 && columns.rating3 && columns.rating4);
    }
}
