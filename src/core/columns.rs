/// Column selection and template assembly.
///
/// Columns appear in a fixed order. For every enabled column one header
/// cell, one chapter-row cell and one scene-row cell are emitted in the
/// same pass, so all templates of a report have the same column count.

use rustc_hash::FxHashMap;

use crate::core::classify::{RowClass, RowLevel};
use crate::core::config::{ColumnToggles, ReportConfig};
use crate::core::format::{HeaderLabel, OutputKind};
use crate::core::template::{Field, Template, TemplateError};

/// A user-selectable column. Some expand into several cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Number,
    Title,
    Description,
    Viewpoint,
    Tags,
    Notes,
    Date,
    Time,
    Duration,
    ActionPattern,
    Rating1,
    Rating2,
    Rating3,
    Rating4,
    WordsTotal,
    WordCount,
    LetterCount,
    Status,
    Characters,
    Locations,
    Items,
}

/// One cell position: its header label and what chapter and scene rows
/// put there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpec {
    pub header: HeaderLabel,
    /// `None` for columns that only apply to scenes.
    pub chapter: Option<Field>,
    /// CSS class of the chapter cell in HTML output.
    pub chapter_class: Option<&'static str>,
    pub scene: Field,
}

const fn scene_only(header: &'static str, scene: Field) -> CellSpec {
    CellSpec {
        header: HeaderLabel::Text(header),
        chapter: None,
        chapter_class: None,
        scene,
    }
}

const fn rating(title: Field, value: Field) -> CellSpec {
    CellSpec {
        header: HeaderLabel::FieldTitle(title),
        chapter: None,
        chapter_class: None,
        scene: value,
    }
}

const ID: [CellSpec; 1] = [CellSpec {
    header: HeaderLabel::Text("ID"),
    chapter: Some(Field::Id),
    chapter_class: Some("chtitle"),
    scene: Field::Id,
}];
const NUMBER: [CellSpec; 1] = [CellSpec {
    header: HeaderLabel::Text("Number"),
    chapter: Some(Field::ChapterNumber),
    chapter_class: Some("chtitle"),
    scene: Field::SceneNumber,
}];
const TITLE: [CellSpec; 1] = [CellSpec {
    header: HeaderLabel::Text("Title"),
    chapter: Some(Field::Title),
    chapter_class: Some("chtitle"),
    scene: Field::Title,
}];
const DESCRIPTION: [CellSpec; 1] = [CellSpec {
    header: HeaderLabel::Text("Description"),
    chapter: Some(Field::Desc),
    chapter_class: Some("chdesc"),
    scene: Field::Desc,
}];
const VIEWPOINT: [CellSpec; 1] = [scene_only("Viewpoint", Field::Viewpoint)];
const TAGS: [CellSpec; 1] = [scene_only("Tags", Field::Tags)];
const NOTES: [CellSpec; 1] = [scene_only("Notes", Field::Notes)];
const DATE: [CellSpec; 1] = [scene_only("Date", Field::ScDate)];
const TIME: [CellSpec; 1] = [scene_only("Time", Field::ScTime)];
const DURATION: [CellSpec; 1] = [scene_only("Duration", Field::Duration)];
const ACTION_PATTERN: [CellSpec; 4] = [
    scene_only("A/R", Field::ReactionScene),
    scene_only("Goal", Field::Goal),
    scene_only("Conflict", Field::Conflict),
    scene_only("Outcome", Field::Outcome),
];
const RATING1: [CellSpec; 1] = [rating(Field::FieldTitle1, Field::Field1)];
const RATING2: [CellSpec; 1] = [rating(Field::FieldTitle2, Field::Field2)];
const RATING3: [CellSpec; 1] = [rating(Field::FieldTitle3, Field::Field3)];
const RATING4: [CellSpec; 1] = [rating(Field::FieldTitle4, Field::Field4)];
const WORDS_TOTAL: [CellSpec; 1] = [scene_only("Words total", Field::WordsTotal)];
const WORD_COUNT: [CellSpec; 1] = [scene_only("Word count", Field::WordCount)];
const LETTER_COUNT: [CellSpec; 1] = [scene_only("Letter count", Field::LetterCount)];
const STATUS: [CellSpec; 1] = [scene_only("Status", Field::Status)];
const CHARACTERS: [CellSpec; 1] = [scene_only("Characters", Field::Characters)];
const LOCATIONS: [CellSpec; 1] = [scene_only("Locations", Field::Locations)];
const ITEMS: [CellSpec; 1] = [scene_only("Items", Field::Items)];

impl Column {
    /// Report column order.
    pub const ORDER: [Column; 22] = [
        Column::Id,
        Column::Number,
        Column::Title,
        Column::Description,
        Column::Viewpoint,
        Column::Tags,
        Column::Notes,
        Column::Date,
        Column::Time,
        Column::Duration,
        Column::ActionPattern,
        Column::Rating1,
        Column::Rating2,
        Column::Rating3,
        Column::Rating4,
        Column::WordsTotal,
        Column::WordCount,
        Column::LetterCount,
        Column::Status,
        Column::Characters,
        Column::Locations,
        Column::Items,
    ];

    pub fn enabled(&self, toggles: &ColumnToggles) -> bool {
        match self {
            Self::Id => toggles.id,
            Self::Number => toggles.number,
            Self::Title => toggles.title,
            Self::Description => toggles.description,
            Self::Viewpoint => toggles.viewpoint,
            Self::Tags => toggles.tags,
            Self::Notes => toggles.notes,
            Self::Date => toggles.date,
            Self::Time => toggles.time,
            Self::Duration => toggles.duration,
            Self::ActionPattern => toggles.action_pattern,
            Self::Rating1 => toggles.rating1,
            Self::Rating2 => toggles.rating2,
            Self::Rating3 => toggles.rating3,
            Self::Rating4 => toggles.rating4,
            Self::WordsTotal => toggles.words_total,
            Self::WordCount => toggles.word_count,
            Self::LetterCount => toggles.letter_count,
            Self::Status => toggles.status,
            Self::Characters => toggles.characters,
            Self::Locations => toggles.locations,
            Self::Items => toggles.items,
        }
    }

    pub fn cells(&self) -> &'static [CellSpec] {
        match self {
            Self::Id => &ID,
            Self::Number => &NUMBER,
            Self::Title => &TITLE,
            Self::Description => &DESCRIPTION,
            Self::Viewpoint => &VIEWPOINT,
            Self::Tags => &TAGS,
            Self::Notes => &NOTES,
            Self::Date => &DATE,
            Self::Time => &TIME,
            Self::Duration => &DURATION,
            Self::ActionPattern => &ACTION_PATTERN,
            Self::Rating1 => &RATING1,
            Self::Rating2 => &RATING2,
            Self::Rating3 => &RATING3,
            Self::Rating4 => &RATING4,
            Self::WordsTotal => &WORDS_TOTAL,
            Self::WordCount => &WORD_COUNT,
            Self::LetterCount => &LETTER_COUNT,
            Self::Status => &STATUS,
            Self::Characters => &CHARACTERS,
            Self::Locations => &LOCATIONS,
            Self::Items => &ITEMS,
        }
    }
}

/// The enabled cells of a report, in column order.
pub fn select_cells(toggles: &ColumnToggles) -> Vec<CellSpec> {
    Column::ORDER
        .iter()
        .filter(|c| c.enabled(toggles))
        .flat_map(|c| c.cells().iter().copied())
        .collect()
}

/// Parsed templates of one report: document header, footer, and one row
/// template per [`RowClass`]. Built once, never modified.
#[derive(Debug, Clone)]
pub struct ReportTemplates {
    pub output: OutputKind,
    /// Header row source, before the document wrapper is added.
    pub header_row: String,
    pub document_header: Template,
    pub document_footer: &'static str,
    rows: FxHashMap<RowClass, Template>,
    row_sources: FxHashMap<RowLevel, Vec<String>>,
}

impl ReportTemplates {
    pub fn build(config: &ReportConfig) -> Result<ReportTemplates, TemplateError> {
        let output = config.output;
        let cells = select_cells(&config.columns);

        let mut header_cells = Vec::with_capacity(cells.len());
        let mut chapter_cells = Vec::with_capacity(cells.len());
        let mut scene_cells = Vec::with_capacity(cells.len());
        for cell in &cells {
            header_cells.push(output.header_cell(&cell.header));
            chapter_cells.push(output.chapter_cell(cell.chapter, cell.chapter_class));
            scene_cells.push(output.scene_cell(cell.scene));
        }

        let header_row = output.header_row(&header_cells);
        let document_header = Template::parse(&output.document_header(&header_row))?;

        let mut rows = FxHashMap::default();
        for class in RowClass::ALL {
            let cells = match class.level {
                RowLevel::Chapter => &chapter_cells,
                RowLevel::Scene => &scene_cells,
            };
            rows.insert(class, Template::parse(&output.row(class, cells))?);
        }

        let mut row_sources = FxHashMap::default();
        row_sources.insert(RowLevel::Chapter, chapter_cells);
        row_sources.insert(RowLevel::Scene, scene_cells);

        Ok(ReportTemplates {
            output,
            header_row,
            document_header,
            document_footer: output.document_footer(),
            rows,
            row_sources,
        })
    }

    /// Template for a row class.
    pub fn row(&self, class: RowClass) -> Option<&Template> {
        self.rows.get(&class)
    }

    /// Number of cells in rows of the given level.
    pub fn column_count(&self, level: RowLevel) -> usize {
        self.row_sources.get(&level).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::RowKind;

    fn config(output: OutputKind, columns: ColumnToggles) -> ReportConfig {
        ReportConfig {
            output,
            columns,
            ..ReportConfig::default()
        }
    }

    #[test]
    fn action_pattern_expands_to_four_cells() {
        let mut toggles = ColumnToggles::none();
        toggles.action_pattern = true;
        let cells = select_cells(&toggles);
        let fields: Vec<Field> = cells.iter().map(|c| c.scene).collect();
        assert_eq!(
            fields,
            vec![Field::ReactionScene, Field::Goal, Field::Conflict, Field::Outcome]
        );
        assert!(cells.iter().all(|c| c.chapter.is_none()));
    }

    #[test]
    fn order_is_fixed_regardless_of_toggle_set() {
        let mut toggles = ColumnToggles::none();
        toggles.items = true;
        toggles.title = true;
        toggles.number = true;
        let fields: Vec<Field> = select_cells(&toggles).iter().map(|c| c.scene).collect();
        assert_eq!(fields, vec![Field::SceneNumber, Field::Title, Field::Items]);
    }

    #[test]
    fn html_templates() {
        let mut toggles = ColumnToggles::none();
        toggles.title = true;
        toggles.viewpoint = true;
        let t = ReportTemplates::build(&config(OutputKind::Html, toggles)).unwrap();
        assert_eq!(
            t.header_row,
            "<thead><tr><th>Title</th><th>Viewpoint</th></tr></thead>"
        );

        let values = crate::core::template::FieldValues::default();
        let chapter = t.row(RowClass::new(RowLevel::Chapter, RowKind::Part)).unwrap();
        assert_eq!(
            chapter.render(&values),
            "<tr class=\"part\"><td class=\"chtitle\"></td><td></td></tr>"
        );
        let scene = t.row(RowClass::new(RowLevel::Scene, RowKind::Todo)).unwrap();
        let placeholders: Vec<Field> = scene.placeholders().collect();
        assert_eq!(placeholders, vec![Field::Title, Field::Viewpoint]);
    }

    #[test]
    fn csv_templates() {
        let mut toggles = ColumnToggles::none();
        toggles.number = true;
        toggles.title = true;
        toggles.tags = true;
        toggles.rating2 = true;
        let t = ReportTemplates::build(&config(OutputKind::Csv, toggles)).unwrap();
        assert_eq!(t.header_row, "\"Number\",\"Title\",\"Tags\",\"{FieldTitle2}\"");

        let chapter = t.row(RowClass::new(RowLevel::Chapter, RowKind::Normal)).unwrap();
        let placeholders: Vec<Field> = chapter.placeholders().collect();
        assert_eq!(placeholders, vec![Field::ChapterNumber, Field::Title]);
        assert_eq!(
            chapter.render(&Default::default()),
            "\"\",\"\",,"
        );
    }

    #[test]
    fn every_row_class_has_a_template() {
        let t = ReportTemplates::build(&ReportConfig::default()).unwrap();
        for class in RowClass::ALL {
            assert!(t.row(class).is_some(), "missing template for {:?}", class);
        }
    }

    #[test]
    fn column_counts_match_for_all_columns() {
        let t = ReportTemplates::build(&config(OutputKind::Csv, ColumnToggles::all())).unwrap();
        // 21 single-cell columns plus the four action pattern cells.
        assert_eq!(t.column_count(RowLevel::Chapter), 25);
        assert_eq!(t.column_count(RowLevel::Scene), 25);
    }
}
