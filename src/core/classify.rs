/// Row-type classification: which template a chapter or scene uses,
/// or whether it is left out.

use crate::core::config::{ReportConfig, RowToggles};
use crate::schema::chapter::{Chapter, ChapterKind};
use crate::schema::project::Project;
use crate::schema::scene::{Scene, SceneKind};

/// Granularity of a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowLevel {
    Chapter,
    Scene,
}

/// Structural kind of a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Normal,
    Part,
    Unused,
    Notes,
    Todo,
    NotExported,
}

/// Key of the template table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowClass {
    pub level: RowLevel,
    pub kind: RowKind,
}

impl RowClass {
    pub const fn new(level: RowLevel, kind: RowKind) -> Self {
        Self { level, kind }
    }

    /// Every (level, kind) pair that can occur in a report.
    pub const ALL: [RowClass; 10] = [
        RowClass::new(RowLevel::Chapter, RowKind::Normal),
        RowClass::new(RowLevel::Chapter, RowKind::Part),
        RowClass::new(RowLevel::Chapter, RowKind::Unused),
        RowClass::new(RowLevel::Chapter, RowKind::Notes),
        RowClass::new(RowLevel::Chapter, RowKind::Todo),
        RowClass::new(RowLevel::Scene, RowKind::Normal),
        RowClass::new(RowLevel::Scene, RowKind::Unused),
        RowClass::new(RowLevel::Scene, RowKind::Notes),
        RowClass::new(RowLevel::Scene, RowKind::Todo),
        RowClass::new(RowLevel::Scene, RowKind::NotExported),
    ];

    /// Whether rows of this class are switched on.
    pub fn enabled(&self, rows: &RowToggles) -> bool {
        let level_on = match self.level {
            RowLevel::Chapter => rows.chapters,
            RowLevel::Scene => rows.scenes,
        };
        let kind_on = match self.kind {
            RowKind::Normal | RowKind::Part => rows.normal,
            RowKind::Unused => rows.unused,
            RowKind::Notes => rows.notes,
            RowKind::Todo => rows.todo,
            RowKind::NotExported => rows.unexported,
        };
        level_on && kind_on
    }
}

impl From<ChapterKind> for RowKind {
    fn from(kind: ChapterKind) -> Self {
        match kind {
            ChapterKind::Normal => RowKind::Normal,
            ChapterKind::Part => RowKind::Part,
            ChapterKind::Unused => RowKind::Unused,
            ChapterKind::Notes => RowKind::Notes,
            ChapterKind::Todo => RowKind::Todo,
        }
    }
}

/// What a scene needs to know about its chapter to be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentChapter {
    pub kind: ChapterKind,
    /// The chapter has scenes and every one of them is excluded from export.
    pub all_unexported: bool,
}

impl ParentChapter {
    pub fn of(project: &Project, chapter: &Chapter) -> Self {
        let mut scenes = project.scenes_of(chapter).peekable();
        let has_scenes = scenes.peek().is_some();
        let all_unexported = has_scenes && scenes.all(|s| s.kind == SceneKind::NotExported);
        Self {
            kind: chapter.kind,
            all_unexported,
        }
    }
}

/// The kind a scene is reported as. A scene's own to-do or notes marker
/// wins; otherwise an unused parent makes it unused, and a parent whose
/// scenes are all unexported makes it unexported.
pub fn effective_scene_kind(scene: &Scene, parent: &ParentChapter) -> RowKind {
    match scene.kind {
        SceneKind::Todo => RowKind::Todo,
        SceneKind::Notes => RowKind::Notes,
        SceneKind::Unused => RowKind::Unused,
        _ if parent.kind.is_unused() => RowKind::Unused,
        SceneKind::NotExported => RowKind::NotExported,
        SceneKind::Normal if parent.all_unexported => RowKind::NotExported,
        SceneKind::Normal => RowKind::Normal,
    }
}

/// Classify a chapter row. `None` means the row is omitted.
pub fn classify_chapter(chapter: &Chapter, rows: &RowToggles) -> Option<RowClass> {
    let class = RowClass::new(RowLevel::Chapter, chapter.kind.into());
    class.enabled(rows).then_some(class)
}

/// Classify a scene row. `None` means the row is omitted, either because
/// its kind is switched off or because the scene filter rejects it.
///
/// Independent of whether the parent chapter's own row is shown.
pub fn classify_scene(
    project: &Project,
    scene: &Scene,
    parent: &ParentChapter,
    config: &ReportConfig,
) -> Option<RowClass> {
    let class = RowClass::new(RowLevel::Scene, effective_scene_kind(scene, parent));
    if !class.enabled(&config.rows) {
        return None;
    }
    config.filter.accept(project, scene.id).then_some(class)
}
