/// The in-memory project graph and its RON snapshot loader.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::chapter::{Chapter, ChapterKind};
use super::entity::{
    ChapterId, Character, CharacterId, Item, ItemId, Location, LocationId, SceneId,
};
use super::scene::Scene;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("duplicate chapter id {0:?}")]
    DuplicateChapter(ChapterId),
    #[error("duplicate scene id {0:?}")]
    DuplicateScene(SceneId),
    #[error("chapter not found: {0:?}")]
    ChapterNotFound(ChapterId),
}

/// A novel project: chapters in reading order, their scenes, and the
/// character, location and item registries scenes refer to.
///
/// The report engine only reads a project; it never mutates one.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub title: String,
    pub author_name: String,
    /// Titles of the four scene rating fields, e.g. "Tension".
    pub rating_titles: [String; 4],
    /// Reading order of chapters.
    pub chapter_order: Vec<ChapterId>,
    pub chapters: FxHashMap<ChapterId, Chapter>,
    pub scenes: FxHashMap<SceneId, Scene>,
    pub characters: FxHashMap<CharacterId, Character>,
    pub locations: FxHashMap<LocationId, Location>,
    pub items: FxHashMap<ItemId, Item>,
}

impl Project {
    /// File extension of project snapshots this crate can open.
    pub const EXTENSION: &'static str = "ron";

    pub fn new(title: impl Into<String>, author_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author_name: author_name.into(),
            rating_titles: default_rating_titles(),
            ..Self::default()
        }
    }

    /// Append a chapter to the reading order.
    pub fn add_chapter(&mut self, chapter: Chapter) -> Result<(), ProjectError> {
        if self.chapters.contains_key(&chapter.id) {
            return Err(ProjectError::DuplicateChapter(chapter.id));
        }
        self.chapter_order.push(chapter.id);
        self.chapters.insert(chapter.id, chapter);
        Ok(())
    }

    /// Append a scene to the end of a chapter, setting its back-reference.
    pub fn add_scene(&mut self, chapter_id: ChapterId, mut scene: Scene) -> Result<(), ProjectError> {
        if self.scenes.contains_key(&scene.id) {
            return Err(ProjectError::DuplicateScene(scene.id));
        }
        let chapter = self
            .chapters
            .get_mut(&chapter_id)
            .ok_or(ProjectError::ChapterNotFound(chapter_id))?;
        scene.chapter = chapter_id;
        chapter.scenes.push(scene.id);
        self.scenes.insert(scene.id, scene);
        Ok(())
    }

    pub fn add_character(&mut self, character: Character) {
        self.characters.insert(character.id, character);
    }

    pub fn add_location(&mut self, location: Location) {
        self.locations.insert(location.id, location);
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    /// Chapters in reading order. IDs without a chapter are skipped.
    pub fn chapters_in_order(&self) -> impl Iterator<Item = &Chapter> + '_ {
        self.chapter_order
            .iter()
            .filter_map(move |id| self.chapters.get(id))
    }

    /// Scenes of a chapter in reading order. IDs without a scene are skipped.
    pub fn scenes_of<'a>(&'a self, chapter: &'a Chapter) -> impl Iterator<Item = &'a Scene> + 'a {
        chapter
            .scenes
            .iter()
            .filter_map(move |id| self.scenes.get(id))
    }

    /// Load a project snapshot from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Project, ProjectError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a project snapshot from a RON string.
    pub fn parse_ron(input: &str) -> Result<Project, ProjectError> {
        let raw: RonProject = ron::from_str(input)?;

        let mut project = Project::new(raw.title, raw.author_name);
        if let Some(titles) = raw.rating_titles {
            project.rating_titles = titles;
        }
        for character in raw.characters {
            project.add_character(character);
        }
        for location in raw.locations {
            project.add_location(location);
        }
        for item in raw.items {
            project.add_item(item);
        }
        for ron_chapter in raw.chapters {
            let mut chapter = Chapter::new(ron_chapter.id, ron_chapter.title, ron_chapter.kind);
            chapter.desc = ron_chapter.desc;
            let chapter_id = chapter.id;
            project.add_chapter(chapter)?;
            for scene in ron_chapter.scenes {
                project.add_scene(chapter_id, scene)?;
            }
        }

        Ok(project)
    }
}

fn default_rating_titles() -> [String; 4] {
    [1, 2, 3, 4].map(|n| format!("Field {}", n))
}

// The snapshot nests scenes inside their chapters; the runtime graph
// keeps them in flat registries, so the RON shape gets its own structs.

#[derive(Debug, Deserialize)]
#[serde(rename = "Project")]
struct RonProject {
    title: String,
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    rating_titles: Option<[String; 4]>,
    #[serde(default)]
    characters: Vec<Character>,
    #[serde(default)]
    locations: Vec<Location>,
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    chapters: Vec<RonChapter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Chapter")]
struct RonChapter {
    id: ChapterId,
    title: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    kind: ChapterKind,
    #[serde(default)]
    scenes: Vec<Scene>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::scene::SceneKind;

    const SNAPSHOT: &str = r#"Project(
        title: "Harbour Lights",
        author_name: "J. Doe",
        rating_titles: Some(("Tension", "Humor", "Pace", "Romance")),
        characters: [(id: 1, title: "Anna"), (id: 2, title: "Ben")],
        locations: [(id: 1, title: "Pier")],
        chapters: [
            Chapter(id: 1, title: "Part One", kind: Part),
            Chapter(
                id: 2,
                title: "Arrival",
                scenes: [
                    (id: 10, title: "Fog", characters: [2, 1]),
                    (id: 11, title: "Draft idea", kind: Notes),
                ],
            ),
        ],
    )"#;

    #[test]
    fn parse_snapshot_builds_graph() {
        let project = Project::parse_ron(SNAPSHOT).unwrap();
        assert_eq!(project.title, "Harbour Lights");
        assert_eq!(project.author_name, "J. Doe");
        assert_eq!(project.rating_titles[0], "Tension");
        assert_eq!(project.chapter_order, vec![ChapterId(1), ChapterId(2)]);
        assert_eq!(project.characters.len(), 2);
        assert_eq!(project.locations.len(), 1);

        let arrival = &project.chapters[&ChapterId(2)];
        assert_eq!(arrival.scenes, vec![SceneId(10), SceneId(11)]);

        let fog = &project.scenes[&SceneId(10)];
        assert_eq!(fog.chapter, ChapterId(2));
        assert_eq!(fog.viewpoint(), Some(CharacterId(2)));
        assert_eq!(project.scenes[&SceneId(11)].kind, SceneKind::Notes);
    }

    #[test]
    fn default_rating_titles_when_missing() {
        let project = Project::parse_ron("Project(title: \"T\")").unwrap();
        assert_eq!(project.rating_titles[3], "Field 4");
        assert!(project.chapter_order.is_empty());
    }

    #[test]
    fn duplicate_scene_is_rejected() {
        let input = r#"Project(
            title: "T",
            chapters: [
                Chapter(id: 1, title: "A", scenes: [(id: 5, title: "x")]),
                Chapter(id: 2, title: "B", scenes: [(id: 5, title: "y")]),
            ],
        )"#;
        let err = Project::parse_ron(input).unwrap_err();
        assert!(matches!(err, ProjectError::DuplicateScene(SceneId(5))));
    }

    #[test]
    fn add_scene_to_missing_chapter_fails() {
        let mut project = Project::new("T", "A");
        let err = project
            .add_scene(ChapterId(9), Scene::new(SceneId(1), "x"))
            .unwrap_err();
        assert!(matches!(err, ProjectError::ChapterNotFound(ChapterId(9))));
    }

    #[test]
    fn chapters_in_order_skips_dangling_ids() {
        let mut project = Project::new("T", "A");
        project
            .add_chapter(Chapter::new(ChapterId(1), "One", ChapterKind::Normal))
            .unwrap();
        project.chapter_order.insert(0, ChapterId(99));
        let titles: Vec<&str> = project.chapters_in_order().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["One"]);
    }

    #[test]
    fn malformed_snapshot_is_a_ron_error() {
        let err = Project::parse_ron("Project(title: ").unwrap_err();
        assert!(matches!(err, ProjectError::Ron(_)));
    }
}
