/// Scene filters: which scenes a report includes.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::schema::entity::{CharacterId, ItemId, LocationId, SceneId};
use crate::schema::project::Project;

/// Lookup failure while evaluating a filter. Never leaves this module:
/// [`SceneFilter::accept`] turns it into a rejection.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("scene not found: {0:?}")]
    SceneNotFound(SceneId),
}

/// A scene-inclusion criterion. Exactly one is active per report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SceneFilter {
    /// Every scene passes.
    #[default]
    All,
    /// Scenes carrying this tag.
    Tag(String),
    /// Scenes told from this character's viewpoint.
    Viewpoint(CharacterId),
    /// Scenes this character takes part in, viewpoint or not.
    Participant(CharacterId),
    Location(LocationId),
    Item(ItemId),
}

impl SceneFilter {
    /// Returns true if the scene passes the filter. A scene that is not
    /// in the project never passes.
    pub fn accept(&self, project: &Project, scene_id: SceneId) -> bool {
        match self.try_accept(project, scene_id) {
            Ok(accepted) => accepted,
            Err(e) => {
                debug!(filter = ?self, "filter lookup failed: {}", e);
                false
            }
        }
    }

    fn try_accept(&self, project: &Project, scene_id: SceneId) -> Result<bool, FilterError> {
        if let Self::All = self {
            return Ok(true);
        }
        let scene = project
            .scenes
            .get(&scene_id)
            .ok_or(FilterError::SceneNotFound(scene_id))?;

        Ok(match self {
            Self::All => true,
            Self::Tag(tag) => scene.has_tag(tag),
            Self::Viewpoint(id) => scene.viewpoint() == Some(*id),
            Self::Participant(id) => scene.characters.contains(id),
            Self::Location(id) => scene.locations.contains(id),
            Self::Item(id) => scene.items.contains(id),
        })
    }

    /// Short human-readable description, e.g. `tag "night"`.
    pub fn describe(&self, project: &Project) -> String {
        let title_or_id = |title: Option<&String>, id: u64| match title {
            Some(t) => format!("\"{}\"", t),
            None => format!("#{}", id),
        };
        match self {
            Self::All => "all scenes".to_string(),
            Self::Tag(tag) => format!("tag \"{}\"", tag),
            Self::Viewpoint(id) => format!(
                "viewpoint {}",
                title_or_id(project.characters.get(id).map(|c| &c.title), id.0)
            ),
            Self::Participant(id) => format!(
                "character {}",
                title_or_id(project.characters.get(id).map(|c| &c.title), id.0)
            ),
            Self::Location(id) => format!(
                "location {}",
                title_or_id(project.locations.get(id).map(|l| &l.title), id.0)
            ),
            Self::Item(id) => format!(
                "item {}",
                title_or_id(project.items.get(id).map(|i| &i.title), id.0)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::chapter::{Chapter, ChapterKind};
    use crate::schema::entity::{ChapterId, Character};
    use crate::schema::scene::Scene;

    fn make_project() -> Project {
        let mut project = Project::new("Test", "Author");
        project
            .add_chapter(Chapter::new(ChapterId(1), "Ch1", ChapterKind::Normal))
            .unwrap();

        let mut tagged = Scene::new(SceneId(1), "Tagged");
        tagged.tags = vec!["x".to_string(), "night".to_string()];
        tagged.characters = vec![CharacterId(1), CharacterId(2)];
        tagged.locations = vec![LocationId(7)];
        tagged.items = vec![ItemId(3)];
        project.add_scene(ChapterId(1), tagged).unwrap();
        project
            .add_scene(ChapterId(1), Scene::new(SceneId(2), "Bare"))
            .unwrap();

        project.add_character(Character {
            id: CharacterId(1),
            title: "Anna".to_string(),
            full_name: String::new(),
            desc: String::new(),
        });
        project
    }

    #[test]
    fn all_accepts_everything() {
        let project = make_project();
        assert!(SceneFilter::All.accept(&project, SceneId(1)));
        assert!(SceneFilter::All.accept(&project, SceneId(2)));
    }

    #[test]
    fn tag_membership() {
        let project = make_project();
        assert!(SceneFilter::Tag("x".into()).accept(&project, SceneId(1)));
        assert!(!SceneFilter::Tag("y".into()).accept(&project, SceneId(1)));
        assert!(!SceneFilter::Tag("x".into()).accept(&project, SceneId(2)));
    }

    #[test]
    fn viewpoint_is_first_participant_only() {
        let project = make_project();
        assert!(SceneFilter::Viewpoint(CharacterId(1)).accept(&project, SceneId(1)));
        assert!(!SceneFilter::Viewpoint(CharacterId(2)).accept(&project, SceneId(1)));
        assert!(!SceneFilter::Viewpoint(CharacterId(1)).accept(&project, SceneId(2)));
    }

    #[test]
    fn participant_anywhere_in_list() {
        let project = make_project();
        assert!(SceneFilter::Participant(CharacterId(1)).accept(&project, SceneId(1)));
        assert!(SceneFilter::Participant(CharacterId(2)).accept(&project, SceneId(1)));
        assert!(!SceneFilter::Participant(CharacterId(3)).accept(&project, SceneId(1)));
    }

    #[test]
    fn location_and_item() {
        let project = make_project();
        assert!(SceneFilter::Location(LocationId(7)).accept(&project, SceneId(1)));
        assert!(!SceneFilter::Location(LocationId(8)).accept(&project, SceneId(1)));
        assert!(SceneFilter::Item(ItemId(3)).accept(&project, SceneId(1)));
        assert!(!SceneFilter::Item(ItemId(3)).accept(&project, SceneId(2)));
    }

    #[test]
    fn missing_scene_is_rejected_not_an_error() {
        let project = make_project();
        assert!(!SceneFilter::Tag("x".into()).accept(&project, SceneId(99)));
        assert_eq!(
            SceneFilter::Tag("x".into()).try_accept(&project, SceneId(99)),
            Err(FilterError::SceneNotFound(SceneId(99)))
        );
    }

    #[test]
    fn describe_uses_titles_when_known() {
        let project = make_project();
        assert_eq!(
            SceneFilter::Viewpoint(CharacterId(1)).describe(&project),
            "viewpoint \"Anna\""
        );
        assert_eq!(
            SceneFilter::Participant(CharacterId(5)).describe(&project),
            "character #5"
        );
        assert_eq!(SceneFilter::All.describe(&project), "all scenes");
    }

    #[test]
    fn filter_from_ron() {
        let f: SceneFilter = ron::from_str("Tag(\"x\")").unwrap();
        assert_eq!(f, SceneFilter::Tag("x".to_string()));
        let f: SceneFilter = ron::from_str("Viewpoint(3)").unwrap();
        assert_eq!(f, SceneFilter::Viewpoint(CharacterId(3)));
    }
}
