/// Filter choices: the values a scene filter can be set to for a given
/// project, in order of first appearance.

use rustc_hash::FxHashSet;
use std::hash::Hash;

use crate::core::filter::SceneFilter;
use crate::schema::entity::{CharacterId, ItemId, LocationId};
use crate::schema::project::Project;

/// What a filter selects on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    Tag,
    Viewpoint,
    Character,
    Location,
    Item,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 5] = [
        FilterCategory::Tag,
        FilterCategory::Viewpoint,
        FilterCategory::Character,
        FilterCategory::Location,
        FilterCategory::Item,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Viewpoint => "viewpoint",
            Self::Character => "character",
            Self::Location => "location",
            Self::Item => "item",
        }
    }

    pub fn from_name(name: &str) -> Option<FilterCategory> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Tags, viewpoints and referenced entities that occur in a project's
/// scenes. Entities missing from the project registries are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChoices {
    pub tags: Vec<String>,
    pub viewpoints: Vec<CharacterId>,
    pub characters: Vec<CharacterId>,
    pub locations: Vec<LocationId>,
    pub items: Vec<ItemId>,
}

/// Appends values not seen before, keeping first-appearance order.
struct Ordered<T> {
    seen: FxHashSet<T>,
    values: Vec<T>,
}

impl<T: Clone + Eq + Hash> Ordered<T> {
    fn new() -> Self {
        Self {
            seen: FxHashSet::default(),
            values: Vec::new(),
        }
    }

    fn push(&mut self, value: &T) {
        if self.seen.insert(value.clone()) {
            self.values.push(value.clone());
        }
    }
}

impl FilterChoices {
    pub fn from_project(project: &Project) -> FilterChoices {
        let mut tags = Ordered::new();
        let mut viewpoints = Ordered::new();
        let mut characters = Ordered::new();
        let mut locations = Ordered::new();
        let mut items = Ordered::new();

        for chapter in project.chapters_in_order() {
            for scene in project.scenes_of(chapter) {
                for tag in &scene.tags {
                    tags.push(tag);
                }
                if let Some(vp) = scene.viewpoint() {
                    if project.characters.contains_key(&vp) {
                        viewpoints.push(&vp);
                    }
                }
                for id in &scene.characters {
                    if project.characters.contains_key(id) {
                        characters.push(id);
                    }
                }
                for id in &scene.locations {
                    if project.locations.contains_key(id) {
                        locations.push(id);
                    }
                }
                for id in &scene.items {
                    if project.items.contains_key(id) {
                        items.push(id);
                    }
                }
            }
        }

        FilterChoices {
            tags: tags.values,
            viewpoints: viewpoints.values,
            characters: characters.values,
            locations: locations.values,
            items: items.values,
        }
    }

    /// Display titles of one category, in choice order.
    pub fn titles(&self, project: &Project, category: FilterCategory) -> Vec<String> {
        let character_titles = |ids: &[CharacterId]| -> Vec<String> {
            ids.iter()
                .filter_map(|id| project.characters.get(id))
                .map(|c| c.title.clone())
                .collect()
        };
        match category {
            FilterCategory::Tag => self.tags.clone(),
            FilterCategory::Viewpoint => character_titles(&self.viewpoints),
            FilterCategory::Character => character_titles(&self.characters),
            FilterCategory::Location => self
                .locations
                .iter()
                .filter_map(|id| project.locations.get(id))
                .map(|l| l.title.clone())
                .collect(),
            FilterCategory::Item => self
                .items
                .iter()
                .filter_map(|id| project.items.get(id))
                .map(|i| i.title.clone())
                .collect(),
        }
    }

    /// The filter selecting `title` within `category`, or `None` if no
    /// choice of that category has that title. The first match wins.
    pub fn resolve(
        &self,
        project: &Project,
        category: FilterCategory,
        title: &str,
    ) -> Option<SceneFilter> {
        let character = |ids: &[CharacterId]| {
            ids.iter()
                .copied()
                .find(|id| project.characters.get(id).is_some_and(|c| c.title == title))
        };
        match category {
            FilterCategory::Tag => self
                .tags
                .iter()
                .find(|t| t.as_str() == title)
                .map(|t| SceneFilter::Tag(t.clone())),
            FilterCategory::Viewpoint => character(&self.viewpoints).map(SceneFilter::Viewpoint),
            FilterCategory::Character => character(&self.characters).map(SceneFilter::Participant),
            FilterCategory::Location => self
                .locations
                .iter()
                .copied()
                .find(|id| project.locations.get(id).is_some_and(|l| l.title == title))
                .map(SceneFilter::Location),
            FilterCategory::Item => self
                .items
                .iter()
                .copied()
                .find(|id| project.items.get(id).is_some_and(|i| i.title == title))
                .map(SceneFilter::Item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::chapter::{Chapter, ChapterKind};
    use crate::schema::entity::{ChapterId, Character, Item, Location, SceneId};
    use crate::schema::scene::Scene;

    fn character(id: u64, title: &str) -> Character {
        Character {
            id: CharacterId(id),
            title: title.to_string(),
            full_name: String::new(),
            desc: String::new(),
        }
    }

    fn make_project() -> Project {
        let mut project = Project::new("T", "A");
        project.add_character(character(1, "Anna"));
        project.add_character(character(2, "Ben"));
        project.add_location(Location {
            id: LocationId(1),
            title: "Harbour".to_string(),
            desc: String::new(),
        });
        project.add_item(Item {
            id: ItemId(1),
            title: "Key".to_string(),
            desc: String::new(),
        });
        project
            .add_chapter(Chapter::new(ChapterId(1), "Ch1", ChapterKind::Normal))
            .unwrap();

        let mut s1 = Scene::new(SceneId(1), "Sc1");
        s1.tags = vec!["night".to_string(), "rain".to_string()];
        s1.characters = vec![CharacterId(2), CharacterId(1)];
        s1.locations = vec![LocationId(1), LocationId(9)];
        project.add_scene(ChapterId(1), s1).unwrap();

        let mut s2 = Scene::new(SceneId(2), "Sc2");
        s2.tags = vec!["rain".to_string(), "chase".to_string()];
        s2.characters = vec![CharacterId(1)];
        s2.items = vec![ItemId(1)];
        project.add_scene(ChapterId(1), s2).unwrap();
        project
    }

    #[test]
    fn first_appearance_order_without_duplicates() {
        let project = make_project();
        let choices = FilterChoices::from_project(&project);
        assert_eq!(choices.tags, vec!["night", "rain", "chase"]);
        assert_eq!(choices.viewpoints, vec![CharacterId(2), CharacterId(1)]);
        assert_eq!(choices.characters, vec![CharacterId(2), CharacterId(1)]);
        assert_eq!(choices.items, vec![ItemId(1)]);
    }

    #[test]
    fn unknown_ids_are_not_choices() {
        let project = make_project();
        let choices = FilterChoices::from_project(&project);
        assert_eq!(choices.locations, vec![LocationId(1)]);
    }

    #[test]
    fn titles_per_category() {
        let project = make_project();
        let choices = FilterChoices::from_project(&project);
        assert_eq!(
            choices.titles(&project, FilterCategory::Viewpoint),
            vec!["Ben", "Anna"]
        );
        assert_eq!(choices.titles(&project, FilterCategory::Location), vec!["Harbour"]);
    }

    #[test]
    fn resolve_by_title() {
        let project = make_project();
        let choices = FilterChoices::from_project(&project);
        assert_eq!(
            choices.resolve(&project, FilterCategory::Viewpoint, "Anna"),
            Some(SceneFilter::Viewpoint(CharacterId(1)))
        );
        assert_eq!(
            choices.resolve(&project, FilterCategory::Character, "Ben"),
            Some(SceneFilter::Participant(CharacterId(2)))
        );
        assert_eq!(
            choices.resolve(&project, FilterCategory::Tag, "rain"),
            Some(SceneFilter::Tag("rain".to_string()))
        );
        assert_eq!(
            choices.resolve(&project, FilterCategory::Item, "Key"),
            Some(SceneFilter::Item(ItemId(1)))
        );
        assert_eq!(choices.resolve(&project, FilterCategory::Tag, "snow"), None);
    }

    #[test]
    fn category_names_round_trip() {
        for category in FilterCategory::ALL {
            assert_eq!(FilterCategory::from_name(category.name()), Some(category));
        }
        assert_eq!(FilterCategory::from_name("mood"), None);
    }
}
