use serde::{Deserialize, Serialize};

use super::entity::{ChapterId, CharacterId, ItemId, LocationId, SceneId};

/// The authorial category of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SceneKind {
    #[default]
    Normal,
    Unused,
    Notes,
    Todo,
    /// Part of the manuscript but excluded from export.
    NotExported,
}

/// Editing progress of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SceneStatus {
    #[default]
    Outline,
    Draft,
    FirstEdit,
    SecondEdit,
    Done,
}

impl SceneStatus {
    /// Label shown in the "Status" column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Outline => "Outline",
            Self::Draft => "Draft",
            Self::FirstEdit => "1st Edit",
            Self::SecondEdit => "2nd Edit",
            Self::Done => "Done",
        }
    }
}

/// Goal/conflict/outcome breakdown of a scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPattern {
    /// Reaction scene (sequel) rather than action scene.
    pub reaction: bool,
    pub goal: String,
    pub conflict: String,
    pub outcome: String,
}

impl ActionPattern {
    /// `"R"` for reaction scenes, `"A"` for action scenes.
    pub fn marker(&self) -> &'static str {
        if self.reaction {
            "R"
        } else {
            "A"
        }
    }
}

/// How long a scene lasts in story time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lasts {
    pub days: Option<u32>,
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
}

/// A scene belongs to exactly one chapter; `chapter` is a back-reference
/// filled in when the project graph is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    #[serde(default)]
    pub chapter: ChapterId,
    #[serde(default)]
    pub kind: SceneKind,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    /// Participants. The first entry is the viewpoint character.
    #[serde(default)]
    pub characters: Vec<CharacterId>,
    #[serde(default)]
    pub locations: Vec<LocationId>,
    #[serde(default)]
    pub items: Vec<ItemId>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    /// Explicit calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// Relative day offset, used when no calendar date is set.
    #[serde(default)]
    pub day: Option<String>,
    /// Explicit time of day, `HH:MM:SS`.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub minute: Option<String>,
    #[serde(default)]
    pub lasts: Lasts,
    #[serde(default)]
    pub ratings: [u32; 4],
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub letter_count: u32,
    #[serde(default)]
    pub status: SceneStatus,
    #[serde(default)]
    pub action: ActionPattern,
}

impl Scene {
    /// A scene with the given ID and title and everything else empty.
    pub fn new(id: SceneId, title: impl Into<String>) -> Self {
        Self {
            id,
            chapter: ChapterId::default(),
            kind: SceneKind::Normal,
            title: title.into(),
            desc: String::new(),
            characters: Vec::new(),
            locations: Vec::new(),
            items: Vec::new(),
            tags: Vec::new(),
            notes: String::new(),
            date: None,
            day: None,
            time: None,
            hour: None,
            minute: None,
            lasts: Lasts::default(),
            ratings: [0; 4],
            word_count: 0,
            letter_count: 0,
            status: SceneStatus::Outline,
            action: ActionPattern::default(),
        }
    }

    /// The viewpoint character is the first participant, if any.
    pub fn viewpoint(&self) -> Option<CharacterId> {
        self.characters.first().copied()
    }

    /// Returns true if this scene has the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
