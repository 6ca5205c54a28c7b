use serde::{Deserialize, Serialize};

use super::entity::{ChapterId, SceneId};

/// The authorial category of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChapterKind {
    #[default]
    Normal,
    /// A part heading that opens a section of chapters.
    Part,
    Unused,
    Notes,
    Todo,
}

impl ChapterKind {
    /// Unused, notes and to-do chapters are all kept out of the manuscript.
    /// Their scenes are reported as unused.
    pub fn is_unused(&self) -> bool {
        matches!(self, Self::Unused | Self::Notes | Self::Todo)
    }
}

/// An ordered group of scenes.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    pub desc: String,
    pub kind: ChapterKind,
    pub scenes: Vec<SceneId>,
}

impl Chapter {
    pub fn new(id: ChapterId, title: impl Into<String>, kind: ChapterKind) -> Self {
        Self {
            id,
            title: title.into(),
            desc: String::new(),
            kind,
            scenes: Vec::new(),
        }
    }
}
