use serde::{Deserialize, Serialize};

/// Chapter count used when the caller does not give one.
pub const DEFAULT_CHAPTER_COUNT: u32 = 10;

/// Largest chapter count a host or shell may request.
pub const MAX_CHAPTER_COUNT: u32 = 1000;

/// One entry in a generated outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub chapter_number: u32,
    pub title: String,
    pub summary: String,
}

/// An ordered chapter list for a book topic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChapterOutline {
    pub outline: Vec<Chapter>,
}

impl ChapterOutline {
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}
