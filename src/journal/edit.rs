use crate::model::{MemoryId, MemoryRecord, MemoryUpdate};

/// Working copy of the text fields while a memory is open for editing.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    record_id: MemoryId,
    original_title: String,
    original_story: String,
    pub title: String,
    pub story: String,
}

impl EditBuffer {
    pub fn seed(record: &MemoryRecord) -> Self {
        Self {
            record_id: record.id.clone(),
            original_title: record.title.clone(),
            original_story: record.story.clone(),
            title: record.title.clone(),
            story: record.story.clone(),
        }
    }

    pub fn record_id(&self) -> &MemoryId {
        &self.record_id
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_story(&mut self, story: impl Into<String>) {
        self.story = story.into();
    }

    pub fn is_dirty(&self) -> bool {
        self.title != self.original_title || self.story != self.original_story
    }

    /// Only the fields that differ from the record as it was opened.
    pub fn to_update(&self) -> MemoryUpdate {
        MemoryUpdate {
            title: (self.title != self.original_title).then(|| self.title.clone()),
            story: (self.story != self.original_story).then(|| self.story.clone()),
        }
    }
}
