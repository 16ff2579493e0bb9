use crate::error::StoreError;
use crate::geo::Location;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use strum::{Display, EnumString};

/// Store-assigned identifier of a memory. Never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryId(String);

impl MemoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MemoryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One journal entry as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    pub id: MemoryId,
    pub title: String,
    pub story: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub image_data: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemoryRecord {
    /// Only memories with a location can be played in the guessing game.
    pub fn is_playable(&self) -> bool {
        self.location.is_some()
    }

    pub fn has_photo(&self) -> bool {
        self.image_data.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Applies an update the store has confirmed.
    pub fn apply(&mut self, update: &MemoryUpdate, at: DateTime<Utc>) {
        if let Some(title) = &update.title {
            self.title = title.trim().to_string();
        }
        if let Some(story) = &update.story {
            self.story = story.trim().to_string();
        }
        self.updated_at = at;
    }
}

/// A memory before the store has given it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMemory {
    pub title: String,
    pub story: String,
    pub location: Option<Location>,
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewMemory {
    pub fn new(title: impl Into<String>, story: impl Into<String>, location: Location) -> Self {
        Self {
            title: title.into(),
            story: story.into(),
            location: Some(location),
            image_data: None,
            created_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        require_text("title", &self.title)?;
        require_text("story", &self.story)?;
        if self.location.is_none() {
            return Err(StoreError::Validation(
                "A memory needs a location".to_string(),
            ));
        }
        Ok(())
    }

    /// Stamps ownership and identity. `created_at` falls back to `now`.
    pub fn into_record(self, id: MemoryId, user_id: &str, now: DateTime<Utc>) -> MemoryRecord {
        MemoryRecord {
            id,
            title: self.title.trim().to_string(),
            story: self.story.trim().to_string(),
            location: self.location,
            image_data: self.image_data,
            user_id: user_id.to_string(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        }
    }
}

/// Partial edit of the text fields. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryUpdate {
    pub title: Option<String>,
    pub story: Option<String>,
}

impl MemoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.story.is_none()
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(story) = &self.story {
            require_text("story", story)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("The {} must not be empty", field)));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl SortOrder {
    pub fn compare(&self, a: &MemoryRecord, b: &MemoryRecord) -> Ordering {
        match self {
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
            SortOrder::Oldest => a.created_at.cmp(&b.created_at),
            SortOrder::Title => a
                .title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| b.created_at.cmp(&a.created_at)),
        }
    }

    /// Stable, so records with equal keys keep their loaded order.
    pub fn sort(&self, records: &mut [MemoryRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, title: &str, day: u32) -> MemoryRecord {
        let at = Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap();
        MemoryRecord {
            id: id.into(),
            title: title.to_string(),
            story: "story".to_string(),
            location: None,
            image_data: None,
            user_id: "u1".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn sort_orders() {
        let mut rs = vec![record("a", "beach", 2), record("b", "Apple", 3), record("c", "cliff", 1)];

        SortOrder::Newest.sort(&mut rs);
        assert_eq!(rs.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["b", "a", "c"]);

        SortOrder::Oldest.sort(&mut rs);
        assert_eq!(rs.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["c", "a", "b"]);

        SortOrder::Title.sort(&mut rs);
        assert_eq!(rs.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), ["b", "a", "c"]);
    }

    #[test]
    fn new_memory_validation() {
        let loc = Location::new(1.0, 2.0, "x").unwrap();
        assert!(NewMemory::new("t", "s", loc.clone()).validate().is_ok());
        assert!(NewMemory::new("  ", "s", loc.clone()).validate().is_err());
        assert!(NewMemory::new("t", "", loc).validate().is_err());

        let mut no_loc = NewMemory::new("t", "s", Location::new(0.0, 0.0, "").unwrap());
        no_loc.location = None;
        assert!(matches!(no_loc.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn record_json_uses_backend_field_names() {
        let r = record("a", "t", 1);
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("imageData").is_some());
    }
}
