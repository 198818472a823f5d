use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Classification a product belongs to (for example "Oil on canvas" or "Print").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaProperty {
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new media property for a hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMediaProperty {
    pub hub_id: i32,
    pub name: String,
}

impl NewMediaProperty {
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        Self { hub_id, name }
    }
}

/// Patch data applied when renaming a media property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMediaProperty {
    pub name: String,
    pub updated_at: NaiveDateTime,
}
