use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::product_tag::TagIdSet;
use crate::domain::tag::Tag;

/// Domain representation of a catalog product managed by a hub.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Media property the product is classified under.
    pub media_property_id: i32,
    /// Human-readable title of the product.
    pub title: String,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Cost represented in the smallest currency unit.
    pub cost: i32,
    /// Date associated with the product (creation of the piece, release, etc).
    pub date: NaiveDate,
    /// Units in stock.
    pub stock: i32,
    pub height: i32,
    pub width: i32,
    /// URL of the image stored on the external asset host.
    pub image_url: Option<String>,
    /// Tags currently linked to the product, ordered by name.
    pub tags: Vec<Tag>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Identifiers of the tags currently linked to the product.
    pub fn tag_ids(&self) -> TagIdSet {
        self.tags.iter().map(|tag| tag.id).collect()
    }
}

/// Payload required to insert a new product for a hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Owning hub identifier.
    pub hub_id: i32,
    pub media_property_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub cost: i32,
    pub date: NaiveDate,
    pub stock: i32,
    pub height: i32,
    pub width: i32,
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Build a new product payload with the required fields; dimensions and stock start at zero.
    pub fn new(
        hub_id: i32,
        media_property_id: i32,
        title: impl Into<String>,
        cost: i32,
        date: NaiveDate,
    ) -> Self {
        Self {
            hub_id,
            media_property_id,
            title: title.into(),
            description: None,
            cost,
            date,
            stock: 0,
            height: 0,
            width: 0,
            image_url: None,
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    /// Set the physical dimensions.
    pub fn with_dimensions(mut self, height: i32, width: i32) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    /// Attach the URL of an uploaded image.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Full replacement of the mutable scalar fields of a product.
///
/// Tag links are not part of this record; they are reconciled separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProduct {
    pub media_property_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub cost: i32,
    pub date: NaiveDate,
    pub stock: i32,
    pub height: i32,
    pub width: i32,
    pub image_url: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    /// Build a full update from the same fields used when creating a product.
    pub fn from_new_product(value: NewProduct, updated_at: NaiveDateTime) -> Self {
        Self {
            media_property_id: value.media_property_id,
            title: value.title,
            description: value.description,
            cost: value.cost,
            date: value.date,
            stock: value.stock,
            height: value.height,
            width: value.width,
            image_url: value.image_url,
            updated_at,
        }
    }
}
