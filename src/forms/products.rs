use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::routes::empty_string_as_none;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::media_property::MediaProperty;
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::product_tag::{TagIdParseError, TagIdSet};
use crate::domain::tag::Tag;
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a product title.
const TITLE_MAX_LEN: usize = 128;
const TITLE_MAX_LEN_VALIDATOR: u64 = TITLE_MAX_LEN as u64;

const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = 4096;

/// Date format used by `<input type="date">`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided title is empty after sanitization.
    #[error("product title cannot be empty")]
    EmptyTitle,
    /// The date field is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date `{value}`")]
    InvalidDate { value: String },
    /// The tags field contains something other than positive integer ids.
    #[error("invalid tags: {0}")]
    InvalidTags(#[from] TagIdParseError),
}

/// Payload submitted by both the create and the edit product forms.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    pub title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: Option<String>,
    /// Cost in the smallest currency unit.
    #[validate(range(min = 0))]
    pub cost: i32,
    pub date: String,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(range(min = 0))]
    pub height: i32,
    #[validate(range(min = 0))]
    pub width: i32,
    #[validate(range(min = 1))]
    pub media_property_id: i32,
    /// URL written by the image upload widget.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(url)]
    pub image_url: Option<String>,
    /// Comma-separated tag ids, for example `1,4,7`.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub tags: Option<String>,
}

/// Validated create payload: the product row plus the tags to link to it.
#[derive(Debug)]
pub struct NewProductSubmission {
    pub product: NewProduct,
    pub tag_ids: TagIdSet,
}

/// Validated edit payload: the scalar updates plus the desired tag set.
#[derive(Debug)]
pub struct UpdateProductSubmission {
    pub updates: UpdateProduct,
    pub tag_ids: TagIdSet,
}

impl ProductForm {
    /// Validates and sanitizes the payload for a new product of `hub_id`.
    pub fn into_new_product(self, hub_id: i32) -> ProductFormResult<NewProductSubmission> {
        self.validate()?;

        let title = sanitize_inline_text(&self.title);
        if title.is_empty() {
            return Err(ProductFormError::EmptyTitle);
        }

        let date = parse_date(&self.date)?;
        let tag_ids = TagIdSet::parse(self.tags.as_deref())?;

        let mut product = NewProduct::new(hub_id, self.media_property_id, title, self.cost, date)
            .with_stock(self.stock)
            .with_dimensions(self.height, self.width);

        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            product = product.with_description(description);
        }

        if let Some(image_url) = self.image_url.as_deref().map(str::trim) {
            product = product.with_image_url(image_url);
        }

        Ok(NewProductSubmission { product, tag_ids })
    }

    /// Validates and sanitizes the payload into a full scalar update.
    pub fn into_update_product(
        self,
        hub_id: i32,
        updated_at: NaiveDateTime,
    ) -> ProductFormResult<UpdateProductSubmission> {
        let NewProductSubmission { product, tag_ids } = self.into_new_product(hub_id)?;

        Ok(UpdateProductSubmission {
            updates: UpdateProduct::from_new_product(product, updated_at),
            tag_ids,
        })
    }
}

fn parse_date(raw: &str) -> ProductFormResult<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| ProductFormError::InvalidDate {
        value: trimmed.to_string(),
    })
}

/// One option of a select or checkbox group.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Choice {
    pub value: i32,
    pub label: String,
    pub selected: bool,
}

/// Choice lists rendered by the product form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductFormConfig {
    pub media_properties: Vec<Choice>,
    pub tags: Vec<Choice>,
}

impl ProductFormConfig {
    /// Build the choice lists from the hub's lookup records. Nothing is preselected.
    pub fn new(media_properties: &[MediaProperty], tags: &[Tag]) -> Self {
        Self {
            media_properties: media_properties
                .iter()
                .map(|item| Choice {
                    value: item.id,
                    label: item.name.clone(),
                    selected: false,
                })
                .collect(),
            tags: tags
                .iter()
                .map(|tag| Choice {
                    value: tag.id,
                    label: tag.name.clone(),
                    selected: false,
                })
                .collect(),
        }
    }

    /// Mark the current media property and tags as selected.
    pub fn select(mut self, media_property_id: Option<i32>, tag_ids: &TagIdSet) -> Self {
        for choice in &mut self.media_properties {
            choice.selected = Some(choice.value) == media_property_id;
        }
        for choice in &mut self.tags {
            choice.selected = tag_ids.contains(choice.value);
        }
        self
    }
}

/// Values used to pre-fill the product form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductFormValues {
    pub title: String,
    pub description: String,
    pub cost: i32,
    pub date: String,
    pub stock: i32,
    pub height: i32,
    pub width: i32,
    pub media_property_id: Option<i32>,
    pub image_url: String,
    pub tags: String,
}

impl ProductFormValues {
    /// Blank values for the create form, dated `today`.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            cost: 0,
            date: today.format(DATE_FORMAT).to_string(),
            stock: 0,
            height: 0,
            width: 0,
            media_property_id: None,
            image_url: String::new(),
            tags: String::new(),
        }
    }
}

impl From<&Product> for ProductFormValues {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone().unwrap_or_default(),
            cost: product.cost,
            date: product.date.format(DATE_FORMAT).to_string(),
            stock: product.stock,
            height: product.height,
            width: product.width,
            media_property_id: Some(product.media_property_id),
            image_url: product.image_url.clone().unwrap_or_default(),
            tags: product.tag_ids().to_string(),
        }
    }
}
