use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::media_property::{NewMediaProperty, UpdateMediaProperty};
use crate::forms::sanitize_inline_text;

const NAME_MAX_LEN: u64 = 128;

pub type MediaPropertyFormResult<T> = Result<T, MediaPropertyFormError>;

#[derive(Debug, Error)]
pub enum MediaPropertyFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("media property name cannot be empty")]
    EmptyName,
}

/// Payload of the "Add media property" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddMediaPropertyForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
}

impl AddMediaPropertyForm {
    pub fn into_new_media_property(
        self,
        hub_id: i32,
    ) -> MediaPropertyFormResult<NewMediaProperty> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(MediaPropertyFormError::EmptyName);
        }

        Ok(NewMediaProperty::new(hub_id, name))
    }
}

/// Payload of the inline rename form on the media properties page.
#[derive(Debug, Deserialize, Validate)]
pub struct EditMediaPropertyForm {
    #[validate(range(min = 1))]
    pub media_property_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
}

impl EditMediaPropertyForm {
    pub fn into_update_media_property(
        self,
        updated_at: NaiveDateTime,
    ) -> MediaPropertyFormResult<UpdateMediaProperty> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(MediaPropertyFormError::EmptyName);
        }

        Ok(UpdateMediaProperty { name, updated_at })
    }
}
