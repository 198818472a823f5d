use std::env;

use serde::Serialize;

/// Public settings of the external image host used by the product forms.
///
/// Only values safe to expose to the browser live here. Uploads go straight
/// from the browser to the host using an unsigned `upload_preset`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ImageHostConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub upload_preset: Option<String>,
}

impl ImageHostConfig {
    /// Read `CLOUDINARY_NAME`, `CLOUDINARY_API_KEY` and `CLOUDINARY_UPLOAD_PRESET`.
    pub fn from_env() -> Self {
        Self {
            cloud_name: non_empty_var("CLOUDINARY_NAME"),
            api_key: non_empty_var("CLOUDINARY_API_KEY"),
            upload_preset: non_empty_var("CLOUDINARY_UPLOAD_PRESET"),
        }
    }

    /// The upload widget needs at least a cloud name and a preset.
    pub fn is_enabled(&self) -> bool {
        self.cloud_name.is_some() && self.upload_preset.is_some()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
