use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::media_property::{
    MediaProperty as DomainMediaProperty, NewMediaProperty as DomainNewMediaProperty,
    UpdateMediaProperty as DomainUpdateMediaProperty,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::media_properties)]
pub struct MediaProperty {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::media_properties)]
pub struct NewMediaProperty<'a> {
    pub hub_id: i32,
    pub name: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::media_properties)]
pub struct UpdateMediaProperty<'a> {
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<MediaProperty> for DomainMediaProperty {
    fn from(value: MediaProperty) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewMediaProperty> for NewMediaProperty<'a> {
    fn from(value: &'a DomainNewMediaProperty) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateMediaProperty> for UpdateMediaProperty<'a> {
    fn from(value: &'a DomainUpdateMediaProperty) -> Self {
        Self {
            name: value.name.as_str(),
            updated_at: value.updated_at,
        }
    }
}
