use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
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
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub hub_id: i32,
    pub media_property_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub cost: i32,
    pub date: NaiveDate,
    pub stock: i32,
    pub height: i32,
    pub width: i32,
    pub image_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub media_property_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub cost: i32,
    pub date: NaiveDate,
    pub stock: i32,
    pub height: i32,
    pub width: i32,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            media_property_id: value.media_property_id,
            title: value.title,
            description: value.description,
            cost: value.cost,
            date: value.date,
            stock: value.stock,
            height: value.height,
            width: value.width,
            image_url: value.image_url,
            tags: Vec::new(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            hub_id: value.hub_id,
            media_property_id: value.media_property_id,
            title: value.title.as_str(),
            description: value.description.as_deref(),
            cost: value.cost,
            date: value.date,
            stock: value.stock,
            height: value.height,
            width: value.width,
            image_url: value.image_url.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            media_property_id: value.media_property_id,
            title: value.title.as_str(),
            description: value.description.as_deref(),
            cost: value.cost,
            date: value.date,
            stock: value.stock,
            height: value.height,
            width: value.width,
            image_url: value.image_url.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
