use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::media_property::MediaProperty;
use crate::domain::product::Product;
use crate::domain::product_tag::TagIdSet;
use crate::forms::products::{
    NewProductSubmission, ProductForm, ProductFormConfig, ProductFormValues,
    UpdateProductSubmission,
};
use crate::repository::{
    MediaPropertyReader, ProductReader, ProductTagReader, ProductTagWriter, ProductWriter,
    TagReader,
};
use crate::services::tag_links::reconcile_tags;
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the products index template.
pub struct ProductsPageData {
    pub products: Vec<ProductView>,
}

/// Data required to render the create and edit product templates.
pub struct ProductFormPage {
    /// Choice lists for the media property select and the tag checkboxes.
    pub config: ProductFormConfig,
    /// Values the inputs are pre-filled with.
    pub values: ProductFormValues,
    /// Product being edited, `None` on the create page.
    pub product: Option<Product>,
}

/// Loads the products overview page.
pub fn load_products_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + MediaPropertyReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let items = repo
        .list_products(user.hub_id)
        .map_err(ServiceError::from)?;
    let media_properties = repo
        .list_media_properties(user.hub_id)
        .map_err(ServiceError::from)?;

    let media_lookup: HashMap<i32, &MediaProperty> = media_properties
        .iter()
        .map(|media_property| (media_property.id, media_property))
        .collect();

    let products = items
        .into_iter()
        .map(|product| ProductView::from_product(product, &media_lookup))
        .collect();

    Ok(ProductsPageData { products })
}

/// Loads the empty create form.
pub fn load_new_product_form<R>(
    repo: &R,
    user: &AuthenticatedUser,
    today: NaiveDate,
) -> ServiceResult<ProductFormPage>
where
    R: MediaPropertyReader + TagReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let config = load_form_config(repo, user.hub_id)?;

    Ok(ProductFormPage {
        config,
        values: ProductFormValues::blank(today),
        product: None,
    })
}

/// Loads the edit form pre-filled with the product's current values and tags.
pub fn load_edit_product_form<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<ProductFormPage>
where
    R: ProductReader + MediaPropertyReader + TagReader + ?Sized,
{
    let product = load_product(repo, user, product_id)?;

    let config = load_form_config(repo, user.hub_id)?
        .select(Some(product.media_property_id), &product.tag_ids());

    Ok(ProductFormPage {
        config,
        values: ProductFormValues::from(&product),
        product: Some(product),
    })
}

/// Loads a single product of the user's hub.
pub fn load_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_product_by_id(product_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a product and links the submitted tags to it.
///
/// When linking the tags fails the new product is removed again.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ProductTagWriter + TagReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let NewProductSubmission { product, tag_ids } = form
        .into_new_product(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_product(&product).map_err(ServiceError::from)?;

    if let Err(err) = reconcile_tags(repo, created.id, user.hub_id, &TagIdSet::new(), &tag_ids) {
        log::error!("Failed to link tags to product {}: {err}", created.id);
        if let Err(delete_err) = repo.delete_product(created.id, user.hub_id) {
            log::error!(
                "Failed to roll back product {} after tag error: {delete_err}",
                created.id
            );
        }
        return Err(err);
    }

    Ok(created)
}

/// Saves the scalar fields of a product, then reconciles its tag links.
pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: ProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ProductTagReader + ProductTagWriter + TagReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    if repo
        .get_product_by_id(product_id, user.hub_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let UpdateProductSubmission { updates, tag_ids } = form
        .into_update_product(user.hub_id, Utc::now().naive_utc())
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo
        .update_product(product_id, user.hub_id, &updates)
        .map_err(ServiceError::from)?;

    let existing = repo
        .list_product_tag_ids(product_id)
        .map_err(ServiceError::from)?;

    reconcile_tags(repo, product_id, user.hub_id, &existing, &tag_ids)?;

    Ok(updated)
}

/// Deletes a product and its tag links.
pub fn delete_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_product(product_id, user.hub_id)
        .map_err(ServiceError::from)
}

fn load_form_config<R>(repo: &R, hub_id: i32) -> ServiceResult<ProductFormConfig>
where
    R: MediaPropertyReader + TagReader + ?Sized,
{
    let media_properties = repo
        .list_media_properties(hub_id)
        .map_err(ServiceError::from)?;
    let tags = repo.list_tags(hub_id).map_err(ServiceError::from)?;

    Ok(ProductFormConfig::new(&media_properties, &tags))
}

/// View model exposed to the products index template.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub cost: i32,
    pub cost_formatted: String,
    pub date: NaiveDate,
    pub stock: i32,
    pub height: i32,
    pub width: i32,
    pub image_url: Option<String>,
    pub media_property: Option<String>,
    pub tags: Vec<String>,
}

impl ProductView {
    fn from_product(product: Product, media_lookup: &HashMap<i32, &MediaProperty>) -> Self {
        let Product {
            id,
            media_property_id,
            title,
            description,
            cost,
            date,
            stock,
            height,
            width,
            image_url,
            tags,
            ..
        } = product;

        Self {
            id,
            title,
            description,
            cost,
            cost_formatted: format!("{:.2}", cost as f64 / 100.0),
            date,
            stock,
            height,
            width,
            image_url,
            media_property: media_lookup
                .get(&media_property_id)
                .map(|media_property| media_property.name.clone()),
            tags: tags.into_iter().map(|tag| tag.name).collect(),
        }
    }
}
