use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::{
    media_property::{MediaProperty, NewMediaProperty, UpdateMediaProperty},
    product::{NewProduct, Product, UpdateProduct},
    product_tag::TagIdSet,
    tag::{NewTag, Tag, UpdateTag},
};

pub mod media_property;
pub mod product;
pub mod product_tag;
pub mod tag;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over product records.
pub trait ProductReader {
    /// Load a product together with its linked tags.
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
    /// Load every product of the hub, newest first, with linked tags.
    fn list_products(&self, hub_id: i32) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    /// Remove the product row and every tag link it owns.
    fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read access to the product-tag join table.
pub trait ProductTagReader {
    fn list_product_tag_ids(&self, product_id: i32) -> RepositoryResult<TagIdSet>;
}

/// Attach/detach primitives over the product-tag join table.
///
/// Both calls are transactional on their own: either every id in the set is
/// applied or none is.
pub trait ProductTagWriter {
    /// Link `tag_ids` to the product. Already linked ids are left alone.
    fn attach_tags(&self, product_id: i32, hub_id: i32, tag_ids: &TagIdSet)
    -> RepositoryResult<()>;
    /// Unlink `tag_ids` from the product. Ids that are not linked are ignored.
    fn detach_tags(&self, product_id: i32, hub_id: i32, tag_ids: &TagIdSet)
    -> RepositoryResult<()>;
}

/// Read-only operations over tag records.
pub trait TagReader {
    fn list_tags(&self, hub_id: i32) -> RepositoryResult<Vec<Tag>>;
    /// Return the subset of `tag_ids` that exist in the hub.
    fn find_tag_ids(&self, hub_id: i32, tag_ids: &TagIdSet) -> RepositoryResult<TagIdSet>;
}

/// Write operations over tag records.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    fn update_tag(&self, tag_id: i32, hub_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
    fn delete_tag(&self, tag_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over media property records.
pub trait MediaPropertyReader {
    fn list_media_properties(&self, hub_id: i32) -> RepositoryResult<Vec<MediaProperty>>;
    /// Whether any product still references the media property.
    fn is_media_property_in_use(&self, id: i32, hub_id: i32) -> RepositoryResult<bool>;
}

/// Write operations over media property records.
pub trait MediaPropertyWriter {
    fn create_media_property(
        &self,
        new_media_property: &NewMediaProperty,
    ) -> RepositoryResult<MediaProperty>;
    fn update_media_property(
        &self,
        media_property_id: i32,
        hub_id: i32,
        updates: &UpdateMediaProperty,
    ) -> RepositoryResult<MediaProperty>;
    fn delete_media_property(&self, media_property_id: i32, hub_id: i32) -> RepositoryResult<()>;
}
