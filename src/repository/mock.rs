use mockall::mock;

use super::{
    MediaPropertyReader, MediaPropertyWriter, ProductReader, ProductTagReader, ProductTagWriter,
    ProductWriter, TagReader, TagWriter,
};
use crate::domain::{
    media_property::{MediaProperty, NewMediaProperty, UpdateMediaProperty},
    product::{NewProduct, Product, UpdateProduct},
    product_tag::TagIdSet,
    tag::{NewTag, Tag, UpdateTag},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, hub_id: i32) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, hub_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductTagReader {}

    impl ProductTagReader for ProductTagReader {
        fn list_product_tag_ids(&self, product_id: i32) -> RepositoryResult<TagIdSet>;
    }
}

mock! {
    pub ProductTagWriter {}

    impl ProductTagWriter for ProductTagWriter {
        fn attach_tags(&self, product_id: i32, hub_id: i32, tag_ids: &TagIdSet) -> RepositoryResult<()>;
        fn detach_tags(&self, product_id: i32, hub_id: i32, tag_ids: &TagIdSet) -> RepositoryResult<()>;
    }
}

mock! {
    pub TagReader {}

    impl TagReader for TagReader {
        fn list_tags(&self, hub_id: i32) -> RepositoryResult<Vec<Tag>>;
        fn find_tag_ids(&self, hub_id: i32, tag_ids: &TagIdSet) -> RepositoryResult<TagIdSet>;
    }
}

mock! {
    pub TagWriter {}

    impl TagWriter for TagWriter {
        fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
        fn update_tag(&self, tag_id: i32, hub_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
        fn delete_tag(&self, tag_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub MediaPropertyReader {}

    impl MediaPropertyReader for MediaPropertyReader {
        fn list_media_properties(&self, hub_id: i32) -> RepositoryResult<Vec<MediaProperty>>;
        fn is_media_property_in_use(&self, id: i32, hub_id: i32) -> RepositoryResult<bool>;
    }
}

mock! {
    pub MediaPropertyWriter {}

    impl MediaPropertyWriter for MediaPropertyWriter {
        fn create_media_property(&self, new_media_property: &NewMediaProperty) -> RepositoryResult<MediaProperty>;
        fn update_media_property(&self, media_property_id: i32, hub_id: i32, updates: &UpdateMediaProperty) -> RepositoryResult<MediaProperty>;
        fn delete_media_property(&self, media_property_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}
