use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_tags)]
pub struct NewProductTag {
    pub product_id: i32,
    pub tag_id: i32,
}

impl NewProductTag {
    pub fn new(product_id: i32, tag_id: i32) -> Self {
        Self { product_id, tag_id }
    }
}
