use std::collections::HashMap;

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct,
        UpdateProduct as DomainUpdateProduct,
    },
    domain::tag::Tag as DomainTag,
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    models::tag::Tag as DbTag,
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .filter(products::hub_id.eq(hub_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match product {
            Some(db_product) => with_tags(&mut conn, db_product).map(Some),
            None => Ok(None),
        }
    }

    fn list_products(&self, hub_id: i32) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let db_products = products::table
            .filter(products::hub_id.eq(hub_id))
            .order((products::created_at.desc(), products::id.desc()))
            .load::<DbProduct>(&mut conn)?;

        if db_products.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
        let mut tag_map = load_tags_for_products(&mut conn, &product_ids)?;

        let products = db_products
            .into_iter()
            .map(|db_product| {
                let mut domain: DomainProduct = db_product.into();
                domain.tags = tag_map.remove(&domain.id).unwrap_or_default();
                domain
            })
            .collect();

        Ok(products)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = conn.transaction::<DbProduct, RepositoryError, _>(|conn| {
            ensure_media_property_with_hub(
                conn,
                new_product.hub_id,
                new_product.media_property_id,
            )?;

            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;
            Ok(created)
        })?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let updated = conn.transaction::<DbProduct, RepositoryError, _>(|conn| {
            ensure_media_property_with_hub(conn, hub_id, updates.media_property_id)?;

            let target = products::table
                .filter(products::id.eq(product_id))
                .filter(products::hub_id.eq(hub_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;
            Ok(updated)
        })?;

        with_tags(&mut conn, updated)
    }

    fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_tags, products};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let found = select(exists(
                products::table
                    .filter(products::id.eq(product_id))
                    .filter(products::hub_id.eq(hub_id)),
            ))
            .get_result::<bool>(conn)?;
            if !found {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(product_tags::table.filter(product_tags::product_id.eq(product_id)))
                .execute(conn)?;
            diesel::delete(
                products::table
                    .filter(products::id.eq(product_id))
                    .filter(products::hub_id.eq(hub_id)),
            )
            .execute(conn)?;

            Ok(())
        })
    }
}

fn with_tags(
    conn: &mut SqliteConnection,
    db_product: DbProduct,
) -> RepositoryResult<DomainProduct> {
    let mut domain: DomainProduct = db_product.into();
    let mut tags = load_tags_for_products(conn, &[domain.id])?;
    domain.tags = tags.remove(&domain.id).unwrap_or_default();
    Ok(domain)
}

fn load_tags_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainTag>>> {
    use crate::schema::{product_tags, tags};

    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_tags::table
        .inner_join(tags::table)
        .filter(product_tags::product_id.eq_any(product_ids))
        .order(tags::name.asc())
        .select((product_tags::product_id, DbTag::as_select()))
        .load::<(i32, DbTag)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (product_id, tag) in rows {
        map.entry(product_id).or_default().push(tag.into());
    }

    Ok(map)
}

fn ensure_media_property_with_hub(
    conn: &mut SqliteConnection,
    hub_id: i32,
    media_property_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::media_properties;

    let exists = select(exists(
        media_properties::table
            .filter(media_properties::id.eq(media_property_id))
            .filter(media_properties::hub_id.eq(hub_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
