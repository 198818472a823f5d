use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::product_tag::TagIdSet;
use crate::models::product_tag::NewProductTag as DbNewProductTag;
use crate::repository::{DieselRepository, ProductTagReader, ProductTagWriter};

impl ProductTagReader for DieselRepository {
    fn list_product_tag_ids(&self, product_id: i32) -> RepositoryResult<TagIdSet> {
        use crate::schema::product_tags;

        let mut conn = self.conn()?;

        let ids = product_tags::table
            .filter(product_tags::product_id.eq(product_id))
            .select(product_tags::tag_id)
            .load::<i32>(&mut conn)?;

        Ok(ids.into_iter().collect())
    }
}

impl ProductTagWriter for DieselRepository {
    fn attach_tags(
        &self,
        product_id: i32,
        hub_id: i32,
        tag_ids: &TagIdSet,
    ) -> RepositoryResult<()> {
        use crate::schema::{product_tags, tags};

        if tag_ids.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn()?;
        let ids = tag_ids.to_vec();

        conn.transaction::<(), RepositoryError, _>(|conn| {
            ensure_product_with_hub(conn, hub_id, product_id)?;

            let known = tags::table
                .filter(tags::hub_id.eq(hub_id))
                .filter(tags::id.eq_any(&ids))
                .count()
                .get_result::<i64>(conn)?;

            if known as usize != ids.len() {
                return Err(RepositoryError::NotFound);
            }

            let rows: Vec<DbNewProductTag> = ids
                .iter()
                .map(|tag_id| DbNewProductTag::new(product_id, *tag_id))
                .collect();

            diesel::insert_or_ignore_into(product_tags::table)
                .values(&rows)
                .execute(conn)?;

            Ok(())
        })
    }

    fn detach_tags(
        &self,
        product_id: i32,
        hub_id: i32,
        tag_ids: &TagIdSet,
    ) -> RepositoryResult<()> {
        use crate::schema::product_tags;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn()?;
        let ids = tag_ids.to_vec();

        conn.transaction::<(), RepositoryError, _>(|conn| {
            ensure_product_with_hub(conn, hub_id, product_id)?;

            diesel::delete(
                product_tags::table
                    .filter(product_tags::product_id.eq(product_id))
                    .filter(product_tags::tag_id.eq_any(&ids)),
            )
            .execute(conn)?;

            Ok(())
        })
    }
}

fn ensure_product_with_hub(
    conn: &mut SqliteConnection,
    hub_id: i32,
    product_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::products;

    let exists = select(exists(
        products::table
            .filter(products::id.eq(product_id))
            .filter(products::hub_id.eq(hub_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
