use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::product_tag::TagIdSet;
use crate::domain::tag::{NewTag as DomainNewTag, Tag as DomainTag, UpdateTag as DomainUpdateTag};
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag, UpdateTag as DbUpdateTag};
use crate::repository::{DieselRepository, TagReader, TagWriter};

impl TagReader for DieselRepository {
    fn list_tags(&self, hub_id: i32) -> RepositoryResult<Vec<DomainTag>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let db_tags = tags::table
            .filter(tags::hub_id.eq(hub_id))
            .order(tags::name.asc())
            .load::<DbTag>(&mut conn)?;

        Ok(db_tags.into_iter().map(DomainTag::from).collect())
    }

    fn find_tag_ids(&self, hub_id: i32, tag_ids: &TagIdSet) -> RepositoryResult<TagIdSet> {
        use crate::schema::tags;

        if tag_ids.is_empty() {
            return Ok(TagIdSet::new());
        }

        let mut conn = self.conn()?;

        let found = tags::table
            .filter(tags::hub_id.eq(hub_id))
            .filter(tags::id.eq_any(tag_ids.to_vec()))
            .select(tags::id)
            .load::<i32>(&mut conn)?;

        Ok(found.into_iter().collect())
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(&self, new_tag: &DomainNewTag) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let insertable = DbNewTag::from(new_tag);

        let created = diesel::insert_into(tags::table)
            .values(&insertable)
            .get_result::<DbTag>(&mut conn)?;

        Ok(created.into())
    }

    fn update_tag(
        &self,
        tag_id: i32,
        hub_id: i32,
        updates: &DomainUpdateTag,
    ) -> RepositoryResult<DomainTag> {
        use crate::schema::tags;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateTag::from(updates);

        let target = tags::table
            .filter(tags::id.eq(tag_id))
            .filter(tags::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbTag>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_tag(&self, tag_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::{product_tags, tags};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let deleted = diesel::delete(
                tags::table
                    .filter(tags::id.eq(tag_id))
                    .filter(tags::hub_id.eq(hub_id)),
            )
            .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(product_tags::table.filter(product_tags::tag_id.eq(tag_id)))
                .execute(conn)?;

            Ok(())
        })
    }
}
