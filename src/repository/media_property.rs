use diesel::dsl::{exists, select};
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::media_property::{
    MediaProperty as DomainMediaProperty, NewMediaProperty as DomainNewMediaProperty,
    UpdateMediaProperty as DomainUpdateMediaProperty,
};
use crate::models::media_property::{
    MediaProperty as DbMediaProperty, NewMediaProperty as DbNewMediaProperty,
    UpdateMediaProperty as DbUpdateMediaProperty,
};
use crate::repository::{DieselRepository, MediaPropertyReader, MediaPropertyWriter};

impl MediaPropertyReader for DieselRepository {
    fn list_media_properties(&self, hub_id: i32) -> RepositoryResult<Vec<DomainMediaProperty>> {
        use crate::schema::media_properties;

        let mut conn = self.conn()?;

        let rows = media_properties::table
            .filter(media_properties::hub_id.eq(hub_id))
            .order(media_properties::name.asc())
            .load::<DbMediaProperty>(&mut conn)?;

        Ok(rows.into_iter().map(DomainMediaProperty::from).collect())
    }

    fn is_media_property_in_use(&self, id: i32, hub_id: i32) -> RepositoryResult<bool> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let in_use = select(exists(
            products::table
                .filter(products::media_property_id.eq(id))
                .filter(products::hub_id.eq(hub_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(in_use)
    }
}

impl MediaPropertyWriter for DieselRepository {
    fn create_media_property(
        &self,
        new_media_property: &DomainNewMediaProperty,
    ) -> RepositoryResult<DomainMediaProperty> {
        use crate::schema::media_properties;

        let mut conn = self.conn()?;
        let insertable = DbNewMediaProperty::from(new_media_property);

        let created = diesel::insert_into(media_properties::table)
            .values(&insertable)
            .get_result::<DbMediaProperty>(&mut conn)?;

        Ok(created.into())
    }

    fn update_media_property(
        &self,
        media_property_id: i32,
        hub_id: i32,
        updates: &DomainUpdateMediaProperty,
    ) -> RepositoryResult<DomainMediaProperty> {
        use crate::schema::media_properties;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateMediaProperty::from(updates);

        let updated = diesel::update(
            media_properties::table
                .filter(media_properties::id.eq(media_property_id))
                .filter(media_properties::hub_id.eq(hub_id)),
        )
        .set(&db_updates)
        .get_result::<DbMediaProperty>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_media_property(&self, media_property_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::media_properties;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            media_properties::table
                .filter(media_properties::id.eq(media_property_id))
                .filter(media_properties::hub_id.eq(hub_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
