use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::tag::{NewTag as DomainNewTag, Tag as DomainTag, UpdateTag as DomainUpdateTag};

/// Row of the `tags` table. Also selected through the `product_tags` join
/// when products are loaded with their labels.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Tag {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tags)]
pub struct NewTag<'a> {
    pub hub_id: i32,
    pub name: &'a str,
}

/// Rename payload; the hub and id never change.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tags)]
pub struct UpdateTag<'a> {
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<Tag> for DomainTag {
    fn from(value: Tag) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewTag> for NewTag<'a> {
    fn from(value: &'a DomainNewTag) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateTag> for UpdateTag<'a> {
    fn from(value: &'a DomainUpdateTag) -> Self {
        Self {
            name: value.name.as_str(),
            updated_at: value.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn rename_payload_borrows_sanitized_name() {
        let updated_at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default();
        let domain = DomainUpdateTag {
            name: "Seascape".to_string(),
            updated_at,
        };

        let changeset = UpdateTag::from(&domain);

        assert_eq!(changeset.name, "Seascape");
        assert_eq!(changeset.updated_at, updated_at);
    }

    #[test]
    fn row_converts_into_domain_tag() {
        let row = Tag {
            id: 3,
            hub_id: 9,
            name: "Night".to_string(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };

        let tag = DomainTag::from(row);

        assert_eq!((tag.id, tag.hub_id, tag.name.as_str()), (3, 9, "Night"));
    }
}
