use chrono::Utc;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::media_property::MediaProperty;
use crate::forms::media_properties::{AddMediaPropertyForm, EditMediaPropertyForm};
use crate::repository::{MediaPropertyReader, MediaPropertyWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists the media properties of the user's hub.
pub fn load_media_properties<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<MediaProperty>>
where
    R: MediaPropertyReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_media_properties(user.hub_id)
        .map_err(ServiceError::from)
}

pub fn create_media_property<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddMediaPropertyForm,
) -> ServiceResult<MediaProperty>
where
    R: MediaPropertyWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_media_property = form
        .into_new_media_property(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_media_property(&new_media_property)
        .map_err(ServiceError::from)
}

pub fn modify_media_property<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditMediaPropertyForm,
) -> ServiceResult<MediaProperty>
where
    R: MediaPropertyWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let media_property_id = form.media_property_id;
    let update = form
        .into_update_media_property(Utc::now().naive_utc())
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_media_property(media_property_id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

/// Deletes a media property unless a product still references it.
pub fn remove_media_property<R>(
    repo: &R,
    user: &AuthenticatedUser,
    media_property_id: i32,
) -> ServiceResult<()>
where
    R: MediaPropertyReader + MediaPropertyWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    if repo
        .is_media_property_in_use(media_property_id, user.hub_id)
        .map_err(ServiceError::from)?
    {
        return Err(ServiceError::Conflict);
    }

    repo.delete_media_property(media_property_id, user.hub_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushkind_common::repository::errors::RepositoryResult;

    use crate::domain::media_property::{NewMediaProperty, UpdateMediaProperty};
    use crate::repository::mock::{MockMediaPropertyReader, MockMediaPropertyWriter};

    struct FakeRepo {
        reader: MockMediaPropertyReader,
        writer: MockMediaPropertyWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                reader: MockMediaPropertyReader::new(),
                writer: MockMediaPropertyWriter::new(),
            }
        }
    }

    impl MediaPropertyReader for FakeRepo {
        fn list_media_properties(&self, hub_id: i32) -> RepositoryResult<Vec<MediaProperty>> {
            self.reader.list_media_properties(hub_id)
        }

        fn is_media_property_in_use(&self, id: i32, hub_id: i32) -> RepositoryResult<bool> {
            self.reader.is_media_property_in_use(id, hub_id)
        }
    }

    impl MediaPropertyWriter for FakeRepo {
        fn create_media_property(
            &self,
            new_media_property: &NewMediaProperty,
        ) -> RepositoryResult<MediaProperty> {
            self.writer.create_media_property(new_media_property)
        }

        fn update_media_property(
            &self,
            media_property_id: i32,
            hub_id: i32,
            updates: &UpdateMediaProperty,
        ) -> RepositoryResult<MediaProperty> {
            self.writer
                .update_media_property(media_property_id, hub_id, updates)
        }

        fn delete_media_property(&self, media_property_id: i32, hub_id: i32) -> RepositoryResult<()> {
            self.writer.delete_media_property(media_property_id, hub_id)
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "admin".to_string(),
            email: "admin@example.com".to_string(),
            hub_id: 4,
            name: "Admin".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    #[test]
    fn remove_refuses_referenced_media_property() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_is_media_property_in_use()
            .times(1)
            .withf(|id, hub_id| *id == 9 && *hub_id == 4)
            .returning(|_, _| Ok(true));
        repo.writer.expect_delete_media_property().never();

        let result = remove_media_property(&repo, &admin(), 9);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn remove_deletes_unused_media_property() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_is_media_property_in_use()
            .returning(|_, _| Ok(false));
        repo.writer
            .expect_delete_media_property()
            .times(1)
            .withf(|id, hub_id| *id == 9 && *hub_id == 4)
            .returning(|_, _| Ok(()));

        assert!(remove_media_property(&repo, &admin(), 9).is_ok());
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut repo = FakeRepo::new();
        repo.writer.expect_create_media_property().never();

        let form = AddMediaPropertyForm {
            name: "  ".to_string(),
        };

        let result = create_media_property(&repo, &admin(), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn listing_requires_role() {
        let repo = FakeRepo::new();
        let mut user = admin();
        user.roles.clear();

        let result = load_media_properties(&repo, &user);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
