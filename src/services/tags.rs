use chrono::Utc;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::tag::Tag;
use crate::forms::tags::{AddTagForm, EditTagForm};
use crate::repository::{TagReader, TagWriter};
use crate::services::{ServiceError, ServiceResult};

/// Fetches every tag of the authenticated user's hub, sorted by name.
pub fn load_tags<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Tag>>
where
    R: TagReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_tags(user.hub_id).map_err(ServiceError::from)
}

/// Creates a new tag for the authenticated user's hub.
pub fn create_tag<R>(repo: &R, user: &AuthenticatedUser, form: AddTagForm) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_tag = form
        .into_new_tag(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_tag(&new_tag).map_err(ServiceError::from)
}

/// Renames an existing tag of the authenticated user's hub.
pub fn modify_tag<R>(repo: &R, user: &AuthenticatedUser, form: EditTagForm) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let tag_id = form.tag_id;
    let update = form
        .into_update_tag(Utc::now().naive_utc())
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_tag(tag_id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

/// Deletes a tag together with its product links.
pub fn remove_tag<R>(repo: &R, user: &AuthenticatedUser, tag_id: i32) -> ServiceResult<()>
where
    R: TagWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_tag(tag_id, user.hub_id)
        .map_err(ServiceError::from)
}
