//! Reconciliation of a product's tag links against a submitted tag set.

use crate::domain::product_tag::{TagDelta, TagIdSet};
use crate::repository::{ProductTagWriter, TagReader};
use crate::services::{ServiceError, ServiceResult};

/// Converge the tag links of `product_id` from `existing` to exactly `desired`.
///
/// At most one detach and one attach call are issued, in that order, and only
/// with non-empty operands. Ids in `desired` that are unknown to the hub are
/// rejected before anything is mutated.
pub fn reconcile_tags<R>(
    repo: &R,
    product_id: i32,
    hub_id: i32,
    existing: &TagIdSet,
    desired: &TagIdSet,
) -> ServiceResult<()>
where
    R: ProductTagWriter + TagReader + ?Sized,
{
    let delta = TagDelta::between(existing, desired);
    if delta.is_noop() {
        return Ok(());
    }

    log::debug!(
        "Reconciling tags of product {product_id}: detach [{}], attach [{}]",
        delta.to_detach,
        delta.to_attach
    );

    if !delta.to_attach.is_empty() {
        let known = repo
            .find_tag_ids(hub_id, &delta.to_attach)
            .map_err(ServiceError::from)?;
        let missing = delta.to_attach.difference(&known);
        if !missing.is_empty() {
            return Err(ServiceError::Association(format!(
                "unknown tag ids: {missing}"
            )));
        }
    }

    if !delta.to_detach.is_empty() {
        repo.detach_tags(product_id, hub_id, &delta.to_detach)
            .map_err(|err| ServiceError::Association(err.to_string()))?;
    }

    if !delta.to_attach.is_empty() {
        repo.attach_tags(product_id, hub_id, &delta.to_attach)
            .map_err(|err| ServiceError::Association(err.to_string()))?;
    }

    Ok(())
}
