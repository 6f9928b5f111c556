//! Resource mutation actions
//!
//! All resource write operations go through these actions. Each one is a
//! single short-lived transaction; the search index is pushed to before the
//! transaction opens so no locks are held across network I/O, and the commit
//! only happens once the index call has resolved per the sync policy.

use anyhow::Context;
use serde_json::json;
use tracing::{info, warn};

use crate::common::{ApiError, ResourceId};
use crate::domains::resources::data::{IndexPatch, UpdateResourceInput};
use crate::domains::resources::models::{
    Resource, ResourceLanguage, ResourceRepr, VoteDirection, VoteInformation,
};
use crate::domains::tag::models::{Category, Language};
use crate::kernel::ServerDeps;

use super::queries::get_resource;

/// Apply a validated partial update to a resource.
///
/// Ordering is deliberate: the index receives its partial patch first, and
/// the database transaction (field changes + tag garbage collection) commits
/// only afterwards. In strict sync mode an index failure aborts the whole
/// operation with nothing committed; in development it is logged and
/// tolerated. A crash between the index push and the commit can still leave
/// the two stores diverged - accepted, the index is eventually consistent.
pub async fn apply_update(
    resource_id: ResourceId,
    input: UpdateResourceInput,
    deps: &ServerDeps,
) -> Result<ResourceRepr, ApiError> {
    let pool = &deps.db_pool;

    let resource = Resource::find_by_id(resource_id, pool)
        .await?
        .ok_or(ApiError::NotFound)?;

    // Diagnostic trail: the full pre-mutation state
    let old_repr = get_resource(resource_id, pool).await?;
    let old_json =
        serde_json::to_string(&old_repr).context("Failed to serialize resource state")?;
    info!(resource_id = resource_id, old = %old_json, "Applying resource update");

    // Stage the index patch from the incoming fields only - unchanged fields
    // must not appear in the partial document.
    let mut patch = IndexPatch::new(resource_id);
    if let Some(languages) = &input.languages {
        patch.set("languages", json!(languages));
    }
    if let Some(category) = &input.category {
        patch.set("category", json!(category));
    }
    if let Some(name) = &input.name {
        patch.set("name", json!(name));
    }
    if let Some(url) = &input.url {
        patch.set("url", json!(url));
    }
    if let Some(free) = input.free {
        patch.set("free", json!(free));
    }
    if let Some(notes) = &input.notes {
        patch.set("notes", json!(notes));
    }

    if let Err(err) = deps
        .search_index
        .partial_update(resource_id, patch.fields())
        .await
    {
        if deps.strict_index_sync {
            warn!(
                resource_id = resource_id,
                error = %err,
                "Search index update failed; aborting without commit"
            );
            return Err(ApiError::IndexSync(format!(
                "failed to update search index for resource '{}': {}",
                resource.name, err
            )));
        }
        warn!(
            resource_id = resource_id,
            error = %err,
            "Search index update failed; committing anyway (non-strict mode)"
        );
    }

    // All datastore changes ride one transaction: either every staged field
    // lands together with the tag cleanup, or none of it does.
    let mut tx = pool.begin().await?;

    if let Some(requested) = &input.languages {
        let old_ids = ResourceLanguage::language_ids(resource_id, &mut tx).await?;

        let mut new_ids = Vec::with_capacity(requested.len());
        for name in requested {
            let language = Language::find_or_create(name, &mut tx).await?;
            new_ids.push(language.id);
        }
        ResourceLanguage::replace(resource_id, &new_ids, &mut tx).await?;

        let detached: Vec<_> = old_ids
            .into_iter()
            .filter(|id| !new_ids.contains(id))
            .collect();
        let deleted = Language::delete_unreferenced(&detached, &mut tx).await?;
        if deleted > 0 {
            info!(
                resource_id = resource_id,
                deleted = deleted,
                "Garbage collected orphaned languages"
            );
        }
    }

    if let Some(category_name) = &input.category {
        let old_category_id = resource.category_id;
        let category = Category::find_or_create(category_name, &mut tx).await?;
        Resource::set_category(resource_id, category.id, &mut tx).await?;

        if category.id != old_category_id
            && Category::delete_if_unreferenced(old_category_id, &mut tx).await?
        {
            info!(
                resource_id = resource_id,
                category_id = old_category_id,
                "Garbage collected orphaned category"
            );
        }
    }

    if let Some(name) = &input.name {
        Resource::set_name(resource_id, name, &mut tx).await?;
    }
    if let Some(url) = &input.url {
        Resource::set_url(resource_id, url, &mut tx).await?;
    }
    if let Some(free) = input.free {
        Resource::set_free(resource_id, free, &mut tx).await?;
    }
    if let Some(notes) = &input.notes {
        Resource::set_notes(resource_id, notes.as_deref(), &mut tx).await?;
    }

    tx.commit().await?;

    get_resource(resource_id, pool).await
}

/// Cast a vote on a resource for the given voter.
///
/// Per (voter, resource) the ledger holds at most one active direction.
/// Repeating the current direction toggles it off; the opposite direction
/// flips it. Ledger-row creation and counter changes commit atomically, and
/// the row is locked for the transaction so concurrent votes by the same
/// voter serialize.
pub async fn cast_vote(
    resource_id: ResourceId,
    direction: VoteDirection,
    voter_apikey: &str,
    deps: &ServerDeps,
) -> Result<ResourceRepr, ApiError> {
    let pool = &deps.db_pool;
    let mut tx = pool.begin().await?;

    if !Resource::exists(resource_id, &mut tx).await? {
        return Err(ApiError::NotFound);
    }

    match VoteInformation::find_for_update(voter_apikey, resource_id, &mut tx).await? {
        None => {
            // First-ever vote by this voter on this resource
            VoteInformation::create(voter_apikey, resource_id, direction, &mut tx).await?;
            Resource::bump_vote_counter(resource_id, direction, 1, &mut tx).await?;
            info!(
                resource_id = resource_id,
                direction = %direction,
                "Recorded first vote"
            );
        }
        Some(vote) => match vote.direction() {
            Some(current) if current == direction => {
                // Same direction again: toggle off
                Resource::bump_vote_counter(resource_id, direction, -1, &mut tx).await?;
                VoteInformation::set_direction(voter_apikey, resource_id, None, &mut tx).await?;
                info!(
                    resource_id = resource_id,
                    direction = %direction,
                    "Vote toggled off"
                );
            }
            Some(current) => {
                // Opposite direction: flip both counters
                Resource::bump_vote_counter(resource_id, current, -1, &mut tx).await?;
                Resource::bump_vote_counter(resource_id, direction, 1, &mut tx).await?;
                VoteInformation::set_direction(voter_apikey, resource_id, Some(direction), &mut tx)
                    .await?;
                info!(
                    resource_id = resource_id,
                    direction = %direction,
                    "Vote flipped"
                );
            }
            None => {
                // Row exists from an earlier toggle; re-activate it
                Resource::bump_vote_counter(resource_id, direction, 1, &mut tx).await?;
                VoteInformation::set_direction(voter_apikey, resource_id, Some(direction), &mut tx)
                    .await?;
                info!(
                    resource_id = resource_id,
                    direction = %direction,
                    "Vote re-recorded"
                );
            }
        },
    }

    tx.commit().await?;

    get_resource(resource_id, pool).await
}

/// Unconditionally count one click on a resource.
///
/// Works without a credential; a single-statement increment is its own
/// transaction.
pub async fn add_click(
    resource_id: ResourceId,
    deps: &ServerDeps,
) -> Result<ResourceRepr, ApiError> {
    if !Resource::increment_clicks(resource_id, &deps.db_pool).await? {
        return Err(ApiError::NotFound);
    }

    get_resource(resource_id, &deps.db_pool).await
}
