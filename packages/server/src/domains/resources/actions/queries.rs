//! Resource read actions

use sqlx::PgPool;

use crate::common::{ApiError, ResourceId};
use crate::domains::resources::models::{Resource, ResourceRepr};
use crate::domains::tag::models::{Category, Language};

/// Fetch one resource with its relationships resolved into the outbound
/// representation.
pub async fn get_resource(resource_id: ResourceId, pool: &PgPool) -> Result<ResourceRepr, ApiError> {
    let resource = Resource::find_by_id(resource_id, pool)
        .await?
        .ok_or(ApiError::NotFound)?;
    let languages = Language::names_for_resource(resource_id, pool).await?;
    let category = Category::find_by_id(resource.category_id, pool).await?;
    Ok(resource.representation(languages, category.name))
}
