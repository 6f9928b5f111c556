//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use sqlx::PgPool;

use server_core::common::ResourceId;
use server_core::domains::auth::Key;
use server_core::domains::resources::models::{Resource, ResourceLanguage};
use server_core::domains::tag::models::{Category, Language};

/// Create a test API key
pub async fn create_test_key(pool: &PgPool, apikey: &str) -> Result<Key> {
    let key = Key::create(apikey, &format!("{}@example.com", apikey), pool).await?;
    Ok(key)
}

/// Create a test resource with the given category and languages
pub async fn create_test_resource(
    pool: &PgPool,
    name: &str,
    url: &str,
    category: &str,
    languages: &[&str],
) -> Result<ResourceId> {
    let mut conn = pool.acquire().await?;

    let category = Category::find_or_create(category, &mut conn).await?;
    let resource = Resource::create(
        name,
        url,
        category.id,
        false,                // free
        Some("fixture note"), // notes
        pool,
    )
    .await?;

    let mut language_ids = Vec::with_capacity(languages.len());
    for language in languages {
        language_ids.push(Language::find_or_create(language, &mut conn).await?.id);
    }
    ResourceLanguage::replace(resource.id, &language_ids, &mut conn).await?;

    Ok(resource.id)
}
