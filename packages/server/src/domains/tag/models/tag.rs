use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{CategoryId, LanguageId, ResourceId};

/// Language tag - shared by many resources, deduplicated by name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Category tag - each resource belongs to exactly one
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Language Queries
// =============================================================================

impl Language {
    /// Find or create a language by name
    ///
    /// The DO UPDATE arm makes RETURNING yield the existing row instead of
    /// nothing when the name is already taken.
    pub async fn find_or_create(name: &str, conn: &mut PgConnection) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Language>(
            r#"
            INSERT INTO languages (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await
    }

    /// Find language by name
    pub async fn find_by_name(name: &str, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Names of all languages attached to a resource, sorted
    pub async fn names_for_resource(
        resource_id: ResourceId,
        pool: &PgPool,
    ) -> sqlx::Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT l.name
            FROM languages l
            INNER JOIN resource_languages rl ON rl.language_id = l.id
            WHERE rl.resource_id = $1
            ORDER BY l.name
            "#,
        )
        .bind(resource_id)
        .fetch_all(pool)
        .await
    }

    /// Delete the given languages if nothing references them anymore.
    ///
    /// The NOT EXISTS re-check runs inside the caller's transaction, so two
    /// concurrent updates detaching the same language cannot both observe it
    /// as orphaned and race the delete against a fresh attach.
    pub async fn delete_unreferenced(
        ids: &[LanguageId],
        conn: &mut PgConnection,
    ) -> sqlx::Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            r#"
            DELETE FROM languages l
            WHERE l.id = ANY($1)
              AND NOT EXISTS (
                  SELECT 1 FROM resource_languages rl WHERE rl.language_id = l.id
              )
            "#,
        )
        .bind(ids)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Category Queries
// =============================================================================

impl Category {
    /// Find or create a category by name
    pub async fn find_or_create(name: &str, conn: &mut PgConnection) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await
    }

    /// Find category by ID
    pub async fn find_by_id(id: CategoryId, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find category by name
    pub async fn find_by_name(name: &str, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete the category if no resource references it anymore.
    ///
    /// Same guarded-delete shape as [`Language::delete_unreferenced`]; must
    /// run inside the transaction that moved the last referencing resource
    /// off the category.
    pub async fn delete_if_unreferenced(
        id: CategoryId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories c
            WHERE c.id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM resources r WHERE r.category_id = c.id
              )
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
