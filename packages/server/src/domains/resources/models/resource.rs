//! Resource model - one curated directory entry
//!
//! Scalar fields are updated through single-purpose setters so the mutation
//! engine can apply exactly the fields a partial update names, inside one
//! transaction, and nothing else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{CategoryId, ResourceId};

use super::vote::VoteDirection;

/// Resource - a curated directory entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub url: String,
    pub category_id: CategoryId,
    pub free: bool,
    pub notes: Option<String>,
    pub upvotes: i32,
    pub downvotes: i32,
    pub times_clicked: i32,
    pub created_at: DateTime<Utc>,
}

/// Outbound representation of a resource.
///
/// Field names here are canonical: the search-index patches reuse them, so a
/// rename must happen in both places or the index drifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRepr {
    pub id: ResourceId,
    pub name: String,
    pub url: String,
    pub category: String,
    pub languages: Vec<String>,
    pub free: bool,
    pub notes: Option<String>,
    pub upvotes: i32,
    pub downvotes: i32,
    pub times_clicked: i32,
    pub created_at: DateTime<Utc>,
}

impl Resource {
    /// Find resource by ID
    pub async fn find_by_id(id: ResourceId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check that a resource exists, inside the caller's transaction
    pub async fn exists(id: ResourceId, conn: &mut PgConnection) -> sqlx::Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM resources WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Create a new resource
    pub async fn create(
        name: &str,
        url: &str,
        category_id: CategoryId,
        free: bool,
        notes: Option<&str>,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO resources (name, url, category_id, free, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(url)
        .bind(category_id)
        .bind(free)
        .bind(notes)
        .fetch_one(pool)
        .await
    }

    /// Update resource name
    pub async fn set_name(id: ResourceId, name: &str, conn: &mut PgConnection) -> sqlx::Result<()> {
        sqlx::query("UPDATE resources SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Update resource url
    pub async fn set_url(id: ResourceId, url: &str, conn: &mut PgConnection) -> sqlx::Result<()> {
        sqlx::query("UPDATE resources SET url = $2 WHERE id = $1")
            .bind(id)
            .bind(url)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Update the free flag
    pub async fn set_free(id: ResourceId, free: bool, conn: &mut PgConnection) -> sqlx::Result<()> {
        sqlx::query("UPDATE resources SET free = $2 WHERE id = $1")
            .bind(id)
            .bind(free)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Update notes; `None` clears the column
    pub async fn set_notes(
        id: ResourceId,
        notes: Option<&str>,
        conn: &mut PgConnection,
    ) -> sqlx::Result<()> {
        sqlx::query("UPDATE resources SET notes = $2 WHERE id = $1")
            .bind(id)
            .bind(notes)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Move the resource to another category
    pub async fn set_category(
        id: ResourceId,
        category_id: CategoryId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<()> {
        sqlx::query("UPDATE resources SET category_id = $2 WHERE id = $1")
            .bind(id)
            .bind(category_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Adjust one of the vote counters by a delta (+1 / -1)
    pub async fn bump_vote_counter(
        id: ResourceId,
        direction: VoteDirection,
        delta: i32,
        conn: &mut PgConnection,
    ) -> sqlx::Result<()> {
        let query = match direction {
            VoteDirection::Upvote => "UPDATE resources SET upvotes = upvotes + $2 WHERE id = $1",
            VoteDirection::Downvote => {
                "UPDATE resources SET downvotes = downvotes + $2 WHERE id = $1"
            }
        };
        sqlx::query(query)
            .bind(id)
            .bind(delta)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Increment the click counter. Returns false when the resource is gone.
    pub async fn increment_clicks(id: ResourceId, pool: &PgPool) -> sqlx::Result<bool> {
        let result =
            sqlx::query("UPDATE resources SET times_clicked = times_clicked + 1 WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assemble the outbound representation from the row plus its resolved
    /// relationships.
    pub fn representation(&self, languages: Vec<String>, category: String) -> ResourceRepr {
        ResourceRepr {
            id: self.id,
            name: self.name.clone(),
            url: self.url.clone(),
            category,
            languages,
            free: self.free,
            notes: self.notes.clone(),
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            times_clicked: self.times_clicked,
            created_at: self.created_at,
        }
    }
}
