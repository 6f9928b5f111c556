use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::KeyId;

/// API credential. Votes are attributed to the key that cast them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Key {
    pub id: KeyId,
    pub apikey: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Key {
    /// Find a key by its apikey value
    pub async fn find_by_apikey(apikey: &str, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Key>("SELECT * FROM keys WHERE apikey = $1")
            .bind(apikey)
            .fetch_optional(pool)
            .await
    }

    /// Create a new key
    pub async fn create(apikey: &str, email: &str, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Key>(
            r#"
            INSERT INTO keys (apikey, email)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(apikey)
        .bind(email)
        .fetch_one(pool)
        .await
    }
}
