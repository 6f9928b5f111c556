//! VoteInformation model - the per-(voter, resource) vote ledger
//!
//! One row per voter per resource, created on the first vote and never
//! deleted. `current_direction` NULL means the voter toggled back to none.
//! The resource counters are maintained by the ledger transitions; the
//! invariant is that each counter equals the number of ledger rows currently
//! pointing in that direction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use std::fmt;
use std::str::FromStr;

use crate::common::ResourceId;

/// A vote direction as supplied on the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Upvote,
    Downvote,
}

impl VoteDirection {
    pub fn opposite(self) -> Self {
        match self {
            VoteDirection::Upvote => VoteDirection::Downvote,
            VoteDirection::Downvote => VoteDirection::Upvote,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VoteDirection::Upvote => "upvote",
            VoteDirection::Downvote => "downvote",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteDirection {
    type Err = ();

    /// Only the two exact route spellings parse; anything else is rejected
    /// before it can reach the ledger.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(VoteDirection::Upvote),
            "downvote" => Ok(VoteDirection::Downvote),
            _ => Err(()),
        }
    }
}

/// Ledger row tracking one voter's state on one resource
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VoteInformation {
    pub voter_apikey: String,
    pub resource_id: ResourceId,
    pub current_direction: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl VoteInformation {
    /// The active direction, if any
    pub fn direction(&self) -> Option<VoteDirection> {
        self.current_direction
            .as_deref()
            .and_then(|d| d.parse().ok())
    }

    /// Find the ledger row for a voter/resource pair, locking it for the
    /// rest of the transaction so concurrent votes by the same voter
    /// serialize instead of double-counting.
    pub async fn find_for_update(
        voter_apikey: &str,
        resource_id: ResourceId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM vote_information
            WHERE voter_apikey = $1 AND resource_id = $2
            FOR UPDATE
            "#,
        )
        .bind(voter_apikey)
        .bind(resource_id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Create the ledger row on a voter's first vote for a resource
    pub async fn create(
        voter_apikey: &str,
        resource_id: ResourceId,
        direction: VoteDirection,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO vote_information (voter_apikey, resource_id, current_direction)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(voter_apikey)
        .bind(resource_id)
        .bind(direction.as_str())
        .fetch_one(&mut *conn)
        .await
    }

    /// Set (or clear) the row's direction
    pub async fn set_direction(
        voter_apikey: &str,
        resource_id: ResourceId,
        direction: Option<VoteDirection>,
        conn: &mut PgConnection,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            UPDATE vote_information
            SET current_direction = $3
            WHERE voter_apikey = $1 AND resource_id = $2
            "#,
        )
        .bind(voter_apikey)
        .bind(resource_id)
        .bind(direction.map(VoteDirection::as_str))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Count ledger rows pointing in a direction for a resource
    pub async fn count_with_direction(
        resource_id: ResourceId,
        direction: VoteDirection,
        pool: &PgPool,
    ) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM vote_information
            WHERE resource_id = $1 AND current_direction = $2
            "#,
        )
        .bind(resource_id)
        .bind(direction.as_str())
        .fetch_one(pool)
        .await
    }

    /// Find a ledger row without locking (read paths and tests)
    pub async fn find(
        voter_apikey: &str,
        resource_id: ResourceId,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM vote_information WHERE voter_apikey = $1 AND resource_id = $2",
        )
        .bind(voter_apikey)
        .bind(resource_id)
        .fetch_optional(pool)
        .await
    }
}
