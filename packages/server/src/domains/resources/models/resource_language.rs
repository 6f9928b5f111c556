//! ResourceLanguage model - the resource/language join table

use sqlx::PgConnection;

use crate::common::{LanguageId, ResourceId};

/// Association between a resource and a language
pub struct ResourceLanguage;

impl ResourceLanguage {
    /// Language ids currently attached to a resource, inside the caller's
    /// transaction
    pub async fn language_ids(
        resource_id: ResourceId,
        conn: &mut PgConnection,
    ) -> sqlx::Result<Vec<LanguageId>> {
        sqlx::query_scalar::<_, LanguageId>(
            "SELECT language_id FROM resource_languages WHERE resource_id = $1",
        )
        .bind(resource_id)
        .fetch_all(&mut *conn)
        .await
    }

    /// Replace a resource's language set with exactly the given ids
    pub async fn replace(
        resource_id: ResourceId,
        language_ids: &[LanguageId],
        conn: &mut PgConnection,
    ) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM resource_languages WHERE resource_id = $1")
            .bind(resource_id)
            .execute(&mut *conn)
            .await?;

        for language_id in language_ids {
            sqlx::query(
                r#"
                INSERT INTO resource_languages (resource_id, language_id)
                VALUES ($1, $2)
                ON CONFLICT (resource_id, language_id) DO NOTHING
                "#,
            )
            .bind(resource_id)
            .bind(language_id)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
