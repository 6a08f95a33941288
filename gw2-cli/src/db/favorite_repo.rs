use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;

use gw2_core::Favorite;

/// SQLite-backed favorites, keyed by (user_id, item_id).
pub struct FavoriteRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    user_id: String,
    item_id: i32,
    created_at: String,
}

impl FavoriteRow {
    fn into_favorite(self) -> Result<Favorite, sqlx::Error> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Favorite {
            user_id: self.user_id,
            item_id: self.item_id,
            created_at,
        })
    }
}

// Timestamps are stored RFC 3339 with fixed microsecond precision so the
// text column sorts chronologically.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl FavoriteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Adds a favorite; adding an already-favorited item keeps the
    /// original row and timestamp.
    pub async fn add(&self, user_id: &str, item_id: i32) -> Result<Favorite, sqlx::Error> {
        let favorite = Favorite::new(user_id, item_id);

        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, item_id, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT (user_id, item_id) DO NOTHING
            "#,
        )
        .bind(&favorite.user_id)
        .bind(favorite.item_id)
        .bind(format_timestamp(favorite.created_at))
        .execute(&self.pool)
        .await?;

        self.get(user_id, item_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn get(
        &self,
        user_id: &str,
        item_id: i32,
    ) -> Result<Option<Favorite>, sqlx::Error> {
        let row: Option<FavoriteRow> =
            sqlx::query_as("SELECT * FROM favorites WHERE user_id = ? AND item_id = ?")
                .bind(user_id)
                .bind(item_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(FavoriteRow::into_favorite).transpose()
    }

    pub async fn is_favorite(&self, user_id: &str, item_id: i32) -> Result<bool, sqlx::Error> {
        Ok(self.get(user_id, item_id).await?.is_some())
    }

    /// Removes a favorite; returns whether a row was deleted.
    pub async fn remove(&self, user_id: &str, item_id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND item_id = ?")
            .bind(user_id)
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Flips the favorite state; returns whether the item is now favorited.
    pub async fn toggle(&self, user_id: &str, item_id: i32) -> Result<bool, sqlx::Error> {
        if self.is_favorite(user_id, item_id).await? {
            self.remove(user_id, item_id).await?;
            Ok(false)
        } else {
            self.add(user_id, item_id).await?;
            Ok(true)
        }
    }

    /// Lists a user's favorites in insertion order.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Favorite>, sqlx::Error> {
        let rows: Vec<FavoriteRow> = sqlx::query_as(
            "SELECT * FROM favorites WHERE user_id = ? ORDER BY created_at, rowid",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(FavoriteRow::into_favorite).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use tempfile::TempDir;

    struct TestContext {
        repo: FavoriteRepository,
        _temp_dir: TempDir, // Keep alive for duration of test
    }

    async fn setup_repo() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = init_db(&db_path).await.unwrap();
        TestContext {
            repo: FavoriteRepository::new(pool),
            _temp_dir: temp_dir,
        }
    }

    #[tokio::test]
    async fn test_add_and_get_favorite() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;

        let added = repo.add("user-1", 30689).await.unwrap();
        assert_eq!(added.item_id, 30689);

        let fetched = repo.get("user-1", 30689).await.unwrap().unwrap();
        assert_eq!(fetched.user_id, "user-1");
        assert_eq!(fetched.item_id, 30689);
        assert!(repo.is_favorite("user-1", 30689).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;

        let first = repo.add("user-1", 7).await.unwrap();
        let second = repo.add("user-1", 7).await.unwrap();

        // The original timestamp survives a duplicate add
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(repo.list("user-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_favorite() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;

        repo.add("user-1", 7).await.unwrap();
        assert!(repo.remove("user-1", 7).await.unwrap());
        assert!(!repo.is_favorite("user-1", 7).await.unwrap());

        // Removing again reports nothing deleted
        assert!(!repo.remove("user-1", 7).await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_flips_state() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;

        assert!(repo.toggle("user-1", 12).await.unwrap());
        assert!(repo.is_favorite("user-1", 12).await.unwrap());

        assert!(!repo.toggle("user-1", 12).await.unwrap());
        assert!(!repo.is_favorite("user-1", 12).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;

        repo.add("user-1", 30).await.unwrap();
        repo.add("user-1", 10).await.unwrap();
        repo.add("user-1", 20).await.unwrap();

        let favorites = repo.list("user-1").await.unwrap();
        let ids: Vec<i32> = favorites.iter().map(|f| f.item_id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn test_favorites_are_scoped_per_user() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;

        repo.add("user-1", 7).await.unwrap();
        repo.add("user-2", 8).await.unwrap();

        let user1 = repo.list("user-1").await.unwrap();
        assert_eq!(user1.len(), 1);
        assert_eq!(user1[0].item_id, 7);
        assert!(!repo.is_favorite("user-2", 7).await.unwrap());
    }
}
