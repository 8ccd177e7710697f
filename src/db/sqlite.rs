use crate::db::models::{AdminCredential, Banner, Board, NewBanner, NewPost, Post};
use crate::db::password::{hash_password, verify_password};
use crate::db::schema::SQLITE_INIT;
use crate::db::seed::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, SeedReport, default_banners, default_posts,
};
use crate::error::HomepageError;
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::{info, warn};

pub type SqlitePool = Pool<Sqlite>;

/// Open the one pool every store operation shares. In-memory databases are
/// per connection, so they get a single connection.
pub async fn connect(database_url: &str) -> Result<SqlitePool, HomepageError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let mut pool_opts = SqlitePoolOptions::new();
    if database_url.contains(":memory:") || database_url.contains("mode=memory") {
        pool_opts = pool_opts.max_connections(1);
    }
    Ok(pool_opts.connect_with(connect_opts).await?)
}

/// Timestamp text written to `posts.created_at` when the caller gives none.
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

#[derive(Clone)]
pub struct ContentStore {
    pool: SqlitePool,
}

impl ContentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the tables and seed every empty one. Safe to call repeatedly:
    /// existing rows are never touched.
    pub async fn init_schema(&self) -> Result<SeedReport, HomepageError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }

        let mut report = SeedReport::default();

        let admins: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users WHERE username = ?")
            .bind(DEFAULT_ADMIN_USERNAME)
            .fetch_one(&self.pool)
            .await?;
        if admins.0 == 0 {
            let hash = hash_password(DEFAULT_ADMIN_PASSWORD).await?;
            sqlx::query("INSERT INTO admin_users (username, password_hash) VALUES (?, ?)")
                .bind(DEFAULT_ADMIN_USERNAME)
                .bind(hash)
                .execute(&self.pool)
                .await?;
            warn!(
                username = DEFAULT_ADMIN_USERNAME,
                "seeded admin account with the default password; change it after first login"
            );
            report.admin_created = true;
        }

        let banners: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM banners")
            .fetch_one(&self.pool)
            .await?;
        if banners.0 == 0 {
            let seeds = default_banners();
            let mut tx = self.pool.begin().await?;
            for b in &seeds {
                Self::insert_banner_query(b).execute(&mut *tx).await?;
            }
            tx.commit().await?;
            report.banners_inserted = seeds.len();
        }

        let posts: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        if posts.0 == 0 {
            let seeds = default_posts();
            let created_at = now_timestamp();
            let mut tx = self.pool.begin().await?;
            for p in &seeds {
                Self::insert_post_query(p, &created_at)
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;
            report.posts_inserted = seeds.len();
        }

        info!(
            admin_created = report.admin_created,
            banners = report.banners_inserted,
            posts = report.posts_inserted,
            "content store initialized"
        );
        Ok(report)
    }

    /// Banners live on `as_of`, ordered by (order_index, id).
    pub async fn list_banners(&self, as_of: NaiveDate) -> Result<Vec<Banner>, HomepageError> {
        let rows = sqlx::query(
            r#"SELECT id, title, image_url, link_url, start_date, end_date, order_index
               FROM banners
               WHERE start_date <= ?
                 AND (end_date IS NULL OR end_date >= ?)
               ORDER BY order_index, id"#,
        )
        .bind(as_of)
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_banner).collect()
    }

    pub async fn list_all_banners(&self) -> Result<Vec<Banner>, HomepageError> {
        let rows = sqlx::query(
            r#"SELECT id, title, image_url, link_url, start_date, end_date, order_index
               FROM banners ORDER BY order_index, id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_banner).collect()
    }

    /// Append a banner. Returns the row id.
    pub async fn insert_banner(&self, banner: &NewBanner) -> Result<i64, HomepageError> {
        let res = Self::insert_banner_query(banner)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    /// Remove a banner. Missing ids are not an error.
    pub async fn delete_banner(&self, id: i64) -> Result<bool, HomepageError> {
        let res = sqlx::query("DELETE FROM banners WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Newest first: created_at descending, id descending on ties.
    pub async fn list_posts(&self, board: Board, limit: u32) -> Result<Vec<Post>, HomepageError> {
        let rows = sqlx::query(
            r#"SELECT id, board, title, content, image_url, link_url,
               start_date, end_date, created_at
               FROM posts
               WHERE board = ?
               ORDER BY created_at DESC, id DESC
               LIMIT ?"#,
        )
        .bind(board.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_post).collect()
    }

    pub async fn count_posts(&self, board: Board) -> Result<i64, HomepageError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE board = ?")
            .bind(board.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    /// Whether a post with this title and link already exists on the board.
    pub async fn post_exists(
        &self,
        board: Board,
        title: &str,
        link_url: Option<&str>,
    ) -> Result<bool, HomepageError> {
        let rec: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM posts WHERE board = ? AND title = ? AND link_url IS ?",
        )
        .bind(board.as_str())
        .bind(title)
        .bind(link_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(rec.0 > 0)
    }

    /// Append a post. `created_at` defaults to now. Returns the row id.
    pub async fn insert_post(&self, post: &NewPost) -> Result<i64, HomepageError> {
        let created_at = post.created_at.clone().unwrap_or_else(now_timestamp);
        let res = Self::insert_post_query(post, &created_at)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    /// Batch insert in one transaction. Returns ids in the same order.
    pub async fn insert_posts(&self, posts: &[NewPost]) -> Result<Vec<i64>, HomepageError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(posts.len());
        for post in posts {
            let created_at = post.created_at.clone().unwrap_or_else(now_timestamp);
            let res = Self::insert_post_query(post, &created_at)
                .execute(&mut *tx)
                .await?;
            ids.push(res.last_insert_rowid());
        }
        tx.commit().await?;
        Ok(ids)
    }

    /// Check a password against the stored hash. Unknown users and hashes that
    /// fail to verify both yield `false`; only storage failures are errors.
    pub async fn verify_admin_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, HomepageError> {
        let Some(cred) = self.admin_credential(username).await? else {
            return Ok(false);
        };
        match verify_password(&cred.password_hash, password).await {
            Ok(ok) => Ok(ok),
            Err(e) => {
                warn!(username, error = %e, "password verification failed");
                Ok(false)
            }
        }
    }

    /// Overwrite the hash for `username`. The caller must already have
    /// verified the current password.
    pub async fn change_admin_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> Result<(), HomepageError> {
        let hash = hash_password(new_password).await?;
        sqlx::query("UPDATE admin_users SET password_hash = ? WHERE username = ?")
            .bind(hash)
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn admin_credential(
        &self,
        username: &str,
    ) -> Result<Option<AdminCredential>, HomepageError> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT username, password_hash FROM admin_users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(username, password_hash)| AdminCredential {
            username,
            password_hash,
        }))
    }

    fn insert_banner_query(
        b: &NewBanner,
    ) -> sqlx::query::Query<'_, Sqlite, sqlx::sqlite::SqliteArguments<'_>> {
        sqlx::query(
            r#"INSERT INTO banners (title, image_url, link_url, start_date, end_date, order_index)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(b.title.as_str())
        .bind(b.image_url.as_str())
        .bind(b.link_url.as_str())
        .bind(b.start_date)
        .bind(b.end_date)
        .bind(b.order_index)
    }

    fn insert_post_query<'q>(
        p: &'q NewPost,
        created_at: &'q str,
    ) -> sqlx::query::Query<'q, Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
        sqlx::query(
            r#"INSERT INTO posts (board, title, content, image_url, link_url,
                                  start_date, end_date, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(p.board.as_str())
        .bind(p.title.as_str())
        .bind(p.content.as_str())
        .bind(p.image_url.as_deref())
        .bind(p.link_url.as_deref())
        .bind(p.start_date)
        .bind(p.end_date)
        .bind(created_at)
    }

    fn row_to_banner(row: SqliteRow) -> Result<Banner, HomepageError> {
        Ok(Banner {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            image_url: row.try_get("image_url")?,
            link_url: row.try_get("link_url")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            order_index: row.try_get("order_index")?,
        })
    }

    fn row_to_post(row: SqliteRow) -> Result<Post, HomepageError> {
        let board_str: String = row.try_get("board")?;
        let board = Board::from_str(&board_str).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Post {
            id: row.try_get("id")?,
            board,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            image_url: row.try_get("image_url")?,
            link_url: row.try_get("link_url")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
