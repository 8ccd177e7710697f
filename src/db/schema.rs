//! SQL DDL for initializing the content store.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `banners`: rolling banners, dates stored as `YYYY-MM-DD` text so range
///   comparisons are lexical
/// - `posts`: board content; `created_at` is free timestamp text
/// - `admin_users`: `username` UNIQUE, argon2 encoded `password_hash`
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS banners (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    image_url TEXT NOT NULL DEFAULT '',
    link_url TEXT NOT NULL DEFAULT '',
    start_date TEXT NOT NULL,
    end_date TEXT NULL,
    order_index INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    board TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    image_url TEXT NULL,
    link_url TEXT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_posts_board_created ON posts(board, created_at DESC, id DESC);

CREATE TABLE IF NOT EXISTS admin_users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);
"#;
