//! Database schema and migrations for corkboard.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Users table
    r#"
-- Users table for authentication and authorship
CREATE TABLE users (
    id          TEXT PRIMARY KEY,        -- login id chosen at signup
    username    TEXT NOT NULL,           -- display name
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: Posts table
    r#"
-- Posts table
CREATE TABLE posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now')),
    view_count  INTEGER NOT NULL DEFAULT 0,
    author_id   TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX idx_posts_author_id ON posts(author_id);
CREATE INDEX idx_posts_created_at ON posts(created_at);
"#,
    // v3: Comments table
    r#"
-- Comments table
CREATE TABLE comments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now')),
    author_id   TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    post_id     INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE
);

CREATE INDEX idx_comments_post_id ON comments(post_id);
CREATE INDEX idx_comments_author_id ON comments(author_id);
"#,
    // v4: Sessions table
    r#"
-- Sessions table, one row per active login
CREATE TABLE sessions (
    token       TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL,
    expires_at  TEXT NOT NULL
);

CREATE INDEX idx_sessions_user_id ON sessions(user_id);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_first_migration_contains_users_table() {
        let first = MIGRATIONS[0];
        assert!(first.contains("CREATE TABLE users"));
        assert!(first.contains("username"));
        assert!(first.contains("password"));
    }

    #[test]
    fn test_migrations_are_valid_sql() {
        for migration in MIGRATIONS {
            assert!(!migration.trim().is_empty());
            assert!(
                migration.contains("CREATE TABLE")
                    || migration.contains("ALTER TABLE")
                    || migration.contains("CREATE INDEX")
            );
        }
    }

    #[test]
    fn test_posts_migration_contains_posts_table() {
        let posts_migration = MIGRATIONS[1];
        assert!(posts_migration.contains("CREATE TABLE posts"));
        assert!(posts_migration.contains("view_count"));
        assert!(posts_migration.contains("updated_at"));
        assert!(posts_migration.contains("author_id"));
        assert!(posts_migration.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn test_comments_migration_contains_comments_table() {
        let comments_migration = MIGRATIONS[2];
        assert!(comments_migration.contains("CREATE TABLE comments"));
        assert!(comments_migration.contains("post_id"));
        assert!(comments_migration.contains("author_id"));
        assert!(comments_migration.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn test_sessions_migration_contains_sessions_table() {
        let sessions_migration = MIGRATIONS[3];
        assert!(sessions_migration.contains("CREATE TABLE sessions"));
        assert!(sessions_migration.contains("token"));
        assert!(sessions_migration.contains("expires_at"));
    }
}
