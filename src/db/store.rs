// SPDX-License-Identifier: MIT

//! SQLite-backed user store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (identity, plan tier, credits)
//! - Saved items (opportunity snapshots)
//! - Collections (named board sets)
//!
//! The store owns all durable state in the system. The admin allow-list is
//! injected at construction so plan decisions stay testable without touching
//! the process environment.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use crate::error::AppError;
use crate::models::{Collection, NewUser, PlanType, SavedItem, User};
use crate::time_utils::now_rfc3339;

/// SQLite user store.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
    admin_emails: Vec<String>,
}

impl UserStore {
    /// Open (or create) the store at `path` and ensure the schema exists.
    pub async fn connect(path: &str, admin_emails: Vec<String>) -> Result<Self, AppError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::Database(format!("Failed to create {parent:?}: {e}")))?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool, admin_emails };
        store.init_schema().await?;

        tracing::info!(path, "Connected to user store");
        Ok(store)
    }

    /// In-memory store for tests.
    pub async fn connect_in_memory(admin_emails: Vec<String>) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .create_if_missing(true);

        // In-memory databases exist per connection; a single connection
        // keeps every query on the same database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool, admin_emails };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL DEFAULT '',
                image TEXT,
                provider TEXT NOT NULL DEFAULT 'google',
                plan_type TEXT NOT NULL DEFAULT 'free',
                subscription_status TEXT NOT NULL DEFAULT 'active',
                credits_total INTEGER NOT NULL DEFAULT 10,
                credits_used INTEGER NOT NULL DEFAULT 0,
                next_billing_date TEXT,
                created_at TEXT NOT NULL,
                last_login TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS saved_items (
                user_id TEXT NOT NULL,
                opportunity_id INTEGER NOT NULL,
                data TEXT NOT NULL,
                saved_at TEXT NOT NULL,
                PRIMARY KEY (user_id, opportunity_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS collections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                boards TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, name)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn is_admin(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|e| e == email)
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Look up a user by email. Absence is not an error.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(user_from_row).transpose()
    }

    /// Look up a user by id.
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(user_from_row).transpose()
    }

    /// Create a user from provider-supplied profile fields.
    ///
    /// The only place initial plan is decided: admin-listed emails start on
    /// the pro plan, everyone else on free. Fails on a duplicate email
    /// (unique constraint).
    pub async fn create_user(&self, new: NewUser) -> Result<User, AppError> {
        let plan = if self.is_admin(&new.email) {
            PlanType::Pro
        } else {
            PlanType::Free
        };
        let now = now_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, image, provider, plan_type, created_at, last_login)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.id)
        .bind(&new.email)
        .bind(&new.name)
        .bind(&new.image)
        .bind(&new.provider)
        .bind(plan.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::info!(email = %new.email, plan = plan.as_str(), "User created");

        self.get_user_by_email(&new.email)
            .await?
            .ok_or_else(|| AppError::Database("User missing after insert".to_string()))
    }

    /// Refresh the login timestamp. Admin-listed emails are also forced back
    /// to the pro plan on every login (a standing override, not a one-time
    /// grant).
    pub async fn update_user_login(&self, email: &str) -> Result<(), AppError> {
        let now = now_rfc3339();

        if self.is_admin(email) {
            sqlx::query("UPDATE users SET last_login = ?, plan_type = 'pro' WHERE email = ?")
                .bind(&now)
                .bind(email)
                .execute(&self.pool)
                .await?;
        } else {
            sqlx::query("UPDATE users SET last_login = ? WHERE email = ?")
                .bind(&now)
                .bind(email)
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }

    /// Unconditional plan overwrite, used after payment verification.
    pub async fn update_user_plan(&self, user_id: &str, plan: PlanType) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET plan_type = ? WHERE id = ?")
            .bind(plan.as_str())
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(user_id, plan = plan.as_str(), "User plan updated");
        Ok(())
    }

    // ─── Saved Items ─────────────────────────────────────────────

    /// Save (or re-save) an opportunity snapshot. Last write wins.
    pub async fn save_item(
        &self,
        user_id: &str,
        opportunity_id: i64,
        data: &serde_json::Value,
    ) -> Result<(), AppError> {
        let snapshot = serde_json::to_string(data)
            .map_err(|e| AppError::Database(format!("Failed to serialize snapshot: {e}")))?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO saved_items (user_id, opportunity_id, data, saved_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(opportunity_id)
        .bind(snapshot)
        .bind(now_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a saved item. A no-op when the pair does not exist.
    pub async fn unsave_item(&self, user_id: &str, opportunity_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM saved_items WHERE user_id = ? AND opportunity_id = ?")
            .bind(user_id)
            .bind(opportunity_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// All saved items for a user, most recently saved first.
    pub async fn get_saved_items(&self, user_id: &str) -> Result<Vec<SavedItem>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, opportunity_id, data, saved_at
            FROM saved_items
            WHERE user_id = ?
            ORDER BY saved_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let raw: String = row.get("data");
                let data = serde_json::from_str(&raw)
                    .map_err(|e| AppError::Database(format!("Corrupt saved snapshot: {e}")))?;
                Ok(SavedItem {
                    user_id: row.get("user_id"),
                    opportunity_id: row.get("opportunity_id"),
                    data,
                    saved_at: row.get("saved_at"),
                })
            })
            .collect()
    }

    /// Whether a `(user, opportunity)` pair is already saved. Re-saving an
    /// existing item replaces the snapshot and is never quota-gated.
    pub async fn saved_item_exists(
        &self,
        user_id: &str,
        opportunity_id: i64,
    ) -> Result<bool, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM saved_items WHERE user_id = ? AND opportunity_id = ?",
        )
        .bind(user_id)
        .bind(opportunity_id)
        .fetch_one(&self.pool)
        .await?;

        let n: i64 = row.get("n");
        Ok(n > 0)
    }

    /// Number of items a user has saved, for entitlement checks.
    pub async fn count_saved_items(&self, user_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM saved_items WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("n"))
    }

    // ─── Collections ─────────────────────────────────────────────

    /// Create (or replace) a named collection of boards.
    pub async fn create_collection(
        &self,
        user_id: &str,
        name: &str,
        boards: &[String],
    ) -> Result<(), AppError> {
        let boards_json = serde_json::to_string(boards)
            .map_err(|e| AppError::Database(format!("Failed to serialize boards: {e}")))?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO collections (user_id, name, boards, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(boards_json)
        .bind(now_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All collections for a user, most recently created first.
    pub async fn get_collections(&self, user_id: &str) -> Result<Vec<Collection>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, boards, created_at
            FROM collections
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let raw: String = row.get("boards");
                let boards = serde_json::from_str(&raw)
                    .map_err(|e| AppError::Database(format!("Corrupt board list: {e}")))?;
                Ok(Collection {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    name: row.get("name"),
                    boards,
                    created_at: row.get("created_at"),
                })
            })
            .collect()
    }

    /// Delete a collection by name. A no-op when absent.
    pub async fn delete_collection(&self, user_id: &str, name: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM collections WHERE user_id = ? AND name = ?")
            .bind(user_id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Number of collections a user owns, for entitlement checks.
    pub async fn count_collections(&self, user_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM collections WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("n"))
    }
}

fn user_from_row(row: sqlx::sqlite::SqliteRow) -> Result<User, AppError> {
    let plan: String = row.get("plan_type");
    Ok(User {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        image: row.get("image"),
        provider: row.get("provider"),
        plan_type: PlanType::from_db(&plan),
        subscription_status: row.get("subscription_status"),
        credits_total: row.get("credits_total"),
        credits_used: row.get("credits_used"),
        next_billing_date: row.get("next_billing_date"),
        created_at: row.get("created_at"),
        last_login: row.get("last_login"),
    })
}
