use std::fmt;
use std::path::Path;

use chrono::Utc;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};

use crate::database::error::StoreResult;

/// Tier tag that unlocks custom backgrounds.
pub const ENTITLEMENT_MARKER: &str = "custom_background";

#[derive(Clone, Debug, PartialEq)]
pub struct LinkedAccount {
    pub uuid: String,
    pub discord_id: u64,
    pub linked_at: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subscription {
    pub discord_id: u64,
    pub tier: String,
}

impl Subscription {
    /// The tier is a comma separated set of tags, e.g. `supporter,custom_background`.
    pub fn is_entitled(&self) -> bool {
        self.tier.split(',').any(|tag| tag.trim() == ENTITLEMENT_MARKER)
    }
}

/// Maps a game account to the discord user that linked it.
pub trait AccountLinkStore {
    fn find_link(&self, uuid: &str) -> StoreResult<Option<LinkedAccount>>;
}

/// Maps a discord user to their subscription tier.
pub trait SubscriptionStore {
    fn find_subscription(&self, discord_id: u64) -> StoreResult<Option<Subscription>>;
}

pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database").field("pool_state", &self.pool.state()).finish()
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Database { pool: self.pool.clone() }
    }
}

impl Database {
    pub fn new(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::new(manager)?;

        let conn = pool.get()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS linked_accounts (
            uuid TEXT PRIMARY KEY,
            discord_id INTEGER NOT NULL,
            linked_at TEXT NOT NULL
        )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS subscriptions (
            discord_id INTEGER PRIMARY KEY,
            tier TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
            [],
        )?;

        tracing::info!("Opened database at {}", path.display());

        Ok(Database { pool })
    }

    pub fn begin_transaction(&self) -> StoreResult<DatabaseTransaction> {
        let conn = self.pool.get()?;
        Ok(DatabaseTransaction { conn })
    }
}

impl AccountLinkStore for Database {
    fn find_link(&self, uuid: &str) -> StoreResult<Option<LinkedAccount>> {
        self.begin_transaction()?.find_link(uuid)
    }
}

impl SubscriptionStore for Database {
    fn find_subscription(&self, discord_id: u64) -> StoreResult<Option<Subscription>> {
        self.begin_transaction()?.find_subscription(discord_id)
    }
}

pub struct DatabaseTransaction {
    conn: PooledConnection<SqliteConnectionManager>,
}

impl DatabaseTransaction {
    pub fn find_link(&self, uuid: &str) -> StoreResult<Option<LinkedAccount>> {
        let link = self
            .conn
            .query_row("SELECT uuid, discord_id, linked_at FROM linked_accounts WHERE uuid = ?1", params![uuid], |row| {
                Ok(LinkedAccount {
                    uuid: row.get(0)?,
                    discord_id: row.get::<_, i64>(1)? as u64,
                    linked_at: row.get(2)?,
                })
            })
            .optional()?;
        Ok(link)
    }

    pub fn find_subscription(&self, discord_id: u64) -> StoreResult<Option<Subscription>> {
        let subscription = self
            .conn
            .query_row("SELECT discord_id, tier FROM subscriptions WHERE discord_id = ?1", params![discord_id as i64], |row| {
                Ok(Subscription {
                    discord_id: row.get::<_, i64>(0)? as u64,
                    tier: row.get(1)?,
                })
            })
            .optional()?;
        Ok(subscription)
    }

    /// Links `uuid` to `discord_id`, replacing any previous owner of the game account.
    pub fn save_link(&mut self, uuid: &str, discord_id: u64) -> StoreResult<LinkedAccount> {
        let linked_at = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO linked_accounts (uuid, discord_id, linked_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(uuid) DO UPDATE SET discord_id = excluded.discord_id, linked_at = excluded.linked_at",
            params![uuid, discord_id as i64, linked_at],
        )?;

        Ok(LinkedAccount {
            uuid: uuid.to_string(),
            discord_id,
            linked_at,
        })
    }

    pub fn save_subscription(&mut self, discord_id: u64, tier: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO subscriptions (discord_id, tier, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(discord_id) DO UPDATE SET tier = excluded.tier, updated_at = excluded.updated_at",
            params![discord_id as i64, tier, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("db").join("test.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn missing_rows_are_none() {
        let (_dir, db) = open_temp();

        assert_eq!(db.find_link("abc123").unwrap(), None);
        assert_eq!(db.find_subscription(1).unwrap(), None);
    }

    #[test]
    fn saved_link_is_found_and_replaced() {
        let (_dir, db) = open_temp();
        let mut tx = db.begin_transaction().unwrap();

        tx.save_link("abc123", 10).unwrap();
        assert_eq!(db.find_link("abc123").unwrap().unwrap().discord_id, 10);

        tx.save_link("abc123", 20).unwrap();
        assert_eq!(db.find_link("abc123").unwrap().unwrap().discord_id, 20);
    }

    #[test]
    fn large_discord_ids_survive_the_round_trip() {
        let (_dir, db) = open_temp();
        let id = 1_234_567_890_123_456_789;

        db.begin_transaction().unwrap().save_subscription(id, "supporter").unwrap();

        let subscription = db.find_subscription(id).unwrap().unwrap();
        assert_eq!(subscription.discord_id, id);
        assert_eq!(subscription.tier, "supporter");
    }

    #[test]
    fn entitlement_is_a_tag_not_a_substring() {
        let subscription = |tier: &str| Subscription { discord_id: 1, tier: tier.to_string() };

        assert!(subscription("custom_background").is_entitled());
        assert!(subscription("supporter, custom_background").is_entitled());
        assert!(!subscription("supporter").is_entitled());
        assert!(!subscription("no_custom_background").is_entitled());
        assert!(!subscription("").is_entitled());
    }
}
