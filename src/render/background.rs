use std::path::{Path, PathBuf};

use crate::database::database::{AccountLinkStore, SubscriptionStore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Background {
    Default(PathBuf),
    Custom(PathBuf),
}

impl Background {
    pub fn path(&self) -> &Path {
        match self {
            Background::Default(path) | Background::Custom(path) => path,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Background::Custom(_))
    }
}

/// Picks the base image for a render.
///
/// Entitled subscribers get `{asset_root}/custom/{discord_id}.png` when that file exists. Every other
/// case, including store failures, falls back to `{asset_root}/{default_name}.png`.
pub fn resolve_background<L, S>(links: &L, subscriptions: &S, asset_root: &Path, uuid: Option<&str>, default_name: &str) -> Background
where
    L: AccountLinkStore + ?Sized,
    S: SubscriptionStore + ?Sized,
{
    let default = Background::Default(asset_root.join(format!("{default_name}.png")));

    let Some(uuid) = uuid else {
        return default;
    };

    let link = match links.find_link(uuid) {
        Ok(Some(link)) => link,
        Ok(None) => return default,
        Err(e) => {
            tracing::warn!("Failed to look up account link for {}: {}", uuid, e);
            return default;
        }
    };

    match subscriptions.find_subscription(link.discord_id) {
        Ok(Some(subscription)) if subscription.is_entitled() => {}
        Ok(_) => return default,
        Err(e) => {
            tracing::warn!("Failed to look up subscription for {}: {}", link.discord_id, e);
            return default;
        }
    }

    let custom = asset_root.join("custom").join(format!("{}.png", link.discord_id));
    if custom.is_file() {
        Background::Custom(custom)
    } else {
        tracing::debug!("{} is entitled but has no custom background at {}", link.discord_id, custom.display());
        default
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::database::database::{Database, LinkedAccount, Subscription};
    use crate::database::error::{StoreError, StoreResult};

    #[derive(Default)]
    struct MemoryStore {
        links: HashMap<String, u64>,
        tiers: HashMap<u64, String>,
    }

    impl AccountLinkStore for MemoryStore {
        fn find_link(&self, uuid: &str) -> StoreResult<Option<LinkedAccount>> {
            Ok(self.links.get(uuid).map(|discord_id| LinkedAccount {
                uuid: uuid.to_string(),
                discord_id: *discord_id,
                linked_at: String::new(),
            }))
        }
    }

    impl SubscriptionStore for MemoryStore {
        fn find_subscription(&self, discord_id: u64) -> StoreResult<Option<Subscription>> {
            Ok(self.tiers.get(&discord_id).map(|tier| Subscription { discord_id, tier: tier.clone() }))
        }
    }

    struct BrokenStore;

    impl AccountLinkStore for BrokenStore {
        fn find_link(&self, _uuid: &str) -> StoreResult<Option<LinkedAccount>> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
    }

    impl SubscriptionStore for BrokenStore {
        fn find_subscription(&self, _discord_id: u64) -> StoreResult<Option<Subscription>> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
    }

    fn asset_root_with_custom(discord_id: u64) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("custom")).unwrap();
        std::fs::write(dir.path().join("custom").join(format!("{discord_id}.png")), b"png").unwrap();
        dir
    }

    #[test]
    fn unlinked_account_gets_default() {
        let dir = asset_root_with_custom(7);
        let mut store = MemoryStore::default();
        store.tiers.insert(7, "custom_background".into());

        let background = resolve_background(&store, &store, dir.path(), Some("abc123"), "base");
        assert_eq!(background, Background::Default(dir.path().join("base.png")));

        let background = resolve_background(&store, &store, dir.path(), None, "base");
        assert_eq!(background, Background::Default(dir.path().join("base.png")));
    }

    #[test]
    fn linked_without_entitlement_gets_default() {
        let dir = asset_root_with_custom(7);
        let mut store = MemoryStore::default();
        store.links.insert("abc123".into(), 7);

        assert!(!resolve_background(&store, &store, dir.path(), Some("abc123"), "base").is_custom());

        store.tiers.insert(7, "supporter".into());
        assert!(!resolve_background(&store, &store, dir.path(), Some("abc123"), "base").is_custom());
    }

    #[test]
    fn entitled_with_file_gets_custom() {
        let dir = asset_root_with_custom(7);
        let mut store = MemoryStore::default();
        store.links.insert("abc123".into(), 7);
        store.tiers.insert(7, "supporter,custom_background".into());

        let background = resolve_background(&store, &store, dir.path(), Some("abc123"), "base");
        assert_eq!(background, Background::Custom(dir.path().join("custom").join("7.png")));
    }

    #[test]
    fn entitlement_alone_is_not_enough() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MemoryStore::default();
        store.links.insert("abc123".into(), 7);
        store.tiers.insert(7, "custom_background".into());

        let background = resolve_background(&store, &store, dir.path(), Some("abc123"), "base");
        assert_eq!(background.path(), dir.path().join("base.png"));
    }

    #[test]
    fn store_failures_fall_back_to_default() {
        let dir = asset_root_with_custom(7);

        let background = resolve_background(&BrokenStore, &BrokenStore, dir.path(), Some("abc123"), "base");
        assert_eq!(background, Background::Default(dir.path().join("base.png")));

        let mut links = MemoryStore::default();
        links.links.insert("abc123".into(), 7);
        let background = resolve_background(&links, &BrokenStore, dir.path(), Some("abc123"), "base");
        assert!(!background.is_custom());
    }

    #[test]
    fn works_against_sqlite() {
        let dir = asset_root_with_custom(42);
        let db = Database::new(&dir.path().join("bot.db")).unwrap();
        let mut tx = db.begin_transaction().unwrap();
        tx.save_link("abc123", 42).unwrap();

        assert!(!resolve_background(&db, &db, dir.path(), Some("abc123"), "base").is_custom());

        tx.save_subscription(42, "custom_background").unwrap();
        assert!(resolve_background(&db, &db, dir.path(), Some("abc123"), "base").is_custom());
    }
}
