use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::database::database::{AccountLinkStore, SubscriptionStore};
use crate::hypixel::client::HypixelClient;
use crate::hypixel::mojang::PlayerIdentity;
use crate::hypixel::stats::Slot;
use crate::render::background::resolve_background;
use crate::render::compositor::composite;
use crate::render::error::RenderResult;
use crate::render::layout::SHOP_LAYOUT;

const SHOP_CATEGORY: &str = "shop";
const DEFAULT_BACKGROUND: &str = "base";
const ITEMS_DIR: &str = "items";

/// Renders a player's quick-buy favourites on top of their background.
#[derive(Clone)]
pub struct ShopRenderer<S> {
    hypixel: HypixelClient,
    stores: S,
    asset_root: PathBuf,
}

impl<S> ShopRenderer<S>
where
    S: AccountLinkStore + SubscriptionStore + Clone + Send + 'static,
{
    pub fn new(hypixel: HypixelClient, stores: S, asset_root: PathBuf) -> Self {
        ShopRenderer { hypixel, stores, asset_root }
    }

    #[tracing::instrument(skip(self, identity), fields(player = %identity.name))]
    pub async fn render(&self, identity: &PlayerIdentity) -> RenderResult<Cursor<Vec<u8>>> {
        let stats = self.hypixel.fetch_stats(&identity.uuid).await?;
        let favourites = stats.favourites().to_vec();
        tracing::debug!("{} has {} favourites", stats.display_name().unwrap_or(identity.name.as_str()), favourites.len());

        let stores = self.stores.clone();
        let asset_root = self.asset_root.clone();
        let uuid = identity.uuid.clone();

        tokio::task::spawn_blocking(move || render_favourites(&stores, &asset_root, Some(uuid.as_str()), &favourites)).await?
    }
}

pub fn render_favourites<S>(stores: &S, asset_root: &Path, uuid: Option<&str>, favourites: &[Slot]) -> RenderResult<Cursor<Vec<u8>>>
where
    S: AccountLinkStore + SubscriptionStore,
{
    let shop_root = asset_root.join(SHOP_CATEGORY);
    let background = resolve_background(stores, stores, &shop_root, uuid, DEFAULT_BACKGROUND);
    tracing::debug!(custom = background.is_custom(), "Using background {}", background.path().display());

    composite(background.path(), favourites, &SHOP_LAYOUT, &shop_root.join(ITEMS_DIR))
}
