use poise::serenity_prelude as serenity;

use crate::database::database::Database;
use crate::hypixel::error::FetchError;
use crate::hypixel::mojang::{MojangClient, PlayerIdentity};
use crate::render::error::RenderError;
use crate::render::shop::ShopRenderer;

// User data, which is stored and accessible in all command invocations
pub struct Data {
    pub renderer: ShopRenderer<Database>,
    pub mojang: MojangClient,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Show a player's Bedwars quick-buy favourites.
#[poise::command(slash_command)]
pub async fn shop(ctx: Context<'_>, #[description = "Player name or UUID"] player: String) -> Result<(), Error> {
    ctx.defer().await?;

    let identity = match ctx.data().mojang.resolve(&player).await {
        Ok(identity) => identity,
        Err(e) => {
            ctx.say(lookup_failure_message(&player, &e)).await?;
            return Ok(());
        }
    };

    match ctx.data().renderer.render(&identity).await {
        Ok(buffer) => {
            let attachment = serenity::CreateAttachment::bytes(buffer.into_inner(), "shop.png");
            ctx.send(poise::CreateReply::default().attachment(attachment)).await?;
        }
        Err(e) => {
            ctx.say(render_failure_message(&identity, &e)).await?;
        }
    }

    Ok(())
}

fn lookup_failure_message(player: &str, error: &FetchError) -> String {
    match error {
        FetchError::UnknownPlayer(_) => format!("Could not find a player called `{player}`."),
        e => {
            tracing::warn!("Player lookup for {} failed: {}", player, e);
            "Could not look up that player right now, try again later.".to_string()
        }
    }
}

fn render_failure_message(identity: &PlayerIdentity, error: &RenderError) -> String {
    match error {
        RenderError::Fetch(e) => {
            tracing::info!("No shop data for {}: {}", identity.name, e);
            format!("`{}` has not played Bedwars before.", identity.name)
        }
        e if e.is_asset_mismatch() => {
            tracing::error!("Asset mismatch while rendering {}: {}", identity.name, e);
            "Could not render that shop, one of its items has no image yet.".to_string()
        }
        e => {
            tracing::error!("Failed to render shop for {}: {}", identity.name, e);
            "Something went wrong while rendering that shop.".to_string()
        }
    }
}
