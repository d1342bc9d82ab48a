use serenity::all::{GuildId, RatelimitInfo};
use serenity::async_trait;
use serenity::prelude::*;

use crate::config::BotConfig;
use crate::discord::commands::{shop, Data};

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: serenity::model::gateway::Ready) {
        tracing::info!("Connected to discord as {}", ready.user.name);
    }

    async fn ratelimit(&self, data: RatelimitInfo) {
        tracing::warn!("Rate limited: {:?}", data);
    }
}

pub struct DiscordBot {
    client: Client,
}

impl DiscordBot {
    pub async fn new(config: &BotConfig, data: Data) -> anyhow::Result<Self> {
        let guild_id = config.guild_id.map(GuildId::new);

        // Set gateway intents, which decides what events the bot will be notified about
        let intents = GatewayIntents::non_privileged();

        let framework = poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands: vec![shop()],
                pre_command: |ctx| {
                    Box::pin(async move {
                        tracing::info!("Received '{}' from {}", ctx.command().name, ctx.author().name);
                    })
                },
                ..Default::default()
            })
            .setup(move |ctx, _ready, framework| {
                Box::pin(async move {
                    match guild_id {
                        Some(guild_id) => poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id).await?,
                        None => poise::builtins::register_globally(ctx, &framework.options().commands).await?,
                    }
                    Ok(data)
                })
            })
            .build();

        let client = Client::builder(&config.discord_token, intents).event_handler(Handler).framework(framework).await?;

        Ok(DiscordBot { client })
    }

    pub async fn run_bot(&mut self) -> anyhow::Result<()> {
        tracing::info!("Running discord bot");
        self.client.start().await?;
        Ok(())
    }
}
