mod commands;
mod config;
mod context;
mod embed;

use std::env;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use rusty_pager_twilight::{ComponentRouter, Routed};

use crate::commands::handle_message;
use crate::context::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let pagination = config::pagination_from_env()?;
    info!(
        idle_timeout_ms = pagination.idle_timeout.as_millis() as u64,
        max_activations = ?pagination.max_activations,
        end_policy = pagination.end_policy.as_str(),
        owner_independent = pagination.owner_independent,
        "pagination settings loaded"
    );

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(token.clone()));
    let router = ComponentRouter::new();
    let ctx = Context::new(Arc::clone(&http), router.clone(), pagination);

    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;
    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);

    info!("pager bot is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("pager bot is ready");
            }
            Event::MessageCreate(msg) => {
                if let Err(source) = handle_message(ctx.clone(), msg).await {
                    error!(?source, "message command failed");
                }
            }
            Event::InteractionCreate(interaction) => match router.route(interaction).await {
                Routed::Delivered => {}
                Routed::Unclaimed(interaction) => {
                    debug!(
                        interaction_id = interaction.id.get(),
                        "interaction has no live pagination"
                    );
                }
            },
            Event::GatewayClose(frame) => {
                warn!(?frame, "gateway connection closed");
            }
            _ => {}
        }
    }

    Ok(())
}
