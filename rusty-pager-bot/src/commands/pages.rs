use twilight_model::gateway::payload::incoming::MessageCreate;

use rusty_pager::{EventKind, Pagination, PaginationEvent, SendMode, UserId};
use rusty_pager_twilight::PaginationParent;
use tracing::{debug, error, info};

use crate::commands::CommandMeta;
use crate::context::Context;
use crate::embed::build_page_embed;

pub const META: CommandMeta = CommandMeta {
    name: "pages",
    usage: "!pages [count] [reply|new|edit]",
};

const DEFAULT_PAGE_COUNT: usize = 5;
const MAX_PAGE_COUNT: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagesArgs {
    pub count: usize,
    pub mode: SendMode,
}

pub fn parse_mode(raw: &str) -> Option<SendMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "reply" => Some(SendMode::ReplyToParent),
        "new" => Some(SendMode::NewMessage),
        "edit" => Some(SendMode::EditParent),
        _ => None,
    }
}

/// Accepts `[count] [mode]`, or a lone mode.
pub fn parse_args(arg1: Option<&str>, arg_tail: Option<&str>) -> Option<PagesArgs> {
    let Some(first) = arg1 else {
        return Some(PagesArgs {
            count: DEFAULT_PAGE_COUNT,
            mode: SendMode::default(),
        });
    };

    if let Ok(count) = first.parse::<usize>() {
        if !(1..=MAX_PAGE_COUNT).contains(&count) {
            return None;
        }
        let mode = match arg_tail {
            Some(raw) => parse_mode(raw)?,
            None => SendMode::default(),
        };
        return Some(PagesArgs { count, mode });
    }

    if arg_tail.is_some() {
        return None;
    }

    Some(PagesArgs {
        count: DEFAULT_PAGE_COUNT,
        mode: parse_mode(first)?,
    })
}

/// Paginate `count` sample embeds.
///
/// `edit` mode first posts a placeholder from the bot and turns it into the
/// pagination, since the bot cannot edit the invoking user's message.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;

    let Some(args) = parse_args(arg1, arg_tail) else {
        let usage = format!(
            "Usage: `{}` (count between 1 and {MAX_PAGE_COUNT})",
            META.usage
        );
        http.create_message(msg.channel_id)
            .reply(msg.id)
            .content(&usage)
            .await?;
        return Ok(());
    };

    let mut pagination = Pagination::new(ctx.transport());
    pagination
        .with_config((*ctx.pagination).clone())?
        .set_owner(UserId(msg.author.id.get()));

    for page in 1..=args.count {
        let embed = build_page_embed(
            "Pagination Demo",
            format!("Sample page #{page} of {}.", args.count),
            page,
            args.count,
        )?;
        let caption = format!("Showing page {page}");
        pagination.add_page(embed, Some(caption.as_str()))?;
    }

    pagination.on(EventKind::PageChange, |event| {
        if let PaginationEvent::PageChange { index } = event {
            debug!(index, "pages demo moved");
        }
    });

    let parent = match args.mode {
        SendMode::EditParent => {
            let placeholder = http
                .create_message(msg.channel_id)
                .content("Preparing pages...")
                .await?
                .model()
                .await?;
            PaginationParent::message(placeholder)
        }
        SendMode::NewMessage | SendMode::ReplyToParent => PaginationParent::message(msg.0.clone()),
    };

    pagination.start(parent, args.mode).await?;

    let channel_id = msg.channel_id.get();
    tokio::spawn(async move {
        match pagination.run().await {
            Ok(reason) => info!(channel_id, %reason, "pages demo ended"),
            Err(source) => {
                error!(?source, channel_id, "pages demo failed");
                if let Err(source) = pagination.stop().await {
                    error!(?source, channel_id, "failed to close pages demo");
                }
            }
        }
    });

    Ok(())
}
