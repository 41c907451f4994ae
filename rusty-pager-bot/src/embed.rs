use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Build one page of a paginated embed set.
///
/// The footer shows `Page x/y` when there is more than one page.
pub fn build_page_embed(
    title: &str,
    description: impl Into<String>,
    page: usize,
    total_pages: usize,
) -> anyhow::Result<Embed> {
    let page = page.max(1);
    let total_pages = total_pages.max(1);

    let builder = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    let embed = if total_pages > 1 {
        let footer = EmbedFooterBuilder::new(format!("Page {page}/{total_pages}")).build();
        builder.footer(footer).validate()?.build()
    } else {
        builder.validate()?.build()
    };

    Ok(embed)
}
