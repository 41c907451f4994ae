pub mod pages;

use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::context::Context;

/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';

pub struct CommandMeta {
    pub name: &'static str,
    pub usage: &'static str,
}

/// A prefixed command split into its name and up to two arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: String,
    pub arg1: Option<&'a str>,
    pub arg_tail: Option<&'a str>,
}

/// Split `content` into a lowercase command name, a first argument and the rest.
///
/// Returns `None` when the message does not carry the command prefix.
pub fn parse_command(content: &str) -> Option<ParsedCommand<'_>> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let name = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let (arg1, arg_tail) = match rest {
        Some(value) => {
            let mut args = value.splitn(2, char::is_whitespace);
            let first = args.next().filter(|arg| !arg.is_empty());
            let tail = args
                .next()
                .map(str::trim)
                .filter(|remaining| !remaining.is_empty());

            (first, tail)
        }
        None => (None, None),
    };

    Some(ParsedCommand {
        name,
        arg1,
        arg_tail,
    })
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.clone();
    let Some(command) = parse_command(&content) else {
        return Ok(());
    };

    match command.name.as_str() {
        name if name == pages::META.name => {
            pages::run(ctx, msg, command.arg1, command.arg_tail).await?
        }
        // Add new commands here
        _ => {}
    }

    Ok(())
}
