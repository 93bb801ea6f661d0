//! Builtin bot commands and incoming command parsing.
//!
//! The command set is fixed at build time. It is loaded once on first access
//! and cached for the lifetime of the process.

use serde::Serialize;
use std::sync::OnceLock;

/// A builtin bot command.
#[derive(Debug, Clone, Serialize)]
pub struct BotCommand {
    /// Command name (without the leading /)
    pub name: &'static str,
    /// Usage format (e.g., "/stop <product name>")
    pub usage: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

impl BotCommand {
    /// Creates a new builtin bot command.
    pub const fn new(name: &'static str, usage: &'static str, description: &'static str) -> Self {
        Self {
            name,
            usage,
            description,
        }
    }
}

/// Static storage for builtin commands (initialized once).
static BOT_COMMANDS: OnceLock<Vec<BotCommand>> = OnceLock::new();

/// Returns a reference to all builtin bot commands.
pub fn bot_commands() -> &'static [BotCommand] {
    BOT_COMMANDS.get_or_init(|| {
        vec![
            BotCommand::new("start", "/start", "Introduce the bot and how to begin"),
            BotCommand::new("track", "/track", "Start tracking a new product"),
            BotCommand::new(
                "stop",
                "/stop <product name>",
                "Stop tracking a product by (partial) name",
            ),
            BotCommand::new("list", "/list", "List the products currently being tracked"),
            BotCommand::new("help", "/help", "Show the help menu"),
            BotCommand::new("cancel", "/cancel", "Cancel the current tracking setup"),
        ]
    })
}

/// Find a builtin command by name.
pub fn find_command(name: &str) -> Option<&'static BotCommand> {
    bot_commands().iter().find(|cmd| cmd.name == name)
}

/// A command parsed out of an incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Lowercased command name without the leading slash or bot mention.
    pub name: String,
    /// Whatever followed the command token, trimmed.
    pub args: &'a str,
}

/// Splits `/name[@bot] [args...]` input into its parts.
///
/// Returns `None` when the text is not a command at all, leaving it to the
/// stage handlers. Group chats append the bot mention (`/track@SomeBot`);
/// the mention is stripped before matching.
pub fn parse_command(text: &str) -> Option<ParsedCommand<'_>> {
    let rest = text.trim().strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (rest, ""),
    };
    let name = match head.split_once('@') {
        Some((name, _)) => name,
        None => head,
    };
    if name.is_empty() {
        return None;
    }
    Some(ParsedCommand {
        name: name.to_ascii_lowercase(),
        args,
    })
}
