pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::{Cli, SortOrder};
pub(crate) use commands::{AddArgs, Commands, ListArgs, ThemeCommands, command_or_default};
