// stubgen_cli/commands - Subcommand entry points
pub mod check;
pub mod generate;
