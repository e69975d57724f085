// crates/nt-cli/src/commands/mod.rs - Command Handler Modules
//
// One module per subcommand. Handlers take an open Context plus the
// already-resolved arguments and print to stdout.
//
// MODULE ORGANIZATION:
// - add: create a note
// - list: tab-separated or JSON listing, oldest ID first
// - view: one note in detail
// - tui: hand the store to the interactive browser
// - config: print the default configuration file

pub mod add;
pub mod config;
pub mod list;
pub mod tui;
pub mod view;
