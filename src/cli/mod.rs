// Lusakey — CLI Module
//
// Command-line interface using clap derive macros.
// Subcommands: init, open, generate. `init` and `open` continue into an
// interactive session (see `shell`).

mod commands;
mod shell;

use clap::{Parser, Subcommand};

use crate::generator::DEFAULT_LENGTH;

pub use commands::execute;
pub use shell::Shell;

/// Lusakey — a local vault for site logins and secrets.
#[derive(Parser, Debug)]
#[command(name = "lusakey")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new vault. Any existing vault and all its records are destroyed.
    Init,

    /// Unlock the vault with the master password and start a session.
    Open,

    /// Print a randomly generated secret. Does not touch the vault.
    Generate {
        /// Number of characters.
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,
    },
}
