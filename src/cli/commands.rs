// Lusakey — CLI Command Handlers
//
// `init` and `open` build the vault and hand it to an interactive shell
// running on a blocking thread; the runtime's worker threads keep firing
// clipboard clear timers while the shell waits for input.

use crate::clipboard::ClipboardPolicy;
use crate::config::VaultPaths;
use crate::error::{AuthError, LusakeyError};
use crate::generator::generate;
use crate::vault::Vault;

use super::{Commands, Shell};

/// How the interactive session begins.
#[derive(Debug, Clone, Copy)]
enum SessionStart {
    Create,
    Login,
}

/// Execute the parsed CLI command.
pub async fn execute(command: Commands) -> Result<(), LusakeyError> {
    match command {
        Commands::Init => run_session(SessionStart::Create).await,
        Commands::Open => run_session(SessionStart::Login).await,
        Commands::Generate { length } => cmd_generate(length),
    }
}

// ─── Session ─────────────────────────────────────────────────────────────────

async fn run_session(start: SessionStart) -> Result<(), LusakeyError> {
    let paths = VaultPaths::from_env();

    tokio::task::spawn_blocking(move || {
        let vault = Vault::open(paths)?;

        if let SessionStart::Login = start {
            if !vault.has_vault() {
                vault.close()?;
                return Err(AuthError::NoVaultExists.into());
            }
        }

        let mut shell = Shell::new(vault, ClipboardPolicy::system());

        if let SessionStart::Create = start {
            if !shell.create_vault()? {
                println!("Vault creation cancelled.");
                return shell.shutdown();
            }
        }

        shell.run()
    })
    .await
    .map_err(|e| LusakeyError::Other(format!("Session task failed: {}", e)))?
}

// ─── Generate ────────────────────────────────────────────────────────────────

fn cmd_generate(length: usize) -> Result<(), LusakeyError> {
    println!("{}", generate(length));
    Ok(())
}
