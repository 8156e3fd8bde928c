// Lusakey — Interactive session
//
// A line-oriented front end over `Vault`. Each input line is parsed with clap
// (no binary name), so `help` and per-command `--help` come for free.
// Secrets and the master password are read without echo.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use tokio::task::JoinHandle;
use zeroize::Zeroizing;

use crate::clipboard::ClipboardPolicy;
use crate::error::{AuthError, LusakeyError};
use crate::generator::{generate, DEFAULT_LENGTH};
use crate::store::{NewRecord, Record};
use crate::vault::Vault;

#[derive(Parser, Debug)]
#[command(name = "lusakey", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ShellCommand {
    /// List every record, ordered by site.
    #[command(alias = "ls")]
    List,

    /// Filter records by site, login, or URL (case-insensitive).
    Search {
        /// Text to look for, spacing included. Empty lists everything.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "QUERY")]
        words: Vec<String>,

        /// The rest of the input line after `search`, as typed.
        #[arg(skip)]
        query: String,
    },

    /// Show one record. The secret stays masked unless --reveal is given.
    Show {
        id: i64,

        /// Print the secret after re-entering the master password.
        #[arg(long)]
        reveal: bool,
    },

    /// Add a record (prompts for each field).
    Add,

    /// Edit a record (empty input keeps the current value).
    Edit { id: i64 },

    /// Permanently delete a record.
    #[command(alias = "rm")]
    Delete {
        id: i64,

        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Copy a record's secret (or login) to the clipboard for 30 seconds.
    Copy {
        id: i64,

        /// Copy the login instead of the secret.
        #[arg(long)]
        login: bool,
    },

    /// Print a randomly generated secret.
    #[command(alias = "gen")]
    Generate {
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,
    },

    /// Lock the vault. The master password is required to continue.
    Lock,

    /// Leave the session.
    #[command(alias = "exit")]
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }

    let command = match ShellLine::try_parse_from(words)?.command {
        ShellCommand::Search { words, .. } => ShellCommand::Search {
            words,
            query: line_tail(line).to_string(),
        },
        command => command,
    };
    Ok(Some(command))
}

/// Everything after the first word and the single separator that follows it.
fn line_tail(line: &str) -> &str {
    let line = line.trim_start();
    let rest = match line.find(char::is_whitespace) {
        Some(end) => &line[end..],
        None => return "",
    };
    let mut chars = rest.chars();
    chars.next();
    chars.as_str()
}

pub struct Shell {
    vault: Vault,
    clipboard: ClipboardPolicy,
    pending_clears: Vec<JoinHandle<()>>,
}

impl Shell {
    pub fn new(vault: Vault, clipboard: ClipboardPolicy) -> Self {
        Self {
            vault,
            clipboard,
            pending_clears: Vec::new(),
        }
    }

    /// Prompt for a new master password and create the vault.
    /// Returns false if the user cancels.
    pub fn create_vault(&mut self) -> Result<bool, LusakeyError> {
        if self.vault.has_vault() {
            println!("A vault already exists at {}.", self.vault.paths().data_dir().display());
            println!("Creating a new one permanently deletes it and every stored record.");
            if !confirm("Continue? [y/N] ")? {
                return Ok(false);
            }
        }

        loop {
            let password = Zeroizing::new(prompt_secret("New master password (empty to cancel): ")?);
            if password.is_empty() {
                return Ok(false);
            }
            let confirmation = Zeroizing::new(prompt_secret("Confirm master password: ")?);

            match self.vault.create_vault(&password, &confirmation) {
                Ok(()) => {
                    println!("✓ Vault created");
                    println!("  Location: {}", self.vault.paths().data_dir().display());
                    return Ok(true);
                }
                Err(LusakeyError::Validation(e)) => println!("✗ {}", e),
                Err(e) => return Err(e),
            }
        }
    }

    /// Prompt for the master password until it unlocks the vault.
    /// Returns false if the user gives up with an empty line.
    pub fn unlock(&mut self) -> Result<bool, LusakeyError> {
        loop {
            let password = Zeroizing::new(prompt_secret("Master password (empty to quit): ")?);
            if password.is_empty() {
                return Ok(false);
            }

            match self.vault.login(&password) {
                Ok(()) => {
                    println!("✓ Vault unlocked ({} records)", self.vault.records()?.len());
                    return Ok(true);
                }
                Err(LusakeyError::Auth(AuthError::InvalidCredential)) => {
                    println!("✗ Invalid master password");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Read and execute commands until `quit`, end of input, or an abandoned unlock.
    pub fn run(mut self) -> Result<(), LusakeyError> {
        println!("Type `help` for the list of commands.");

        loop {
            if !self.vault.is_unlocked() && !self.unlock()? {
                break;
            }

            let line = match prompt_line("lusakey> ")? {
                Some(line) => line,
                None => break,
            };

            match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(ShellCommand::Quit)) => break,
                Ok(Some(command)) => {
                    if let Err(e) = self.dispatch(command) {
                        println!("✗ {}", e);
                    }
                }
                Err(e) => {
                    if let Err(err) = e.print() {
                        tracing::warn!(error = %err, "Failed to print command usage");
                    }
                }
            }
        }

        self.shutdown()
    }

    /// Clear a clipboard exposure that has not expired yet and close the store.
    pub fn shutdown(self) -> Result<(), LusakeyError> {
        if self.pending_clears.iter().any(|timer| !timer.is_finished()) {
            match self.clipboard.clear_now() {
                Ok(()) => println!("✓ Clipboard cleared"),
                Err(e) => tracing::warn!(error = %e, "Failed to clear clipboard on exit"),
            }
        }
        self.vault.close()
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<(), LusakeyError> {
        match command {
            ShellCommand::List => {
                print_records(self.vault.records()?.iter());
            }
            ShellCommand::Search { query, .. } => {
                let hits = self.vault.search(&query)?;
                print_records(hits.into_iter());
            }
            ShellCommand::Show { id, reveal } => self.cmd_show(id, reveal)?,
            ShellCommand::Add => self.cmd_add()?,
            ShellCommand::Edit { id } => self.cmd_edit(id)?,
            ShellCommand::Delete { id, yes } => self.cmd_delete(id, yes)?,
            ShellCommand::Copy { id, login } => self.cmd_copy(id, login)?,
            ShellCommand::Generate { length } => println!("{}", generate(length)),
            ShellCommand::Lock => {
                self.vault.lock();
                println!("✓ Vault locked");
            }
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    // ─── Commands ────────────────────────────────────────────────────────────

    fn cmd_show(&self, id: i64, reveal: bool) -> Result<(), LusakeyError> {
        let record = self.vault.record(id)?;

        let secret = if reveal {
            let password = Zeroizing::new(prompt_secret("Master password: ")?);
            if !self.vault.session().confirms(&password) {
                return Err(AuthError::InvalidCredential.into());
            }
            record.secret().to_string()
        } else {
            mask(record.secret())
        };

        println!("Record details:\n");
        println!("  ID:      {}", record.id);
        println!("  Site:    {}", record.site);
        println!("  Login:   {}", record.login);
        println!("  Secret:  {}", secret);
        println!("  URL:     {}", record.url.as_deref().unwrap_or("-"));
        println!("  Notes:   {}", record.notes.as_deref().unwrap_or("-"));
        println!("  Created: {}", record.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
        Ok(())
    }

    fn cmd_add(&mut self) -> Result<(), LusakeyError> {
        let site = prompt_line("Site: ")?.unwrap_or_default();
        let login = prompt_line("Login: ")?.unwrap_or_default();
        let secret = read_secret_or_generate()?;
        let url = prompt_line("URL (optional): ")?;
        let notes = prompt_line("Notes (optional): ")?;

        let record = self.vault.insert(NewRecord {
            site,
            login,
            secret: secret.to_string(),
            url,
            notes,
        })?;

        println!("✓ Record stored");
        println!("  ID:   {}", record.id);
        println!("  Site: {}", record.site);
        Ok(())
    }

    fn cmd_edit(&mut self, id: i64) -> Result<(), LusakeyError> {
        let current = self.vault.record(id)?.clone();

        let site = prompt_with_default("Site", &current.site)?;
        let login = prompt_with_default("Login", &current.login)?;
        let secret = if confirm("Replace the secret? [y/N] ")? {
            read_secret_or_generate()?
        } else {
            Zeroizing::new(current.secret().to_string())
        };
        let url = prompt_optional_with_default("URL", current.url.as_deref())?;
        let notes = prompt_optional_with_default("Notes", current.notes.as_deref())?;

        let record = self.vault.update(
            id,
            NewRecord {
                site,
                login,
                secret: secret.to_string(),
                url,
                notes,
            },
        )?;

        println!("✓ Record {} updated", record.id);
        Ok(())
    }

    fn cmd_delete(&mut self, id: i64, yes: bool) -> Result<(), LusakeyError> {
        let record = self.vault.record(id)?;
        if !yes {
            println!("Site:  {}", record.site);
            println!("Login: {}", record.login);
            if !confirm("Delete this record? This cannot be undone. [y/N] ")? {
                println!("Nothing deleted.");
                return Ok(());
            }
        }

        self.vault.delete(id)?;
        println!("✓ Record {} deleted ({} remaining)", id, self.vault.records()?.len());
        Ok(())
    }

    fn cmd_copy(&mut self, id: i64, login: bool) -> Result<(), LusakeyError> {
        let record = self.vault.record(id)?;
        let (what, value) = if login {
            ("Login", Zeroizing::new(record.login.clone()))
        } else {
            ("Secret", Zeroizing::new(record.secret().to_string()))
        };

        let timer = self.clipboard.expose(&value)?;
        self.pending_clears.retain(|t| !t.is_finished());
        self.pending_clears.push(timer);

        println!(
            "✓ {} copied, the clipboard will be cleared in {} seconds",
            what,
            self.clipboard.clear_after().as_secs()
        );
        Ok(())
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn print_records<'a>(records: impl Iterator<Item = &'a Record>) {
    let mut count = 0;
    for record in records {
        println!(
            "  {:>4} │ {:24} │ {:24} │ {}",
            record.id,
            record.site,
            record.login,
            record.url.as_deref().unwrap_or("")
        );
        count += 1;
    }
    if count == 0 {
        println!("No records.");
    } else {
        println!("{} record(s)", count);
    }
}

/// One `*` per character, so the length is visible but the value is not.
fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

/// Read a line from stdin. `None` at end of input.
fn prompt_line(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt_secret(label: &str) -> io::Result<String> {
    rpassword::prompt_password(label)
}

fn confirm(question: &str) -> io::Result<bool> {
    let answer = prompt_line(question)?.unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn prompt_with_default(label: &str, current: &str) -> io::Result<String> {
    let answer = prompt_line(&format!("{} [{}]: ", label, current))?.unwrap_or_default();
    Ok(if answer.trim().is_empty() {
        current.to_string()
    } else {
        answer
    })
}

/// Empty keeps the current value, `-` clears it.
fn prompt_optional_with_default(label: &str, current: Option<&str>) -> io::Result<Option<String>> {
    let shown = current.unwrap_or("");
    let answer = prompt_line(&format!("{} [{}] (- to clear): ", label, shown))?.unwrap_or_default();
    Ok(match answer.trim() {
        "" => current.map(str::to_string),
        "-" => None,
        _ => Some(answer),
    })
}

fn read_secret_or_generate() -> io::Result<Zeroizing<String>> {
    let secret = Zeroizing::new(prompt_secret("Secret (empty to generate): ")?);
    if !secret.is_empty() {
        return Ok(secret);
    }
    let generated = Zeroizing::new(generate(DEFAULT_LENGTH));
    println!("Generated a {}-character secret: {}", DEFAULT_LENGTH, generated.as_str());
    Ok(generated)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
