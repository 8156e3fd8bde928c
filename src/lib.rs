// Lusakey — Library root
//
// Re-exports the vault facade and the gate, store, search, generator,
// clipboard, and CLI modules.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod gate;
pub mod generator;
pub mod search;
pub mod store;
pub mod vault;

pub use error::{AuthError, Field, LusakeyError, Result, ValidationError};
pub use vault::Vault;
