// Lusakey — Gate Module
//
// Master-password digest handling and the locked/unlocked session state.

mod digest;
mod hasher;
mod session;

pub use digest::DigestFile;
pub use hasher::{hash_password, verify_password, DIGEST_HEX_LEN};
pub use session::VaultSession;
