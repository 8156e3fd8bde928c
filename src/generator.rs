// Lusakey — Secret generator
//
// Every character is drawn independently and uniformly from a fixed alphabet
// using the thread-local CSPRNG (seeded from the operating system).

use rand::Rng;

/// Default generated secret length.
pub const DEFAULT_LENGTH: usize = 20;

/// Letters, digits, and the fixed punctuation set.
pub const ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

/// Generate a random secret of `length` characters.
pub fn generate(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_length_is_twenty() {
        assert_eq!(generate(DEFAULT_LENGTH).chars().count(), 20);
    }

    #[test]
    fn test_every_character_comes_from_alphabet() {
        let secret = generate(1000);
        assert!(secret.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_alphabet_composition() {
        assert_eq!(ALPHABET.len(), 26 + 26 + 10 + 26);
        let unique: std::collections::HashSet<&u8> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), ALPHABET.len(), "No character may be weighted twice");
    }

    #[test]
    fn test_successive_calls_differ() {
        assert_ne!(generate(DEFAULT_LENGTH), generate(DEFAULT_LENGTH));
    }

    #[test]
    fn test_zero_length_is_empty() {
        assert!(generate(0).is_empty());
    }
}
