//! Room code generation.
//!
//! Room codes are 6-character uppercase alphanumeric strings. Generation is
//! independent of existing codes; the registry retries on the (rare)
//! collision with a live room.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every room code.
pub const CODE_LEN: usize = 6;

/// Generate a room code by uniform sampling from the alphabet.
pub fn generate_room_code() -> String {
    let mut rng = rand::rng();

    let mut code = String::with_capacity(CODE_LEN);
    for _ in 0..CODE_LEN {
        code.push(ALPHABET[rng.random_range(0..ALPHABET.len())] as char);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_have_correct_length() {
        assert_eq!(generate_room_code().len(), CODE_LEN);
    }

    #[test]
    fn generated_codes_use_uppercase_alphanumerics_only() {
        for _ in 0..50 {
            let code = generate_room_code();
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn consecutive_codes_differ() {
        // 36^6 possibilities; a back-to-back collision means a broken RNG.
        assert_ne!(generate_room_code(), generate_room_code());
    }
}
