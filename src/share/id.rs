//! Random identifiers for uploaded and shared images.

use rand::Rng;

/// URL-safe identifier alphabet.
pub const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of generated identifiers.
pub const ID_LENGTH: usize = 10;

/// Generates a random identifier of `len` characters from [`ID_ALPHABET`].
pub fn generate_id(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// Whether `id` is non-empty and uses only [`ID_ALPHABET`] characters.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| ID_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_have_requested_length_and_alphabet() {
        for _ in 0..50 {
            let id = generate_id(ID_LENGTH);
            assert_eq!(id.len(), ID_LENGTH);
            assert!(is_valid_id(&id), "unexpected id {id}");
        }
    }

    #[test]
    fn generated_ids_are_distinct() {
        let ids: HashSet<String> = (0..200).map(|_| generate_id(ID_LENGTH)).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn rejects_path_like_ids() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("../etc"));
        assert!(!is_valid_id("abc.png"));
        assert!(is_valid_id("V1StGXR8_Z"));
    }
}
