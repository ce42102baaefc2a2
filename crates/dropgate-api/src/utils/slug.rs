//! Short slug generation.

use dropgate_core::constants::SLUG_ALPHABET;
use rand::RngCore;

/// Generate a random base62 slug of the requested length.
///
/// Uses the thread-local CSPRNG (OS-seeded), not a general-purpose
/// generator: slugs are unguessable capability URLs.
pub fn generate(len: usize) -> String {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf.iter()
        .map(|b| SLUG_ALPHABET[(*b as usize) % SLUG_ALPHABET.len()] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slugs_have_requested_length_and_alphabet() {
        for len in [8, 10] {
            let slug = generate(len);
            assert_eq!(slug.len(), len);
            assert!(slug.bytes().all(|b| SLUG_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn slugs_do_not_repeat_in_practice() {
        let slugs: HashSet<String> = (0..1000).map(|_| generate(8)).collect();
        assert_eq!(slugs.len(), 1000);
    }
}
