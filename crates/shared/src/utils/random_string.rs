use anyhow::Result;
use rand::distr::Alphanumeric;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

pub fn generate_random_string(length: usize) -> Result<String> {
    let mut seed = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    let rng = StdRng::from_seed(seed);

    Ok(rng
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_alphanumeric_strings_of_requested_length() {
        let s = generate_random_string(8).unwrap();
        assert_eq!(s.len(), 8);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_strings_differ() {
        let a = generate_random_string(16).unwrap();
        let b = generate_random_string(16).unwrap();
        assert_ne!(a, b);
    }
}
