//! Booking reference generator.
//!
//! References look like `SKY-XXXXXX`: a configured prefix plus six uppercase
//! alphanumerics. OS randomness is preferred; when it is unavailable a
//! time-seeded generator produces the same output shape. No server-side
//! uniqueness check exists, so collision probability is not a correctness
//! concern for this simulated flow.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 6;

pub fn mint(prefix: &str) -> String {
    let mut bytes = [0u8; SUFFIX_LEN];
    if OsRng.try_fill_bytes(&mut bytes).is_err() {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0);
        StdRng::seed_from_u64(seed).fill_bytes(&mut bytes);
    }

    let suffix: String = bytes
        .iter()
        .map(|byte| ALPHABET[*byte as usize % ALPHABET.len()] as char)
        .collect();
    format!("{prefix}-{suffix}")
}
