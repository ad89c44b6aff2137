//! Generated window ids of the form `<prefix>-<unix ms>-<random suffix>`.

use platform_host::unix_time_ms_now;
use rand::Rng;

use crate::model::WindowId;

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Generates a fresh window id using the current time and the thread-local RNG.
pub fn generate_window_id(prefix: &str) -> WindowId {
    generate_window_id_with(prefix, unix_time_ms_now(), &mut rand::thread_rng())
}

/// Deterministic variant of [`generate_window_id`] for a given clock reading and RNG.
pub fn generate_window_id_with<R: Rng + ?Sized>(
    prefix: &str,
    timestamp_ms: u64,
    rng: &mut R,
) -> WindowId {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())]))
        .collect();
    WindowId(format!("{prefix}-{timestamp_ms}-{suffix}"))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn generated_id_has_prefix_timestamp_and_suffix() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_window_id_with("customer-new", 1_700_000_000_000, &mut rng);

        let mut parts = id.as_str().rsplitn(3, '-');
        let suffix = parts.next().expect("suffix");
        let timestamp = parts.next().expect("timestamp");
        let prefix = parts.next().expect("prefix");
        assert_eq!(prefix, "customer-new");
        assert_eq!(timestamp, "1700000000000");
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    }

    #[test]
    fn consecutive_ids_differ() {
        let a = generate_window_id("window");
        let b = generate_window_id("window");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("window-"));
    }
}
