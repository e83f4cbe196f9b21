//! Property tests for digest output shape and name matching

use checksum_core::{Algorithm, DigesterRegistry};
use proptest::prelude::*;

fn any_algorithm() -> impl Strategy<Value = Algorithm> {
    proptest::sample::select(Algorithm::ALL.to_vec())
}

/// Randomly flip the ASCII case of each character
fn recase(name: &str, mask: u64) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| {
            if mask & (1 << (i % 64)) != 0 {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_digest_is_lowercase_hex_of_fixed_width(
        algorithm in any_algorithm(),
        data in proptest::collection::vec(any::<u8>(), 0..4096),
    ) {
        let digester = DigesterRegistry::global().get_digester(algorithm.name()).unwrap();
        let digest = digester.hash_bytes(&data).unwrap();

        prop_assert_eq!(digest.len(), algorithm.hex_len());
        prop_assert!(digest.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }

    #[test]
    fn prop_split_point_does_not_change_digest(
        algorithm in any_algorithm(),
        data in proptest::collection::vec(any::<u8>(), 1..2048),
        split in any::<prop::sample::Index>(),
    ) {
        let digester = DigesterRegistry::global().get_digester(algorithm.name()).unwrap();
        let at = split.index(data.len());

        let mut hasher = digester.create_hasher().unwrap();
        hasher.update(&data[..at]);
        hasher.update(&data[at..]);

        prop_assert_eq!(hasher.finalize(), digester.hash_bytes(&data).unwrap());
    }

    #[test]
    fn prop_any_casing_resolves_to_same_algorithm(
        algorithm in any_algorithm(),
        mask in any::<u64>(),
    ) {
        let name = recase(algorithm.name(), mask);
        let digester = DigesterRegistry::new().get_digester(&name).unwrap();
        prop_assert_eq!(digester.kind(), algorithm);
    }

    #[test]
    fn prop_unknown_names_are_unsupported(name in "[A-Za-z0-9-]{0,12}") {
        prop_assume!(Algorithm::ALL.iter().all(|a| !a.name().eq_ignore_ascii_case(&name)));
        let result = DigesterRegistry::new().get_digester(&name);
        prop_assert!(matches!(result, Err(ref e) if e.is_unsupported_algorithm()));
    }
}
