//! Published digest vectors
//!
//! Values come from the algorithm standards (RFC 1319, RFC 1321, FIPS 180-4)
//! and the common CRC-32/IEEE check values.

use checksum_core::Algorithm;

/// Digests of the empty input
pub const EMPTY_DIGESTS: [(Algorithm, &str); 7] = [
    (Algorithm::Crc32, "00000000"),
    (Algorithm::Md2, "8350e5a3e24c153df2275c9f80692773"),
    (Algorithm::Md5, "d41d8cd98f00b204e9800998ecf8427e"),
    (Algorithm::Sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
    (
        Algorithm::Sha256,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    ),
    (
        Algorithm::Sha384,
        "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b",
    ),
    (
        Algorithm::Sha512,
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
    ),
];

/// Digests of the three bytes `abc`
pub const ABC_DIGESTS: [(Algorithm, &str); 7] = [
    (Algorithm::Crc32, "352441c2"),
    (Algorithm::Md2, "da853b0d3f88d99b30283a69e6ded6bb"),
    (Algorithm::Md5, "900150983cd24fb0d6963f7d28e17f72"),
    (Algorithm::Sha1, "a9993e364706816aba3e25717850c26c9cd0d89d"),
    (
        Algorithm::Sha256,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    ),
    (
        Algorithm::Sha384,
        "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7",
    ),
    (
        Algorithm::Sha512,
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
    ),
];

/// Look up a vector from one of the tables above
pub fn known_digest(table: &[(Algorithm, &'static str)], algorithm: Algorithm) -> &'static str {
    table
        .iter()
        .find(|(a, _)| *a == algorithm)
        .map(|(_, digest)| *digest)
        .unwrap_or_else(|| panic!("no vector for {algorithm}"))
}
