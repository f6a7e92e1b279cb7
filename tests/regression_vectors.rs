//! Frozen regression vectors for the public API.
//!
//! Every expected value below is a snapshot of the reference behaviour:
//! any change in output is a compatibility break, not a refactor.
//!
//! Coverage:
//! - `random::bbs` (key stream golden values, prime table vs. sieve)
//! - `Sdes::key` / `Sdes::subkey`
//! - `Sdes::encrypt` / `Sdes::decrypt` in ECB and CBC
//! - round-trip over mixed text for both modes

use sdes::random::bbs::blum_blum_shub;
use sdes::random::prime_source::{PrimeSource, PrimeTable, SievePrimes};
use sdes::sbox::SBox;
use sdes::utils::bits::BitString;
use sdes::{Mode, Sdes, SdesError};

const PRIMES_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/primes.txt");
const SBOX1_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sbox1.txt");
const SBOX2_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sbox2.txt");

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cipher(p: u64, q: u64, pad: char, rounds: u32) -> Sdes {
    let mut cipher = Sdes::new();
    let params = cipher.params_mut();
    params.set_p(p).unwrap();
    params.set_q(q).unwrap();
    params.set_pad(pad).unwrap();
    params.set_rounds(rounds).unwrap();
    cipher
}

// ═══════════════════════════════════════════════════════════════════════
// Blum Blum Shub: frozen key streams
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn bbs_frozen_streams() {
    init_logger();
    let primes = SievePrimes::new();
    let cases: [(u64, u64, usize, &str); 6] = [
        (11, 19, 8, "11100110"),
        (383, 503, 8, "01110011"),
        (27691, 11, 16, "1111110111000011"),
        (103, 199, 9, "100011001"),
        (683, 199, 9, "010111101"),
        (683, 503, 9, "101111010"),
    ];
    for (p, q, bits, expected) in cases {
        let stream = blum_blum_shub(p, q, bits, &primes).unwrap();
        assert_eq!(stream.to_string(), expected, "BBS({}, {}, {})", p, q, bits);
    }
}

#[test]
fn bbs_repeatable_across_calls() {
    let primes = SievePrimes::new();
    for _ in 0..3 {
        assert_eq!(
            blum_blum_shub(11, 19, 8, &primes).unwrap().to_string(),
            "11100110"
        );
    }
}

#[test]
fn bbs_parameter_errors_are_distinct() {
    let primes = SievePrimes::new();
    assert_eq!(blum_blum_shub(17, 19, 8, &primes), Err(SdesError::InvalidP));
    assert_eq!(blum_blum_shub(11, 21, 8, &primes), Err(SdesError::InvalidQ));
    assert_eq!(blum_blum_shub(11, 19, 0, &primes), Err(SdesError::InvalidBits));
}

#[test]
fn prime_file_matches_sieve() {
    init_logger();
    let table = PrimeTable::load(PRIMES_FILE).unwrap();
    let sieve = SievePrimes::new();
    assert_eq!(table.len(), 2000);
    for index in [1, 2, 209, 1000, 2000] {
        assert_eq!(table.nth_prime(index), sieve.nth_prime(index), "index {}", index);
    }
    assert_eq!(table.nth_prime(209), Some(1289));
    assert_eq!(
        blum_blum_shub(11, 19, 8, &table),
        blum_blum_shub(11, 19, 8, &sieve)
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Key schedule
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn default_key_and_subkeys() {
    let sdes = Sdes::new();
    assert_eq!(sdes.key().unwrap().to_string(), "100011001");
    assert_eq!(sdes.subkey(1).unwrap().to_string(), "10001100");
    assert_eq!(sdes.subkey(2).unwrap().to_string(), "00011001");
    // Index wraps around the 9-bit key.
    assert_eq!(sdes.subkey(10).unwrap(), sdes.subkey(1).unwrap());
    assert_eq!(sdes.subkey(0), Err(SdesError::InvalidSubkeyIndex(0)));
}

#[test]
fn subkeys_are_pure_functions_of_parameters() {
    let a = cipher(683, 503, 'Q', 2);
    let b = cipher(683, 503, 'x', 5);
    for i in 1..=9 {
        assert_eq!(a.subkey(i).unwrap(), b.subkey(i).unwrap());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ECB: frozen ciphertexts
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn ecb_frozen_ciphertexts() {
    init_logger();
    let cases: [(u64, u64, char, u32, &str, &str); 6] = [
        (11, 19, 'q', 2, "OK", "kX"),
        (503, 23, 'x', 3, "Sit", "gGRR"),
        (27691, 11, 'Q', 4, "beet", "dv3e"),
        (683, 503, 'q', 2, "welcome", "K3RFOg E"),
        (
            19,
            59,
            '.',
            3,
            "\"Cryptography\" is power",
            "\"3j8z9elJ6K52\"5gbl8wwKzP",
        ),
        (27691, 23, 'X', 2, "go-go", "GD-GD"),
    ];
    for (p, q, pad, rounds, plain, expected) in cases {
        let sdes = cipher(p, q, pad, rounds);
        let secret = sdes.encrypt(plain, Mode::Ecb).unwrap();
        assert_eq!(secret, expected, "ECB encrypt {:?}", plain);
        assert_eq!(sdes.decrypt(&secret, Mode::Ecb).unwrap(), plain);
    }
}

#[test]
fn ecb_default_parameters_ok() {
    let sdes = Sdes::new();
    assert_eq!(sdes.encrypt("OK", Mode::Ecb).unwrap(), "YN");
    assert_eq!(sdes.decrypt("YN", Mode::Ecb).unwrap(), "OK");
}

#[test]
fn ecb_equal_blocks_give_equal_ciphertext() {
    let sdes = Sdes::new();
    let secret = sdes.encrypt("abababab", Mode::Ecb).unwrap();
    let pairs: Vec<String> = secret
        .chars()
        .collect::<Vec<_>>()
        .chunks(2)
        .map(|c| c.iter().collect())
        .collect();
    assert!(pairs.windows(2).all(|w| w[0] == w[1]));
}

// ═══════════════════════════════════════════════════════════════════════
// CBC: frozen ciphertexts
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn cbc_frozen_ciphertexts() {
    init_logger();
    let cases: [(u64, u64, &str, &str); 5] = [
        (11, 19, "go", "yE"),
        (43, 23, "CAT", "XCpt"),
        (27691, 11, "seed", "go1g"),
        (683, 503, "go-go", "pT-s4"),
        (43, 683, "cryptanalysis tricks", "0CPt5fpLd8UvXuVZAeJk"),
    ];
    for (p, q, plain, expected) in cases {
        let sdes = cipher(p, q, 'Q', 2);
        let secret = sdes.encrypt(plain, Mode::Cbc).unwrap();
        assert_eq!(secret, expected, "CBC encrypt {:?}", plain);
        assert_eq!(sdes.decrypt(&secret, Mode::Cbc).unwrap(), plain);
    }
}

#[test]
fn cbc_default_parameters_ok() {
    let sdes = Sdes::new();
    assert_eq!(sdes.encrypt("OK", Mode::Cbc).unwrap(), "tf");
    assert_eq!(sdes.decrypt("tf", Mode::Cbc).unwrap(), "OK");
}

#[test]
fn cbc_hides_repeated_plaintext() {
    let sdes = Sdes::new();
    let secret = sdes.encrypt("abababab", Mode::Cbc).unwrap();
    assert_ne!(&secret[0..2], &secret[2..4]);
}

// ═══════════════════════════════════════════════════════════════════════
// Round trips over mixed text
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn roundtrip_mixed_text_both_modes() {
    init_logger();
    let texts = [
        "a",
        "Hello, World!",
        "  leading and trailing  ",
        "tab\tand\nnewline",
        "ñandú & café (100%)",
        "1234567890",
        "...",
        "-",
        "",
    ];
    let ciphers = [
        Sdes::new(),
        cipher(11, 19, 'z', 2),
        cipher(27691, 11, 'X', 5),
        cipher(43, 683, '9', 3),
    ];
    for sdes in &ciphers {
        for mode in [Mode::Ecb, Mode::Cbc] {
            for text in texts {
                // Texts ending in the pad symbol lose it; none of these do.
                assert!(!text.ends_with(sdes.params().pad()));
                let secret = sdes.encrypt(text, mode).unwrap();
                assert_eq!(
                    sdes.decrypt(&secret, mode).unwrap(),
                    text,
                    "{} roundtrip of {:?} with {:?}",
                    mode,
                    text,
                    sdes.params()
                );
            }
        }
    }
}

#[test]
fn foreign_characters_stay_in_place() {
    let sdes = Sdes::new();
    let secret = sdes.encrypt("ab-cd!ef", Mode::Cbc).unwrap();
    assert_eq!(secret.chars().nth(2), Some('-'));
    assert_eq!(secret.chars().nth(5), Some('!'));
}

// ═══════════════════════════════════════════════════════════════════════
// Table and prime files
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn sbox_files_match_builtin_tables() {
    init_logger();
    let sbox1 = SBox::load(SBOX1_FILE).unwrap();
    let sbox2 = SBox::load(SBOX2_FILE).unwrap();
    assert_eq!(sbox1, SBox::default_sbox1());
    assert_eq!(sbox2, SBox::default_sbox2());
    assert_eq!(
        sbox1.to_string(),
        "SBOX(4):\n[101, 010, 001, 110, 011, 100, 111, 000]\n[001, 100, 110, 010, 000, 111, 101, 011]"
    );
}

#[test]
fn cipher_from_loaded_components() {
    let sdes = Sdes::with_components(
        SBox::load(SBOX1_FILE).unwrap(),
        SBox::load(SBOX2_FILE).unwrap(),
        Box::new(PrimeTable::load(PRIMES_FILE).unwrap()),
    )
    .unwrap();
    // 103 * 199 is past the end of a 2000-prime table.
    assert!(matches!(
        sdes.encrypt("OK", Mode::Ecb),
        Err(SdesError::SeedUnavailable(_))
    ));

    let mut sdes = sdes;
    sdes.params_mut().set_p(43).unwrap();
    sdes.params_mut().set_q(23).unwrap();
    assert_eq!(sdes.encrypt("CAT", Mode::Cbc).unwrap(), "XCpt");
}

#[test]
fn bitstring_display_matches_parse() {
    let bits: BitString = "000101".parse().unwrap();
    assert_eq!(bits.to_string(), "000101");
    assert_eq!(bits.len(), 6);
}
