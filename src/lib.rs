//! Simplified DES teaching cipher.
//!
//! SDES is a small Feistel block cipher over text: every pair of symbols of
//! the 64-symbol B6 alphabet forms one 12-bit block. Round keys come from a
//! Blum Blum Shub bit stream seeded by two Blum primes `p` and `q`, and
//! blocks are chained in ECB or CBC mode. Characters outside the alphabet
//! pass through unchanged at their original positions.
//!
//! This is a didactic cipher. It offers no cryptographic strength.
//!
//! # Architecture
//!
//! ```text
//! modular / PrimeSource   (primality, gcd, prime sequence)
//!     ↓
//! BlumBlumShub            (key bit stream from p, q)
//!     ↓
//! SBox → FeistelNetwork   (expand, F, rounds, final half swap)
//!     ↓
//! BlockChain              (ECB / CBC over a sequence of blocks)
//!     ↓
//! Sdes                    (text in, text out: encode, pad, reinsert)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt with the default parameters:
//!
//! ```
//! use sdes::{Mode, Sdes};
//!
//! let cipher = Sdes::new();
//! let secret = cipher.encrypt("go-go", Mode::Cbc).unwrap();
//! assert_eq!(cipher.decrypt(&secret, Mode::Cbc).unwrap(), "go-go");
//! ```
//!
//! Change the parameters through their validated setters:
//!
//! ```
//! use sdes::{Mode, Sdes};
//!
//! let mut cipher = Sdes::new();
//! cipher.params_mut().set_p(683).unwrap();
//! cipher.params_mut().set_q(503).unwrap();
//! cipher.params_mut().set_pad('q').unwrap();
//! assert_eq!(cipher.encrypt("welcome", Mode::Ecb).unwrap(), "K3RFOg E");
//!
//! assert!(cipher.params_mut().set_p(13).is_err());
//! assert_eq!(cipher.params().p(), 683);
//! ```
//!
//! Modes can be parsed from their names:
//!
//! ```
//! use sdes::Mode;
//!
//! assert_eq!("CBC".parse::<Mode>().unwrap(), Mode::Cbc);
//! assert!("OFB".parse::<Mode>().is_err());
//! ```

#![deny(clippy::all)]

pub mod config;
pub mod error;
pub mod feistel;
pub mod modes;
pub mod modular;
pub mod params;
pub mod random;
pub mod sbox;
pub mod utils;

mod sdes;

pub use error::SdesError;
pub use modes::Mode;
pub use sdes::Sdes;
