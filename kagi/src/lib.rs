//! # Kagi - Key Encoding Core
//!
//! Chain-agnostic primitives for turning secret scalars and mnemonic
//! phrases into the encodings wallets exchange.
//!
//! ## Modules
//!
//! - [`curve`]: secp256k1 domain parameters and the [`CurveEngine`] seam
//! - [`encoding`]: Base58Check encode/decode with checksum verification
//! - [`hash`]: SHA-256, double SHA-256, RIPEMD-160 and Hash160
//! - [`mnemonic`]: mnemonic generation, validation and seed derivation
//! - [`wordlist`]: validated 2048-word wordlists
//!
//! ## Features
//!
//! - `rand` (default): secure random generation backed by the OS
//! - `all-languages`: every standard BIP-39 wordlist, not just English

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::cast_possible_truncation,
    clippy::similar_names,
    clippy::unreadable_literal
)]
#![forbid(unsafe_code)]

pub mod curve;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod mnemonic;
pub mod wordlist;

pub use curve::{CurveEngine, Point, Secp256k1};
pub use error::{Error, Result};
pub use mnemonic::Mnemonic;
pub use wordlist::{Language, Wordlist};

// Re-export rand_core for consistent RNG trait versions
pub use rand_core;
