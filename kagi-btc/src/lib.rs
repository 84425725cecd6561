//! Bitcoin-style keys for Kagi.
//!
//! Private keys with hex and WIF encodings, SEC1 public key compression,
//! P2PKH addresses and split-key arithmetic, parameterized by a
//! [`NetworkProfile`].
//!
//! # Features
//!
//! - `rand` (default): Enable random key generation from the OS RNG
//!
//! # Usage
//!
//! ```
//! use kagi_btc::{Network, PrivateKey};
//!
//! let mut key = PrivateKey::from_hex(
//!     "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d",
//!     Network::Mainnet,
//! )
//! .unwrap();
//! assert_eq!(key.to_wif(), "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ");
//!
//! key.set_compressed(true);
//! let address = key.address().unwrap();
//! assert_eq!(address.to_string(), "1LoVGDgRs9hTfTNJNuXKSpywcbdvwRXpmK");
//! ```

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
    clippy::missing_const_for_fn
)]
#![forbid(unsafe_code)]

pub mod address;
pub mod algebra;
pub mod network;
pub mod private_key;
pub mod public_key;

pub use address::{Address, derive_address};
pub use algebra::CombinePolicy;
pub use kagi::{Error, Result};
pub use network::{MAINNET, Network, NetworkProfile, ParseNetworkError, TESTNET};
pub use private_key::{MAX_GENERATION_ATTEMPTS, PrivateKey, check_wif};
pub use public_key::PublicKey;
