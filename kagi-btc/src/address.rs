//! P2PKH address derivation.
//!
//! An address is `Base58Check(prefix || HASH160(serialized public key))`.
//! Compressed and uncompressed serializations of the same key hash to
//! different addresses.

use core::fmt;

use kagi::encoding::{base58check_decode, base58check_encode_versioned};
use kagi::{Error, Result};

use crate::network::NetworkProfile;
use crate::public_key::PublicKey;

/// Length of a P2PKH payload: one version byte plus a 20-byte hash.
const PAYLOAD_LEN: usize = 21;

/// Derive the P2PKH address string of `public_key`.
#[must_use]
pub fn derive_address(public_key: &PublicKey, compressed: bool) -> String {
    Address::from_public_key(public_key, compressed).to_string()
}

/// Pay-to-public-key-hash address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    network: NetworkProfile,
    hash: [u8; 20],
}

impl Address {
    /// Build from a public key and its serialization form.
    pub fn from_public_key(public_key: &PublicKey, compressed: bool) -> Self {
        Self {
            network: public_key.network(),
            hash: public_key.hash160(compressed),
        }
    }

    /// Parse an address string and check it belongs to `network`.
    pub fn parse(address: &str, network: impl Into<NetworkProfile>) -> Result<Self> {
        let network = network.into();
        let payload = base58check_decode(address)?;

        if payload.len() != PAYLOAD_LEN {
            return Err(Error::InvalidLength {
                expected: PAYLOAD_LEN,
                actual: payload.len(),
            });
        }
        if payload[0] != network.public_key_hash_prefix() {
            return Err(Error::UnexpectedVersion {
                expected: network.public_key_hash_prefix(),
                actual: payload[0],
            });
        }

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&payload[1..]);
        Ok(Self { network, hash })
    }

    /// The HASH160 this address commits to.
    pub const fn hash160(&self) -> &[u8; 20] {
        &self.hash
    }

    /// The network this address belongs to.
    pub const fn network(&self) -> NetworkProfile {
        self.network
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58check_encode_versioned(
            self.network.public_key_hash_prefix(),
            &self.hash,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{MAINNET, TESTNET};
    use crate::private_key::PrivateKey;

    fn public_key(hex: &str, network: NetworkProfile) -> PublicKey {
        PrivateKey::from_hex(hex, network)
            .unwrap()
            .public_key()
            .unwrap()
    }

    #[test]
    fn test_derive_address_mainnet() {
        let key = public_key(
            "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d",
            MAINNET,
        );
        assert_eq!(
            derive_address(&key, false),
            "1GAehh7TsJAHuUAeKZcXf5CnwuGuGgyX2S"
        );
        assert_eq!(
            derive_address(&key, true),
            "1LoVGDgRs9hTfTNJNuXKSpywcbdvwRXpmK"
        );
    }

    #[test]
    fn test_derive_address_vectors() {
        let key = public_key(
            "42EE9BFFA29658554203A7D82456B4CBB9286ABE8D781D6C94C080260A9F24D6",
            MAINNET,
        );
        assert_eq!(
            derive_address(&key, false),
            "1LsYfWvKHvo1t6iDQQaauQi1sT5Hyt19ei"
        );
        assert_eq!(
            derive_address(&key, true),
            "1HLvTawtr94zmmY1Qd3LQ5uRiav3HZizTN"
        );
    }

    #[test]
    fn test_scalar_one() {
        let one = format!("{:0>64}", "1");
        let key = public_key(&one, MAINNET);
        assert_eq!(
            derive_address(&key, false),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
        assert_eq!(
            derive_address(&key, true),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );

        let key = public_key(&one, TESTNET);
        assert_eq!(
            derive_address(&key, true),
            "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r"
        );
    }

    #[test]
    fn test_testnet_prefix() {
        let key = public_key(
            "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d",
            TESTNET,
        );
        let address = derive_address(&key, true);
        assert_eq!(address, "n1KSZGmQgB8iSZqv6UVhGkCGUbEdw8Lm3Q");
        assert!(address.starts_with('m') || address.starts_with('n'));
    }

    #[test]
    fn test_private_key_address_follows_compression() {
        let mut key = PrivateKey::from_hex(
            "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d",
            MAINNET,
        )
        .unwrap();
        assert_eq!(
            key.address().unwrap().to_string(),
            "1GAehh7TsJAHuUAeKZcXf5CnwuGuGgyX2S"
        );
        key.set_compressed(true);
        assert_eq!(
            key.address().unwrap().to_string(),
            "1LoVGDgRs9hTfTNJNuXKSpywcbdvwRXpmK"
        );
    }

    #[test]
    fn test_parse() {
        let address = Address::parse("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", MAINNET).unwrap();
        assert_eq!(
            address.hash160(),
            &hex_literal::hex!("751e76e8199196d454941c45d1b3a323f1433bd6")
        );
        assert_eq!(address.to_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn test_parse_wrong_network() {
        assert_eq!(
            Address::parse("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", TESTNET),
            Err(Error::UnexpectedVersion {
                expected: 0x6f,
                actual: 0x00
            })
        );
    }

    #[test]
    fn test_parse_rejects_wif() {
        assert_eq!(
            Address::parse(
                "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ",
                MAINNET
            ),
            Err(Error::InvalidLength {
                expected: 21,
                actual: 33
            })
        );
        assert_eq!(
            Address::parse("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMh", MAINNET),
            Err(Error::InvalidChecksum)
        );
    }
}
