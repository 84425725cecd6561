//! Bitcoin private key implementation.
//!
//! A [`PrivateKey`] is a non-zero secp256k1 scalar below the curve order
//! together with the network it belongs to. Hex and WIF strings are derived
//! on demand and never stored.

use k256::elliptic_curve::subtle::ConstantTimeEq;
use k256::{FieldBytes, NonZeroScalar, Scalar};
use kagi::encoding::{
    CHECKSUM_LEN, base58check_decode, base58check_encode, is_valid_base58check,
};
use kagi::rand_core::{CryptoRng, RngCore};
use kagi::{CurveEngine, Error, Result, Secp256k1};
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::address::Address;
use crate::network::NetworkProfile;
use crate::public_key::PublicKey;

/// Upper bound on random candidates drawn by [`PrivateKey::generate_with_rng`].
///
/// A uniformly random 256-bit value is out of range with probability below
/// 2^-127, so exhausting this bound means the random source is broken.
pub const MAX_GENERATION_ATTEMPTS: u32 = 16;

/// Length of a hex-encoded private key.
const HEX_LEN: usize = 64;

/// Trailing payload byte marking a WIF key as "use compressed public key".
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Check whether `wif` decodes as Base58 with a valid checksum.
///
/// Only the encoding is checked, not the network prefix or the scalar.
pub fn check_wif(wif: &str) -> bool {
    is_valid_base58check(wif)
}

/// Bitcoin private key based on secp256k1.
#[derive(Clone)]
pub struct PrivateKey {
    secret: NonZeroScalar,
    network: NetworkProfile,
    compressed: bool,
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        // NonZeroScalar zeroizes to one to keep its invariant
        self.secret.zeroize();
        self.compressed = false;
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl PrivateKey {
    /// Generate a random private key from the operating system's secure
    /// random source.
    #[cfg(feature = "rand")]
    pub fn generate(network: impl Into<NetworkProfile>) -> Result<Self> {
        Self::generate_with_rng(&mut kagi::rand_core::OsRng, network)
    }

    /// Generate a random private key from `rng`.
    ///
    /// Candidates equal to zero or not below the curve order are discarded
    /// and redrawn, at most [`MAX_GENERATION_ATTEMPTS`] times. That is the
    /// only condition that triggers a retry.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(
        rng: &mut R,
        network: impl Into<NetworkProfile>,
    ) -> Result<Self> {
        let network = network.into();
        let mut candidate = Zeroizing::new([0u8; 32]);

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            rng.fill_bytes(&mut candidate[..]);
            match Self::from_bytes(&candidate[..], network) {
                Ok(key) => return Ok(key),
                Err(Error::InvalidPrivateKey) => {
                    debug!(attempt, "random scalar outside [1, n), drawing again");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "random source produced no valid scalar"
        );
        Err(Error::KeyGeneration {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    /// Create from a raw 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8], network: impl Into<NetworkProfile>) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let secret: Option<NonZeroScalar> =
            NonZeroScalar::from_repr(FieldBytes::clone_from_slice(bytes)).into();

        Ok(Self {
            secret: secret.ok_or(Error::InvalidPrivateKey)?,
            network: network.into(),
            compressed: false,
        })
    }

    /// Create from a scalar already reduced modulo the curve order.
    pub(crate) fn from_scalar(
        scalar: Scalar,
        network: NetworkProfile,
        compressed: bool,
    ) -> Result<Self> {
        let secret: Option<NonZeroScalar> = NonZeroScalar::new(scalar).into();

        Ok(Self {
            secret: secret.ok_or(Error::InvalidPrivateKey)?,
            network,
            compressed,
        })
    }

    /// Import from exactly 64 hex characters (either case).
    pub fn from_hex(hex: &str, network: impl Into<NetworkProfile>) -> Result<Self> {
        if hex.len() != HEX_LEN {
            return Err(Error::InvalidHexLength(hex.len()));
        }

        let mut bytes = Zeroizing::new([0u8; 32]);
        hex::decode_to_slice(hex, &mut bytes[..]).map_err(|_| Error::InvalidEncoding)?;

        Self::from_bytes(&bytes[..], network)
    }

    /// Import from WIF (Wallet Import Format).
    ///
    /// Accepts both the 33-byte payload and the 34-byte payload with the
    /// compression flag. The version byte must match `network`.
    pub fn from_wif(wif: &str, network: impl Into<NetworkProfile>) -> Result<Self> {
        let network = network.into();
        let payload = Zeroizing::new(base58check_decode(wif).map_err(|e| match e {
            // Too short to carry a checksum at all
            Error::InvalidLength { actual, .. } => {
                Error::InvalidWif(actual.saturating_sub(CHECKSUM_LEN))
            }
            e => e,
        })?);

        let compressed = match payload.len() {
            33 => false,
            34 if payload[33] == WIF_COMPRESSED_FLAG => true,
            n => return Err(Error::InvalidWif(n)),
        };

        if payload[0] != network.private_key_prefix() {
            return Err(Error::UnexpectedVersion {
                expected: network.private_key_prefix(),
                actual: payload[0],
            });
        }

        let mut key = Self::from_bytes(&payload[1..33], network)?;
        key.compressed = compressed;
        Ok(key)
    }

    /// Export as WIF (Wallet Import Format).
    ///
    /// The scalar is always written as 32 bytes, so small scalars keep their
    /// leading zero bytes.
    pub fn to_wif(&self) -> String {
        let mut data = Zeroizing::new([0u8; 34]);
        data[0] = self.network.private_key_prefix();
        data[1..33].copy_from_slice(&*self.to_bytes());

        let payload_len = if self.compressed {
            data[33] = WIF_COMPRESSED_FLAG;
            34
        } else {
            33
        };

        base58check_encode(&data[..payload_len])
    }

    /// Serialize to raw 32-byte secret.
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.secret.to_bytes().into())
    }

    /// Serialize to 64 lowercase hex characters.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&*self.to_bytes()))
    }

    /// The network this key belongs to.
    pub const fn network(&self) -> NetworkProfile {
        self.network
    }

    /// Set whether to use compressed public key.
    pub fn set_compressed(&mut self, compressed: bool) {
        self.compressed = compressed;
    }

    /// Check if using compressed public key.
    pub const fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Get the corresponding public key.
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_private_key_with(&Secp256k1, self)
    }

    /// Get the corresponding public key using `engine`.
    pub fn public_key_with<E: CurveEngine>(&self, engine: &E) -> Result<PublicKey> {
        PublicKey::from_private_key_with(engine, self)
    }

    /// Get the address of this key, honoring its compression preference.
    pub fn address(&self) -> Result<Address> {
        Ok(self.public_key()?.address(self.compressed))
    }

    pub(crate) const fn secret(&self) -> &NonZeroScalar {
        &self.secret
    }

    /// Compare secrets in constant time.
    pub fn same_secret(&self, other: &Self) -> bool {
        self.secret.as_ref().ct_eq(other.secret.as_ref()).into()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.same_secret(other)
            && self.network == other.network
            && self.compressed == other.compressed
    }
}

impl Eq for PrivateKey {}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "PrivateKey([REDACTED], network={}, compressed={})",
            self.network, self.compressed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{MAINNET, Network, TESTNET};

    /// (hex, WIF, network) vectors.
    const VECTORS: &[(&str, &str, NetworkProfile)] = &[
        ("42EE9BFFA29658554203A7D82456B4CBB9286ABE8D781D6C94C080260A9F24D6", "5JKmGh5KasctVb3o9p1eNZmgqgRNvAUTmVBs9aca5VJHHMFtMgc", MAINNET),
        ("8613DFD6C099751DCC4020EF6F9BCD3C00F4565A15B26979B4B93C045D0A5CEB", "5JqLR1PX9UWPkiPus9ontEPXo4KitgoiYCkHaFoDh5hJdDJJmcK", MAINNET),
        ("aef29c9770a9f6b9da86e37fc12a334eeffb02f967a55ba125deb77736ee3fc1", "5K9LPKv2VsbmAMhcEiNQnU2bTiNavtap1Ex6EMN1MFkTRZHi26E", MAINNET),
        ("ca9a14d902fe536d9265862a8a5f21a8520dc215c0c10da0a9d5831aadcc520f", "5KMWmt74aaabx8bxumCoXzniNwfdPTTP4y2SG8D31Mzt79FemR9", MAINNET),
        ("3610d7b143edd8bf2b5aaea942d59e7f3532d7ac340d5fd4e118c18e010ebd2d", "5JE6ctXTzE8JK5Qaw1FUtR9kNiYsyBicuwdR2jn982sfn9BL2Ku", MAINNET),
        ("7504089115c9349ee5c04b129e1aea1c661f4c9c0f4c415dc9dd3aa791de7d10", "5JhpbHXjDJTuPxeXs53FBY4Hd4oZoS1RboswXNn3udEG6XtTdA8", MAINNET),
        ("b03c2e8976c7963b472ac71cafc9458955e9743f7682c2409218cb31397c10d7", "5K9uGdHuajFab23DZFCv3EBN2bRwkifZiZRNbUoUgyn9g8UFMTu", MAINNET),
        ("bc18f76841a483825323c48a26830734f0b496f89de498f7d4b47b15231eb482", "931krx7yFnVSoHb1JxeN1W2rrhWARbNfiK3BA3xVZZrfgALvkMy", TESTNET),
        ("11d82d8c5dfd251556e8f49d020171cfd9d993d0c95c3bd8a3641ece5da1a293", "91imyYBEzyfb2d45tX81JucjFsCvidtKYwxbZXP6f431rY1mV8E", TESTNET),
        ("3ce1461994adb57fde42d6595ab53aff95392abb4f1b9d08fda5af284feb40b2", "923jG4W4c83BacqWFTLHYCwaRw2YRR9umK9ZeQ2CtJfRLZLC8k6", TESTNET),
        ("4f60b2ff5b9f83d9549d69b86d4a540c5b3d9e0df19fa8c2716e7fc6eb053b1d", "92Bsm5dR62dXoEeTVAD899EEAtKBQoBQ68BnX4GC98TWnnaTWT5", TESTNET),
        ("94442137a9cfdd302f34773b2ed04fe038038d81c09af352a216af5507cf5035", "92iDRThnHRquXbFLgZVdYzFjVUYz8difQtwjeMRRULKNbxNWkKV", TESTNET),
        ("3663d354de4bc3b83c0041d63f829ab56ac1d6bbc5f9b1914afdbf2032ae0edc", "91zsUsNprBX2FKgfotXp2TtG1KhrDekVK2ppEuzLRVjeyq8FEHa", TESTNET),
        ("c96e8294cc865241c45aa3936b4aea503039bcad2c3c28e85cbcb55158f80174", "937dTvv4mUCZFbHqaom9uPUAFhNPTVdeWZ454xKUiywubknhRV7", TESTNET),
        ("1af1af738881e068cc13dcd7cd45dee6542206612df83cde8bbe6246626945ed", "91nnQwn6kyNo56s2umtUBoUbuB9FyU8vuQzQjG4ZfFKV354kAwt", TESTNET),
        ("5b1338b2e841fe88f256ee18575c7da626bf2f2faf218e7598d38d6bd2f61fc0", "92H2Z5s2Mwy3XTJTmeRdc4q75suMonU1jqow36yqe5UQcZvLxu7", TESTNET),
    ];

    const ORDER_HEX: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";

    /// Rng that replays fixed 32-byte blocks, repeating the last one.
    struct ReplayRng {
        blocks: Vec<[u8; 32]>,
        next: usize,
    }

    impl RngCore for ReplayRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let block = self.blocks[self.next.min(self.blocks.len() - 1)];
            self.next += 1;
            dest.copy_from_slice(&block[..dest.len()]);
        }

        fn try_fill_bytes(
            &mut self,
            dest: &mut [u8],
        ) -> core::result::Result<(), kagi::rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ReplayRng {}

    #[test]
    fn test_from_hex_vectors() {
        for (hex, wif, network) in VECTORS {
            let key = PrivateKey::from_hex(hex, *network).unwrap();
            assert_eq!(key.to_wif(), *wif);
            assert_eq!(key.to_hex().as_str(), hex.to_ascii_lowercase());
        }
    }

    #[test]
    fn test_from_wif_vectors() {
        for (hex, wif, network) in VECTORS {
            let key = PrivateKey::from_wif(wif, *network).unwrap();
            assert_eq!(key.to_hex().as_str(), hex.to_ascii_lowercase());
            assert_eq!(key.network(), *network);
            assert!(!key.is_compressed());
        }
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert_eq!(
            PrivateKey::from_hex(
                "8613DFD6C099751DCC4020EF6F9BCD3C00F4565A15B26979B4B93C045D0A5CE",
                MAINNET
            ),
            Err(Error::InvalidHexLength(63))
        );
        assert_eq!(
            PrivateKey::from_hex(
                "8613DFD6C099751DCC4020EF6F9BCD3C00F4565A15B26979B4B93C045D0A5CEB1",
                MAINNET
            ),
            Err(Error::InvalidHexLength(65))
        );
        assert_eq!(
            PrivateKey::from_hex("", MAINNET),
            Err(Error::InvalidHexLength(0))
        );
    }

    #[test]
    fn test_from_hex_rejects_non_hex() {
        let hex = "zz13DFD6C099751DCC4020EF6F9BCD3C00F4565A15B26979B4B93C045D0A5CEB";
        assert_eq!(PrivateKey::from_hex(hex, MAINNET), Err(Error::InvalidEncoding));
    }

    #[test]
    fn test_out_of_range_scalars_rejected() {
        let zero = "0".repeat(64);
        assert_eq!(
            PrivateKey::from_hex(&zero, MAINNET),
            Err(Error::InvalidPrivateKey)
        );
        assert_eq!(
            PrivateKey::from_hex(ORDER_HEX, MAINNET),
            Err(Error::InvalidPrivateKey)
        );
        assert_eq!(
            PrivateKey::from_hex(&"F".repeat(64), MAINNET),
            Err(Error::InvalidPrivateKey)
        );

        // Well-formed WIF wrapping the curve order
        let order = hex::decode(ORDER_HEX).unwrap();
        let mut payload = vec![0x80];
        payload.extend_from_slice(&order);
        let wif = base58check_encode(&payload);
        assert_eq!(
            PrivateKey::from_wif(&wif, MAINNET),
            Err(Error::InvalidPrivateKey)
        );
    }

    #[test]
    fn test_small_scalar_keeps_fixed_width() {
        let key = PrivateKey::from_hex(&format!("{:0>64}", "1"), MAINNET).unwrap();
        let wif = key.to_wif();
        assert_eq!(wif, "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf");
        assert_eq!(wif.len(), 51);

        let key = PrivateKey::from_hex(&format!("{:0>64}", "ff"), MAINNET).unwrap();
        assert_eq!(
            key.to_wif(),
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsrefTAtA4s"
        );
        assert_eq!(key.to_hex().len(), 64);
    }

    #[test]
    fn test_compressed_wif_roundtrip() {
        let mut key = PrivateKey::from_hex(
            "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d",
            MAINNET,
        )
        .unwrap();
        assert_eq!(
            key.to_wif(),
            "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ"
        );

        key.set_compressed(true);
        let wif = key.to_wif();
        assert_eq!(wif, "KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617");

        let recovered = PrivateKey::from_wif(&wif, MAINNET).unwrap();
        assert!(recovered.is_compressed());
        assert_eq!(recovered, key);
    }

    #[test]
    fn test_from_wif_rejects_wrong_network() {
        let wif = "5JKmGh5KasctVb3o9p1eNZmgqgRNvAUTmVBs9aca5VJHHMFtMgc";
        assert_eq!(
            PrivateKey::from_wif(wif, TESTNET),
            Err(Error::UnexpectedVersion {
                expected: 0xef,
                actual: 0x80
            })
        );
    }

    #[test]
    fn test_from_wif_rejects_truncated() {
        for wif in [
            "5JE6ctXTzE8JK5Qaw1FUtR9kNiYsyBicuwdR2jn982sfn9BL2K",
            "5K9uGdHuajFab23DZFCv3EBN2bRwkifZiZRNbUoUgyn9g8UFMT",
        ] {
            assert!(PrivateKey::from_wif(wif, MAINNET).is_err());
        }
    }

    #[test]
    fn test_from_wif_rejects_bad_payload_length() {
        let wif = base58check_encode(&[0x80; 20]);
        assert_eq!(PrivateKey::from_wif(&wif, MAINNET), Err(Error::InvalidWif(20)));

        // 34 bytes without the compression flag
        let mut payload = vec![0x80];
        payload.extend_from_slice(&[0x11; 32]);
        payload.push(0x02);
        let wif = base58check_encode(&payload);
        assert_eq!(PrivateKey::from_wif(&wif, MAINNET), Err(Error::InvalidWif(34)));
    }

    #[test]
    fn test_from_wif_short_input_is_invalid_wif() {
        // Decodes to two bytes, fewer than a checksum
        assert_eq!(PrivateKey::from_wif("11", MAINNET), Err(Error::InvalidWif(0)));
        assert_eq!(PrivateKey::from_wif("", MAINNET), Err(Error::InvalidWif(0)));

        let wif = base58check_encode(&[0x80]);
        assert_eq!(PrivateKey::from_wif(&wif, MAINNET), Err(Error::InvalidWif(1)));
    }

    #[test]
    fn test_check_wif() {
        assert!(check_wif("5KfonmXvbRoQycGJq3YfEEdu8K1zrtJXzejMjuh1rrPjbavb1Uc"));
        assert!(!check_wif("5KfonmXvbRoQycGJq3YfEEdu8K1zrtJXzejMjuh1rrPjbavb1UC"));
        assert!(!check_wif("not base58 0OIl"));
    }

    #[cfg(feature = "rand")]
    #[test]
    fn test_generate() {
        for (network, first) in [(Network::Mainnet, '5'), (Network::Testnet, '9')] {
            for _ in 0..2000 {
                let key = PrivateKey::generate(network).unwrap();
                let wif = key.to_wif();
                assert_eq!(key.network(), network.profile());
                assert_eq!(wif.len(), 51);
                assert!(wif.starts_with(first));
                assert_eq!(key.to_hex().len(), 64);
            }
        }
    }

    #[cfg(feature = "rand")]
    #[test]
    fn test_tampered_wif_rejected() {
        const ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
        let mut rng = kagi::rand_core::OsRng;

        for _ in 0..10_000 {
            let key = PrivateKey::generate(MAINNET).unwrap();
            let mut wif = key.to_wif().into_bytes();

            let position = (rng.next_u32() as usize) % wif.len();
            let original = wif[position];
            let mut replacement = ALPHABET[(rng.next_u32() as usize) % ALPHABET.len()];
            if replacement == original {
                replacement = if original == b'z' { b'1' } else { b'z' };
            }
            wif[position] = replacement;

            let tampered = String::from_utf8(wif).unwrap();
            assert!(PrivateKey::from_wif(&tampered, MAINNET).is_err(), "{tampered}");
        }
    }

    #[test]
    fn test_generate_retries_out_of_range() {
        let mut rng = ReplayRng {
            blocks: vec![[0x00; 32], [0xff; 32], [0x42; 32]],
            next: 0,
        };
        let key = PrivateKey::generate_with_rng(&mut rng, MAINNET).unwrap();
        assert_eq!(*key.to_bytes(), [0x42; 32]);
        assert_eq!(rng.next, 3);
    }

    #[test]
    fn test_generate_gives_up_on_broken_source() {
        let mut rng = ReplayRng {
            blocks: vec![[0x00; 32]],
            next: 0,
        };
        let err = PrivateKey::generate_with_rng(&mut rng, MAINNET).unwrap_err();
        assert_eq!(
            err,
            Error::KeyGeneration {
                attempts: MAX_GENERATION_ATTEMPTS
            }
        );
        assert!(err.is_internal());
        assert_eq!(rng.next, MAX_GENERATION_ATTEMPTS as usize);
    }

    #[test]
    fn test_debug_redacted() {
        let key = PrivateKey::from_hex(VECTORS[0].0, MAINNET).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.to_lowercase().contains("42ee9b"));
    }

    proptest::proptest! {
        #[test]
        fn prop_hex_wif_roundtrip(bytes in proptest::array::uniform32(proptest::num::u8::ANY), testnet: bool) {
            let network = if testnet { TESTNET } else { MAINNET };
            let hex = hex::encode(bytes);
            proptest::prop_assume!(PrivateKey::from_hex(&hex, network).is_ok());

            let key = PrivateKey::from_hex(&hex, network).unwrap();
            let recovered = PrivateKey::from_wif(&key.to_wif(), network).unwrap();
            proptest::prop_assert_eq!(*recovered.to_bytes(), bytes);
        }
    }
}
