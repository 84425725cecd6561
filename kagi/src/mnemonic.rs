//! BIP-39 style mnemonic phrases.
//!
//! A mnemonic encodes `ENT` bits of entropy followed by `ENT / 32` checksum
//! bits (the leading bits of `SHA256(entropy)`). The combined bit string is
//! split into 11-bit groups, most significant bit first, and each group
//! selects one word from a [`Wordlist`].
//!
//! | words | entropy bits | checksum bits |
//! |-------|--------------|---------------|
//! | 12    | 128          | 4             |
//! | 15    | 160          | 5             |
//! | 18    | 192          | 6             |
//! | 21    | 224          | 7             |
//! | 24    | 256          | 8             |
//!
//! # Example
//!
//! ```
//! use kagi::mnemonic;
//! use kagi::wordlist::Wordlist;
//!
//! let wordlist = Wordlist::english();
//! let phrase = mnemonic::generate(12, &wordlist).unwrap();
//! let entropy = mnemonic::validate_and_extract_entropy(&phrase, &wordlist).unwrap();
//! assert_eq!(entropy.len(), 16);
//! ```

use pbkdf2::pbkdf2_hmac;
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256, Sha512};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};
use crate::wordlist::Wordlist;

/// Number of PBKDF2 rounds for seed derivation.
const PBKDF2_ROUNDS: u32 = 2048;

/// Bits encoded by a single word.
const BITS_PER_WORD: usize = 11;

/// Entropy size in bits for a supported word count.
pub fn entropy_bits(word_count: usize) -> Result<usize> {
    match word_count {
        12 => Ok(128),
        15 => Ok(160),
        18 => Ok(192),
        21 => Ok(224),
        24 => Ok(256),
        _ => Err(Error::UnsupportedLength(word_count)),
    }
}

/// Mnemonic entropy, rendered to words on demand.
#[derive(Clone)]
pub struct Mnemonic {
    /// The entropy bytes (16-32 bytes depending on word count)
    entropy: Vec<u8>,
}

impl Zeroize for Mnemonic {
    fn zeroize(&mut self) {
        self.entropy.zeroize();
    }
}

impl Drop for Mnemonic {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Mnemonic {
    /// Generate a mnemonic from the operating system's secure random source.
    #[cfg(feature = "rand")]
    pub fn generate(word_count: usize) -> Result<Self> {
        Self::generate_with_rng(&mut rand_core::OsRng, word_count)
    }

    /// Generate a mnemonic of `word_count` words from `rng`.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(
        rng: &mut R,
        word_count: usize,
    ) -> Result<Self> {
        let bits = entropy_bits(word_count)?;

        let mut entropy = vec![0u8; bits / 8];
        rng.fill_bytes(&mut entropy);

        Ok(Self { entropy })
    }

    /// Creates a mnemonic from raw entropy bytes.
    ///
    /// Entropy length must be 16, 20, 24, 28, or 32 bytes.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        match entropy.len() {
            16 | 20 | 24 | 28 | 32 => Ok(Self {
                entropy: entropy.to_vec(),
            }),
            n => Err(Error::InvalidLength {
                expected: 32,
                actual: n,
            }),
        }
    }

    /// Parse a phrase against `wordlist`, verifying its checksum.
    ///
    /// Words may be separated by any whitespace.
    pub fn from_phrase(phrase: &str, wordlist: &Wordlist<'_>) -> Result<Self> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let expected_bits = entropy_bits(words.len())?;

        // Convert words to indices
        let mut bits = Vec::with_capacity(words.len() * BITS_PER_WORD);
        for word in &words {
            let index = wordlist
                .index_of(word)
                .ok_or_else(|| Error::InvalidWord((*word).to_owned()))?;

            for i in (0..BITS_PER_WORD).rev() {
                bits.push((index >> i) & 1 == 1);
            }
        }

        // Split into entropy and checksum
        let checksum_bits = expected_bits / 32;
        let entropy_bits = &bits[..expected_bits];
        let checksum = &bits[expected_bits..expected_bits + checksum_bits];

        let mut entropy = vec![0u8; expected_bits / 8];
        for (i, bit) in entropy_bits.iter().enumerate() {
            if *bit {
                entropy[i / 8] |= 1 << (7 - (i % 8));
            }
        }

        let hash = Sha256::digest(&entropy);
        for (i, &expected) in checksum.iter().enumerate() {
            let actual = (hash[i / 8] >> (7 - (i % 8))) & 1 == 1;
            if actual != expected {
                debug!(word_count = words.len(), "mnemonic checksum mismatch");
                entropy.zeroize();
                return Err(Error::InvalidChecksum);
            }
        }

        Ok(Self { entropy })
    }

    /// Render the phrase with `wordlist`, words joined by single spaces.
    pub fn phrase(&self, wordlist: &Wordlist<'_>) -> String {
        let hash = Sha256::digest(&self.entropy);
        let checksum_bits = self.entropy.len() / 4; // CS = ENT / 32 bits

        let total_bits = self.entropy.len() * 8 + checksum_bits;
        let mut bits = Vec::with_capacity(total_bits);

        for byte in &self.entropy {
            for i in (0..8).rev() {
                bits.push((byte >> i) & 1 == 1);
            }
        }

        for i in 0..checksum_bits {
            bits.push((hash[i / 8] >> (7 - (i % 8))) & 1 == 1);
        }

        let mut words = Vec::with_capacity(total_bits / BITS_PER_WORD);
        for chunk in bits.chunks(BITS_PER_WORD) {
            let mut index = 0u16;
            for (i, &bit) in chunk.iter().enumerate() {
                if bit {
                    index |= 1 << (BITS_PER_WORD - 1 - i);
                }
            }
            // Every 11-bit index is below the wordlist size
            if let Some(word) = wordlist.word(index) {
                words.push(word);
            }
        }

        words.join(" ")
    }

    /// Derive the 64-byte seed from this mnemonic with an optional passphrase.
    pub fn to_seed(&self, wordlist: &Wordlist<'_>, passphrase: &str) -> [u8; 64] {
        let phrase = Zeroizing::new(self.phrase(wordlist));
        let salt = Zeroizing::new(format!("mnemonic{passphrase}"));

        let mut seed = [0u8; 64];
        pbkdf2_hmac::<Sha512>(phrase.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed);

        seed
    }

    /// Get the entropy bytes.
    pub fn entropy(&self) -> &[u8] {
        &self.entropy
    }

    /// Get the word count.
    pub fn word_count(&self) -> usize {
        (self.entropy.len() * 8 + self.entropy.len() / 4) / BITS_PER_WORD
    }
}

impl core::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Mnemonic({} words)", self.word_count())
    }
}

/// Generate a new phrase of `word_count` words from the secure random source.
#[cfg(feature = "rand")]
pub fn generate(word_count: usize, wordlist: &Wordlist<'_>) -> Result<String> {
    generate_with_rng(&mut rand_core::OsRng, word_count, wordlist)
}

/// Generate a new phrase of `word_count` words from `rng`.
pub fn generate_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    word_count: usize,
    wordlist: &Wordlist<'_>,
) -> Result<String> {
    Ok(Mnemonic::generate_with_rng(rng, word_count)?.phrase(wordlist))
}

/// Validate `phrase` against `wordlist` and return the encoded entropy.
pub fn validate_and_extract_entropy(
    phrase: &str,
    wordlist: &Wordlist<'_>,
) -> Result<Zeroizing<Vec<u8>>> {
    let mnemonic = Mnemonic::from_phrase(phrase, wordlist)?;
    Ok(Zeroizing::new(mnemonic.entropy().to_vec()))
}
