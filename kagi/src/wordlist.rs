//! Mnemonic wordlists.
//!
//! A [`Wordlist`] is an ordered list of exactly 2048 distinct words, so that
//! every 11-bit group of a mnemonic maps to one word. The standard BIP-39
//! lists come from the `bip39` crate; enable the `all-languages` feature for
//! lists other than English.

use std::collections::HashSet;

pub use bip39::Language;

use crate::error::{Error, Result};

/// A validated 2048-word mnemonic wordlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wordlist<'a> {
    words: &'a [&'a str],
}

impl<'a> Wordlist<'a> {
    /// Number of words every wordlist must contain.
    pub const SIZE: usize = 2048;

    /// Validate and wrap a list of words.
    ///
    /// Fails with [`Error::InvalidWordlist`] unless `words` has exactly 2048
    /// entries, and with [`Error::DuplicateWord`] if any entry repeats.
    pub fn new(words: &'a [&'a str]) -> Result<Self> {
        if words.len() != Self::SIZE {
            return Err(Error::InvalidWordlist(words.len()));
        }

        let mut seen = HashSet::with_capacity(Self::SIZE);
        for word in words {
            if !seen.insert(*word) {
                return Err(Error::DuplicateWord((*word).to_owned()));
            }
        }

        Ok(Self { words })
    }

    /// The standard English BIP-39 wordlist.
    pub fn english() -> Wordlist<'static> {
        Wordlist::from(Language::English)
    }

    /// Word at `index`, if `index < 2048`.
    #[inline]
    pub fn word(&self, index: u16) -> Option<&'a str> {
        self.words.get(usize::from(index)).copied()
    }

    /// Position of `word` in the list.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.words
            .iter()
            .position(|w| *w == word)
            .and_then(|i| u16::try_from(i).ok())
    }

    /// All words in order.
    pub const fn words(&self) -> &'a [&'a str] {
        self.words
    }
}

impl From<Language> for Wordlist<'static> {
    fn from(language: Language) -> Self {
        Self {
            words: language.word_list(),
        }
    }
}
