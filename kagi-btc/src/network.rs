//! Network profiles.

use core::fmt;
use core::str::FromStr;

/// Version-byte prefixes that tie encoded keys to one network.
///
/// Profiles are immutable values. The standard ones are the [`MAINNET`] and
/// [`TESTNET`] constants; other Bitcoin-style chains can declare their own
/// with [`NetworkProfile::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkProfile {
    name: &'static str,
    private_key_prefix: u8,
    public_key_hash_prefix: u8,
}

/// Bitcoin mainnet: WIF prefix `0x80`, P2PKH prefix `0x00`.
pub const MAINNET: NetworkProfile = NetworkProfile::new("mainnet", 0x80, 0x00);

/// Bitcoin testnet: WIF prefix `0xEF`, P2PKH prefix `0x6F`.
pub const TESTNET: NetworkProfile = NetworkProfile::new("testnet", 0xef, 0x6f);

impl NetworkProfile {
    /// Declare a network profile.
    pub const fn new(
        name: &'static str,
        private_key_prefix: u8,
        public_key_hash_prefix: u8,
    ) -> Self {
        Self {
            name,
            private_key_prefix,
            public_key_hash_prefix,
        }
    }

    /// Human-readable network name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Version byte of WIF-encoded private keys.
    #[inline]
    pub const fn private_key_prefix(&self) -> u8 {
        self.private_key_prefix
    }

    /// Version byte of P2PKH addresses.
    #[inline]
    pub const fn public_key_hash_prefix(&self) -> u8 {
        self.public_key_hash_prefix
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Supported Bitcoin networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Bitcoin mainnet.
    #[default]
    Mainnet,
    /// Bitcoin testnet.
    Testnet,
}

impl Network {
    /// The version-byte profile of this network.
    #[inline]
    #[must_use]
    pub const fn profile(self) -> NetworkProfile {
        match self {
            Self::Mainnet => MAINNET,
            Self::Testnet => TESTNET,
        }
    }

    /// Get network name as string.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.profile().name()
    }
}

impl From<Network> for NetworkProfile {
    fn from(network: Network) -> Self {
        network.profile()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown network name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNetworkError(String);

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown network \"{}\", expected mainnet or testnet", self.0)
    }
}

impl std::error::Error for ParseNetworkError {}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(ParseNetworkError(s.to_owned())),
        }
    }
}
