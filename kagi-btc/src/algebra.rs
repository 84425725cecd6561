//! Private key arithmetic modulo the curve order.
//!
//! Used for split-key vanity generation: two parties each hold a private
//! key, and the sum or product of the scalars is the final key.

use k256::Scalar;
use kagi::{Error, Result};

use crate::private_key::PrivateKey;

/// How to treat two operands holding the same secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombinePolicy {
    /// Combine identical keys like any other pair.
    #[default]
    AllowIdentical,
    /// Fail with [`Error::IdenticalKeys`] when both secrets are equal.
    RejectIdentical,
}

/// Add two private keys modulo `n`.
pub fn add(a: &PrivateKey, b: &PrivateKey) -> Result<PrivateKey> {
    add_with_policy(a, b, CombinePolicy::default())
}

/// Multiply two private keys modulo `n`.
pub fn multiply(a: &PrivateKey, b: &PrivateKey) -> Result<PrivateKey> {
    multiply_with_policy(a, b, CombinePolicy::default())
}

/// Add two private keys modulo `n` under `policy`.
pub fn add_with_policy(
    a: &PrivateKey,
    b: &PrivateKey,
    policy: CombinePolicy,
) -> Result<PrivateKey> {
    combine(a, b, policy, |x, y| x + y)
}

/// Multiply two private keys modulo `n` under `policy`.
pub fn multiply_with_policy(
    a: &PrivateKey,
    b: &PrivateKey,
    policy: CombinePolicy,
) -> Result<PrivateKey> {
    combine(a, b, policy, |x, y| x * y)
}

/// The result takes the network and compression preference of `a`.
fn combine(
    a: &PrivateKey,
    b: &PrivateKey,
    policy: CombinePolicy,
    op: impl FnOnce(Scalar, Scalar) -> Scalar,
) -> Result<PrivateKey> {
    if a.network() != b.network() {
        return Err(Error::NetworkMismatch {
            expected: a.network().name(),
            actual: b.network().name(),
        });
    }
    if policy == CombinePolicy::RejectIdentical && a.same_secret(b) {
        return Err(Error::IdenticalKeys);
    }

    let scalar = op(*a.secret().as_ref(), *b.secret().as_ref());
    // Zero is the only out-of-range result once reduced
    PrivateKey::from_scalar(scalar, a.network(), a.is_compressed())
}
