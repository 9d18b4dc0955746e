//! Error types shared across the transformer layer.

use thiserror::Error;

/// Errors produced by value transformers and the prefix chain.
///
/// Nothing in this layer retries or suppresses a failure: every error
/// propagates synchronously to the storage client, which decides whether a
/// failed decryption means "refuse to serve", "treat as corruption", or
/// "escalate". Retrying inside this layer would be meaningless — the same
/// bytes fail the same way every time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Invalid key material or chain configuration supplied at construction.
    #[error("invalid transformer construction: {0}")]
    Construction(String),

    /// The AEAD seal operation failed. Unreachable with a valid key and nonce.
    #[error("encryption failed")]
    EncryptFailed,

    /// The stored input is shorter than the fixed nonce framing. Always a
    /// caller/storage bug or truncation.
    #[error("stored data is shorter than the {need}-byte nonce")]
    DataTooShort { need: usize },

    /// AEAD authentication failed. Deliberately covers wrong key, tampered
    /// ciphertext, and context mismatch uniformly — distinguishing them would
    /// hand an attacker a decryption oracle.
    #[error("decryption failed")]
    DecryptFailed,

    /// No configured prefix matched the stored bytes. The message is the
    /// sentinel the chain was configured with, so callers can tell "unknown
    /// key generation" apart from other failures.
    #[error("no matching prefix: {0}")]
    NoMatchingPrefix(String),
}
