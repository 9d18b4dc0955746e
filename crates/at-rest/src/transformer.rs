//! The [`Transformer`] capability: the two-operation contract every concrete
//! encryption scheme implements.

use crate::context::Context;
use crate::error::TransformError;

/// A reversible transformation applied to values on their way to and from
/// durable storage.
///
/// Implementations are immutable after construction and safe to share across
/// threads without coordination; each call's nonce and context are call-local.
/// The chain layer holds transformers behind `Arc<dyn Transformer>` so a key
/// generation can be shared between the outgoing and incoming chain during a
/// rotation.
#[cfg_attr(test, mockall::automock)]
pub trait Transformer: Send + Sync {
    /// Seal `data` for storage under the given context.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::EncryptFailed`] if the underlying AEAD seal
    /// fails.
    fn to_storage(&self, data: &[u8], ctx: &Context) -> Result<Vec<u8>, TransformError>;

    /// Open `stored` bytes back into plaintext under the given context.
    ///
    /// The returned flag is `true` when the value was readable but was not
    /// written by the currently active key generation — the caller should
    /// schedule a rewrite through [`Transformer::to_storage`] so the value
    /// migrates to the active key.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::DataTooShort`] if `stored` is shorter than
    /// the scheme's fixed framing, and [`TransformError::DecryptFailed`] if
    /// authentication fails for any reason.
    fn from_storage(&self, stored: &[u8], ctx: &Context)
        -> Result<(Vec<u8>, bool), TransformError>;
}
