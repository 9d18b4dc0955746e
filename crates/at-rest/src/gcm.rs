//! AES-GCM value transformer: the reference authenticated-encryption scheme.
//!
//! **Do NOT reuse a nonce.** GCM nonce reuse under the same key is
//! catastrophic — it breaks both confidentiality and authentication. Every
//! [`Transformer::to_storage`] call draws a fresh random nonce from the OS
//! CSPRNG.

use aes_gcm::{
    aead::{consts::U12, Aead, KeyInit, OsRng, Payload},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};

use crate::context::Context;
use crate::error::TransformError;
use crate::transformer::Transformer;

/// Byte length of the GCM nonce written at the front of every stored value.
///
/// This is a permanent on-disk compatibility contract, not a tunable: changing
/// it makes every previously written value unreadable. A conformance test
/// asserts it against the underlying primitive so a library upgrade cannot
/// silently shift it.
pub const NONCE_LEN: usize = 12;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// AES-GCM with the key size fixed at construction.
enum Cipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl Cipher {
    fn seal(&self, nonce: &[u8], payload: Payload<'_, '_>) -> Result<Vec<u8>, aes_gcm::Error> {
        match self {
            Cipher::Aes128(c) => c.encrypt(Nonce::from_slice(nonce), payload),
            Cipher::Aes192(c) => c.encrypt(Nonce::from_slice(nonce), payload),
            Cipher::Aes256(c) => c.encrypt(Nonce::from_slice(nonce), payload),
        }
    }

    fn open(&self, nonce: &[u8], payload: Payload<'_, '_>) -> Result<Vec<u8>, aes_gcm::Error> {
        match self {
            Cipher::Aes128(c) => c.decrypt(Nonce::from_slice(nonce), payload),
            Cipher::Aes192(c) => c.decrypt(Nonce::from_slice(nonce), payload),
            Cipher::Aes256(c) => c.decrypt(Nonce::from_slice(nonce), payload),
        }
    }
}

/// AEAD transformer sealing values as `nonce ∥ ciphertext ∥ tag`.
///
/// Holds one symmetric key, fixed at construction; stateless and immutable
/// thereafter, so any number of threads may call it concurrently. It never
/// reports `stale = true` itself — staleness is a property of chain position,
/// decided one layer up in [`crate::PrefixChain`].
pub struct GcmTransformer {
    cipher: Cipher,
}

impl std::fmt::Debug for GcmTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcmTransformer").finish_non_exhaustive()
    }
}

impl GcmTransformer {
    /// Build a transformer from raw AES key material.
    ///
    /// The key length selects the cipher: 16 bytes for AES-128, 24 for
    /// AES-192, 32 for AES-256.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Construction`] for any other key length.
    pub fn new(key: &[u8]) -> Result<Self, TransformError> {
        let invalid =
            |_| TransformError::Construction(format!("invalid AES key length: {}", key.len()));
        let cipher = match key.len() {
            16 => Cipher::Aes128(Aes128Gcm::new_from_slice(key).map_err(invalid)?),
            24 => Cipher::Aes192(Aes192Gcm::new_from_slice(key).map_err(invalid)?),
            32 => Cipher::Aes256(Aes256Gcm::new_from_slice(key).map_err(invalid)?),
            n => {
                return Err(TransformError::Construction(format!(
                    "invalid AES key length: {n} bytes (expected 16, 24, or 32)"
                )))
            }
        };
        Ok(Self { cipher })
    }
}

impl Transformer for GcmTransformer {
    fn to_storage(&self, data: &[u8], ctx: &Context) -> Result<Vec<u8>, TransformError> {
        // Fresh random nonce per call, from the OS CSPRNG.
        use aes_gcm::aead::rand_core::RngCore;
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let sealed = self
            .cipher
            .seal(
                &nonce,
                Payload {
                    msg: data,
                    aad: ctx.authenticated_data(),
                },
            )
            .map_err(|_| TransformError::EncryptFailed)?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    fn from_storage(
        &self,
        stored: &[u8],
        ctx: &Context,
    ) -> Result<(Vec<u8>, bool), TransformError> {
        if stored.len() < NONCE_LEN {
            return Err(TransformError::DataTooShort { need: NONCE_LEN });
        }
        let (nonce, sealed) = stored.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .open(
                nonce,
                Payload {
                    msg: sealed,
                    aad: ctx.authenticated_data(),
                },
            )
            .map_err(|_| TransformError::DecryptFailed)?;
        Ok((plaintext, false))
    }
}
