//! Authenticated encryption at rest for key-value storage, with online key
//! rotation.
//!
//! Values are sealed by a [`Transformer`] before they reach durable storage and
//! opened on the way back out. The reference scheme is AES-GCM
//! ([`GcmTransformer`]); a [`PrefixChain`] multiplexes several key generations
//! by tagging each stored value with a short byte prefix, always encrypting
//! with the newest generation while still decrypting the older ones.
//!
//! This crate is intentionally free of network, KMS, and configuration
//! dependencies. It is consumed in-process by a storage client that owns key
//! configuration and rotation scheduling.
//!
//! # Stored-bytes format
//!
//! ```text
//! stored_bytes = prefix ∥ inner_blob
//! inner_blob   = nonce(12 bytes) ∥ ciphertext ∥ authentication tag(16 bytes)
//! ```
//!
//! The prefix identifies which key generation produced the value; its bytes and
//! length are caller-configured, not self-describing. The authenticated context
//! ([`Context`]) is never serialized — the caller must re-derive it identically
//! at read time from the record's own identity, typically its storage key.
//!
//! # Key rotation
//!
//! To rotate, build a new [`PrefixChain`] with the new generation at position 0
//! and the previous generations behind it, then swap it into the
//! [`ChainHandle`] the storage client dereferences. New writes pick up the new
//! key immediately; reads of old ciphertext keep working and surface
//! `stale = true`, prompting the caller to rewrite them. Once no old ciphertext
//! remains, rotate again to a chain that omits the retired generation.

pub mod chain;
pub mod context;
pub mod error;
pub mod gcm;
pub mod handle;
pub mod transformer;

pub use chain::{PrefixChain, PrefixEntry};
pub use context::Context;
pub use error::TransformError;
pub use gcm::{GcmTransformer, NONCE_LEN};
pub use handle::ChainHandle;
pub use transformer::Transformer;
