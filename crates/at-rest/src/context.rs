//! [`Context`]: the authenticated associated data for one transform call.

/// Extrinsic bytes bound to a ciphertext as AEAD associated data.
///
/// A context ties a stored value to its logical identity — typically the
/// record's storage key — so that one record's ciphertext cannot be
/// substituted for another's. It is authenticated but never encrypted and
/// never persisted: the caller must reconstruct the exact same bytes at
/// decrypt time. A mismatched context is indistinguishable from corruption
/// and fails decryption, by design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    aad: Vec<u8>,
}

impl Context {
    /// Wrap the given bytes as the associated data for a transform call.
    pub fn new(aad: impl Into<Vec<u8>>) -> Self {
        Self { aad: aad.into() }
    }

    /// The raw associated data bytes.
    pub fn authenticated_data(&self) -> &[u8] {
        &self.aad
    }
}

impl From<&[u8]> for Context {
    fn from(aad: &[u8]) -> Self {
        Self::new(aad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_the_wrapped_bytes() {
        let ctx = Context::new(b"/registry/pods/default/mypod".as_slice());
        assert_eq!(ctx.authenticated_data(), b"/registry/pods/default/mypod");
    }

    #[test]
    fn equal_bytes_compare_equal() {
        assert_eq!(Context::new(b"k".as_slice()), Context::from(b"k".as_slice()));
    }
}
