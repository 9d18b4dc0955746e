//! Prefix-tagged transformer chain: multiplexes key generations by prepending
//! a caller-configured byte prefix to every stored value.

use std::sync::Arc;

use tracing::debug;

use crate::context::Context;
use crate::error::TransformError;
use crate::transformer::Transformer;

/// One key generation in a [`PrefixChain`]: the prefix written in front of the
/// sealed bytes and the transformer that produced them.
pub struct PrefixEntry {
    prefix: Vec<u8>,
    transformer: Arc<dyn Transformer>,
}

impl PrefixEntry {
    pub fn new(prefix: impl Into<Vec<u8>>, transformer: Arc<dyn Transformer>) -> Self {
        Self {
            prefix: prefix.into(),
            transformer,
        }
    }
}

/// Ordered registry of key generations.
///
/// Entry 0 is the *active* generation: every write delegates to it and carries
/// its prefix. All later entries are *legacy*, retained only so ciphertext
/// written before a rotation stays readable; reads served by them are flagged
/// stale. The chain is immutable after construction — rotation builds a new
/// chain and swaps the reference the storage client holds (see
/// [`crate::ChainHandle`]), never mutates this one.
///
/// Prefixes match first-wins in construction order. If one configured prefix
/// is a byte-prefix of another, declaration order decides which matches;
/// avoiding that ambiguity is the configuring caller's responsibility.
pub struct PrefixChain {
    entries: Vec<PrefixEntry>,
    no_match: TransformError,
}

impl std::fmt::Debug for PrefixChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixChain")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl PrefixChain {
    /// Build a chain from an ordered list of generations and the sentinel
    /// error returned when no configured prefix matches a stored value.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Construction`] if `entries` is empty — a
    /// chain with no active generation can never encrypt.
    pub fn new(
        no_match: TransformError,
        entries: Vec<PrefixEntry>,
    ) -> Result<Self, TransformError> {
        if entries.is_empty() {
            return Err(TransformError::Construction(
                "prefix chain requires at least one entry".into(),
            ));
        }
        Ok(Self { entries, no_match })
    }

    /// Number of key generations in the chain.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Transformer for PrefixChain {
    fn to_storage(&self, data: &[u8], ctx: &Context) -> Result<Vec<u8>, TransformError> {
        let active = &self.entries[0];
        let inner = active.transformer.to_storage(data, ctx)?;
        let mut out = Vec::with_capacity(active.prefix.len() + inner.len());
        out.extend_from_slice(&active.prefix);
        out.extend_from_slice(&inner);
        Ok(out)
    }

    fn from_storage(
        &self,
        stored: &[u8],
        ctx: &Context,
    ) -> Result<(Vec<u8>, bool), TransformError> {
        for (index, entry) in self.entries.iter().enumerate() {
            if !stored.starts_with(&entry.prefix) {
                continue;
            }
            let (plaintext, stale) =
                entry.transformer.from_storage(&stored[entry.prefix.len()..], ctx)?;
            if index > 0 {
                debug!(generation = index, "value read via legacy key generation");
            }
            return Ok((plaintext, stale || index > 0));
        }
        Err(self.no_match.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformer::MockTransformer;

    fn ctx() -> Context {
        Context::new(b"authenticated_data".as_slice())
    }

    fn sentinel() -> TransformError {
        TransformError::NoMatchingPrefix("no matching key generation".into())
    }

    fn passthrough(stale: bool) -> Arc<dyn Transformer> {
        let mut mock = MockTransformer::new();
        mock.expect_to_storage()
            .returning(|data, _| Ok(data.to_vec()));
        mock.expect_from_storage()
            .returning(move |stored, _| Ok((stored.to_vec(), stale)));
        Arc::new(mock)
    }

    #[test]
    fn writes_go_through_the_first_entry_only() {
        let mut legacy = MockTransformer::new();
        legacy.expect_to_storage().never();
        let chain = PrefixChain::new(
            sentinel(),
            vec![
                PrefixEntry::new(b"new:".as_slice(), passthrough(false)),
                PrefixEntry::new(b"old:".as_slice(), Arc::new(legacy)),
            ],
        )
        .unwrap();
        let out = chain.to_storage(b"payload", &ctx()).unwrap();
        assert_eq!(out, b"new:payload");
    }

    #[test]
    fn active_entry_reads_are_not_stale() {
        let chain = PrefixChain::new(
            sentinel(),
            vec![PrefixEntry::new(b"v1:".as_slice(), passthrough(false))],
        )
        .unwrap();
        let (plain, stale) = chain.from_storage(b"v1:payload", &ctx()).unwrap();
        assert_eq!(plain, b"payload");
        assert!(!stale);
    }

    #[test]
    fn legacy_entry_reads_are_stale() {
        let chain = PrefixChain::new(
            sentinel(),
            vec![
                PrefixEntry::new(b"v2:".as_slice(), passthrough(false)),
                PrefixEntry::new(b"v1:".as_slice(), passthrough(false)),
            ],
        )
        .unwrap();
        let (plain, stale) = chain.from_storage(b"v1:payload", &ctx()).unwrap();
        assert_eq!(plain, b"payload");
        assert!(stale);
    }

    #[test]
    fn inner_staleness_propagates_from_the_active_entry() {
        let chain = PrefixChain::new(
            sentinel(),
            vec![PrefixEntry::new(b"v1:".as_slice(), passthrough(true))],
        )
        .unwrap();
        let (_, stale) = chain.from_storage(b"v1:payload", &ctx()).unwrap();
        assert!(stale);
    }

    #[test]
    fn unknown_prefix_yields_the_configured_sentinel() {
        let chain = PrefixChain::new(
            sentinel(),
            vec![PrefixEntry::new(b"v1:".as_slice(), passthrough(false))],
        )
        .unwrap();
        let err = chain.from_storage(b"v9:payload", &ctx()).unwrap_err();
        assert_eq!(err, sentinel());
    }

    #[test]
    fn first_match_wins_when_one_prefix_prefixes_another() {
        // "v1:" is declared before the longer "v1:beta:"; declaration order
        // decides, so the short prefix captures the read.
        let chain = PrefixChain::new(
            sentinel(),
            vec![
                PrefixEntry::new(b"v1:".as_slice(), passthrough(false)),
                PrefixEntry::new(b"v1:beta:".as_slice(), passthrough(false)),
            ],
        )
        .unwrap();
        let (plain, stale) = chain.from_storage(b"v1:beta:payload", &ctx()).unwrap();
        assert_eq!(plain, b"beta:payload");
        assert!(!stale);
    }

    #[test]
    fn matched_entry_errors_propagate_without_fallback() {
        let mut failing = MockTransformer::new();
        failing
            .expect_from_storage()
            .returning(|_, _| Err(TransformError::DecryptFailed));
        let mut untouched = MockTransformer::new();
        untouched.expect_from_storage().never();
        let chain = PrefixChain::new(
            sentinel(),
            vec![
                PrefixEntry::new(b"v2:".as_slice(), Arc::new(failing)),
                PrefixEntry::new(b"v1:".as_slice(), Arc::new(untouched)),
            ],
        )
        .unwrap();
        let err = chain.from_storage(b"v2:garbage", &ctx()).unwrap_err();
        assert_eq!(err, TransformError::DecryptFailed);
    }

    #[test]
    fn empty_chain_is_rejected_at_construction() {
        let err = PrefixChain::new(sentinel(), Vec::new()).unwrap_err();
        assert!(matches!(err, TransformError::Construction(_)));
    }
}
