//! [`ChainHandle`]: the shared, atomically swappable reference to the current
//! prefix chain.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::chain::PrefixChain;
use crate::context::Context;
use crate::error::TransformError;
use crate::transformer::Transformer;

/// The single chain reference a storage client dereferences on every call.
///
/// Rotation builds a complete replacement [`PrefixChain`] off to the side and
/// [`rotate`](ChainHandle::rotate)s it in with one atomic store. Each
/// `to_storage`/`from_storage` call loads one snapshot and completes against
/// it, so in-flight reads never observe a half-updated chain and readers are
/// never blocked by a rotation.
pub struct ChainHandle {
    current: ArcSwap<PrefixChain>,
}

impl ChainHandle {
    pub fn new(chain: PrefixChain) -> Self {
        Self {
            current: ArcSwap::from_pointee(chain),
        }
    }

    /// A consistent snapshot of the current chain.
    pub fn current(&self) -> Arc<PrefixChain> {
        self.current.load_full()
    }

    /// Atomically replace the chain. Writes issued after this call use the new
    /// active generation; in-flight calls finish against the chain they
    /// loaded.
    pub fn rotate(&self, next: PrefixChain) {
        let generations = next.len();
        self.current.store(Arc::new(next));
        info!(generations, "encryption chain rotated");
    }
}

impl Transformer for ChainHandle {
    fn to_storage(&self, data: &[u8], ctx: &Context) -> Result<Vec<u8>, TransformError> {
        self.current.load().to_storage(data, ctx)
    }

    fn from_storage(
        &self,
        stored: &[u8],
        ctx: &Context,
    ) -> Result<(Vec<u8>, bool), TransformError> {
        self.current.load().from_storage(stored, ctx)
    }
}
