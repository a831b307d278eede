//! Proxy pool with cyclic assignment
//!
//! Assignment is a pure function of the ordinal: the same ordinal always
//! maps to the same proxy within a run, with no cursor state to drift.

mod descriptor;
mod source;

pub use descriptor::{ProxyDescriptor, ProxyScheme};
pub use source::{load_pool, SourceError};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("proxy pool must contain at least one proxy")]
pub struct EmptyPoolError;

/// Ordered, immutable set of proxies, assigned round-robin by ordinal.
#[derive(Debug, Clone)]
pub struct ProxyPool {
    entries: Vec<ProxyDescriptor>,
}

impl ProxyPool {
    /// Build a pool. An empty descriptor list is rejected; cyclic
    /// assignment is meaningless over an empty pool.
    pub fn new(entries: Vec<ProxyDescriptor>) -> Result<Self, EmptyPoolError> {
        if entries.is_empty() {
            return Err(EmptyPoolError);
        }
        Ok(Self { entries })
    }

    /// Proxy assigned to a 1-based profile ordinal: `(ordinal - 1) mod len`.
    pub fn proxy_at(&self, ordinal: u32) -> &ProxyDescriptor {
        debug_assert!(ordinal >= 1, "ordinals are 1-based");
        let index = ordinal.saturating_sub(1) as usize % self.entries.len();
        &self.entries[index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
