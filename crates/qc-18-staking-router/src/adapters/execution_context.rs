//! Execution Context Adapters
//!
//! Implements the `ExecutionContext` port.

use crate::ports::outbound::ExecutionContext;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock timestamp with a host-driven block counter.
///
/// The host calls [`SystemExecutionContext::set_block_number`] as blocks
/// are produced.
#[derive(Debug, Default)]
pub struct SystemExecutionContext {
    block_number: AtomicU64,
}

impl SystemExecutionContext {
    /// Start at `block_number`.
    pub fn new(block_number: u64) -> Self {
        Self {
            block_number: AtomicU64::new(block_number),
        }
    }

    /// Update the current block number.
    pub fn set_block_number(&self, block_number: u64) {
        self.block_number.store(block_number, Ordering::SeqCst);
    }
}

impl ExecutionContext for SystemExecutionContext {
    fn block_timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn block_number(&self) -> u64 {
        self.block_number.load(Ordering::SeqCst)
    }
}

/// Deterministic block context for tests.
#[derive(Debug, Default)]
pub struct FixedExecutionContext {
    timestamp: AtomicU64,
    block_number: AtomicU64,
}

impl FixedExecutionContext {
    /// Fixed timestamp and block number.
    pub fn new(timestamp: u64, block_number: u64) -> Self {
        Self {
            timestamp: AtomicU64::new(timestamp),
            block_number: AtomicU64::new(block_number),
        }
    }

    /// Move to the next block, `seconds` later.
    pub fn advance(&self, seconds: u64) {
        self.timestamp.fetch_add(seconds, Ordering::SeqCst);
        self.block_number.fetch_add(1, Ordering::SeqCst);
    }
}

impl ExecutionContext for FixedExecutionContext {
    fn block_timestamp(&self) -> u64 {
        self.timestamp.load(Ordering::SeqCst)
    }

    fn block_number(&self) -> u64 {
        self.block_number.load(Ordering::SeqCst)
    }
}
