//! Free-preview quota gate.
//!
//! A process-lifetime counter: every incoming generation request is counted,
//! valid or not, and once the limit is crossed all further requests are
//! rejected until the daemon restarts. There is deliberately no time-window
//! reset.

use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of free generations per daemon lifetime.
pub const DEFAULT_FREE_REQUESTS: u64 = 5;

/// Returned when the gate rejects a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("free request limit of {limit} reached")]
pub struct QuotaExceeded {
    pub limit: u64,
}

/// Counts requests against a fixed limit.
///
/// Shared behind an `Arc` in the daemon state; the atomic keeps the count
/// exact under concurrent requests.
#[derive(Debug)]
pub struct QuotaGate {
    limit: u64,
    served: AtomicU64,
}

impl QuotaGate {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            served: AtomicU64::new(0),
        }
    }

    /// Count one request. `Ok(n)` carries the request's 1-based sequence
    /// number; `Err` means the limit was already used up.
    pub fn try_acquire(&self) -> Result<u64, QuotaExceeded> {
        let n = self.served.fetch_add(1, Ordering::Relaxed) + 1;
        if n > self.limit {
            Err(QuotaExceeded { limit: self.limit })
        } else {
            Ok(n)
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Total requests counted so far, including rejected ones.
    pub fn served(&self) -> u64 {
        self.served.load(Ordering::Relaxed)
    }

    /// Free requests left before the gate locks.
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.served())
    }
}

impl Default for QuotaGate {
    fn default() -> Self {
        Self::new(DEFAULT_FREE_REQUESTS)
    }
}
