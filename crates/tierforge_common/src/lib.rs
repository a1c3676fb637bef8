//! Shared types and logic for the tierforge daemon and CLI.
//!
//! Holds the wire types for the generation endpoint, the free-preview
//! quota gate, and the tier segmenter that splits raw model output into
//! SUPPORT / CORE / CHALLENGE sections.

pub mod quota;
pub mod segmenter;
pub mod types;

pub use quota::{QuotaExceeded, QuotaGate};
pub use segmenter::{segment_tasks, SegmentedTasks, Tier};
pub use types::{ErrorResponse, GenerateRequest, GenerateResponse, HealthResponse, YearGroup};
