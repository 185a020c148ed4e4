//! Lookup orchestration.
//!
//! # Data Flow
//! ```text
//! hostname + retarget flag
//!     → orchestrator.rs (domain → routes → applications)
//!     → sort by space GUID, group via targets::OrgSpaceCache
//!     → report.rs events to a ReportSink as groups are built
//!     → LookupOutcome (NotBound | Bound(Report)) or LookupError
//! ```
//!
//! # Design Decisions
//! - Domain not found, no matching route and unbound route are all soft outcomes
//! - The cache is owned by the lookup, never process-wide
//! - Retarget uses the first bound application in presentation order

pub mod error;
pub mod orchestrator;
pub mod report;

pub use error::{LookupError, LookupResult};
pub use orchestrator::{normalize_hostname, RouteLookup};
pub use report::{
    Binding, Discard, LookupEvent, LookupOutcome, NotBoundReason, Report, ReportSink, RetargetOutcome, SpaceGroup,
};
