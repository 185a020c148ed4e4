//! Org/space lookups for grouping and retargeting.
//!
//! # Data Flow
//! ```text
//! space GUID (from a route or application)
//!     → cache.rs (space by GUID, memoized)
//!     → cache.rs (owning org by GUID, memoized)
//!     → (Organization, Space)
//! ```

pub mod cache;

pub use cache::OrgSpaceCache;
