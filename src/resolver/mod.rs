//! Hostname resolution subsystem.
//!
//! # Data Flow
//! ```text
//! hostname (possibly wildcarded)
//!     → domain.rs (suffix candidates → registered domain, most specific wins)
//!     → route.rs (domain routes filtered by wildcard.rs)
//!     → application.rs (route → bound applications, mapping or direct)
//! ```
//!
//! # Design Decisions
//! - Resolvers borrow a shared PlatformClient, no state of their own
//! - "Nothing found" is an empty/None result, never an error
//! - Application lookup is a trait so the platform API strategy is configurable

pub mod application;
pub mod domain;
pub mod route;
pub mod wildcard;

pub use application::{resolver_for, ApplicationResolver, DirectResolver, MappingResolver};
pub use domain::{candidate_domains, DomainResolver};
pub use route::{MatchedRoute, RouteResolver};
pub use wildcard::WildcardMatcher;
