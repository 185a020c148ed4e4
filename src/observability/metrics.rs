//! Metrics collection.
//!
//! # Metrics
//! - `route_lookup_api_calls_total` (counter): platform calls by outcome
//! - `route_lookup_cache_lookups_total` (counter): org/space cache lookups by kind, result
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops unless a recorder is installed

pub const API_CALLS_TOTAL: &str = "route_lookup_api_calls_total";
pub const CACHE_LOOKUPS_TOTAL: &str = "route_lookup_cache_lookups_total";

/// Count one platform call. `outcome` is one of
/// `ok`, `empty`, `platform_error`, `decode_error`, `transport_error`.
/// A non-2xx reply without an error envelope fails to decode and lands in
/// `decode_error`.
pub fn record_api_call(outcome: &'static str) {
    ::metrics::counter!(API_CALLS_TOTAL, "outcome" => outcome).increment(1);
}

/// Count one cache lookup for `kind` (`space` or `org`).
pub fn record_cache_lookup(kind: &'static str, hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    ::metrics::counter!(CACHE_LOOKUPS_TOTAL, "kind" => kind, "result" => result).increment(1);
}
