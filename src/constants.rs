//! Stable application-wide constants.
//!
//! Values here are fare formula coefficients, structural invariants, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! Proximity thresholds that are expected to be tuned per municipality live in
//! [`FareConfig`](crate::config::FareConfig) and only take their defaults from here.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Geometry ---

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- Service area and proximity defaults ---

/// Trips longer than this are outside the municipality service area.
pub const DEFAULT_SERVICE_AREA_KM: f64 = 20.0;
/// Degree-space distance treated as "on the corridor road" (~300 m).
pub const DEFAULT_CORRIDOR_THRESHOLD_DEG: f64 = 0.003;
/// Degree-space distance within which an origin counts as being at a terminal (~300 m).
pub const DEFAULT_AT_TERMINAL_THRESHOLD_DEG: f64 = 0.003;
/// Degree-space distance within which a destination matches a fixed fare row (~1 km).
pub const DEFAULT_SAME_ZONE_THRESHOLD_DEG: f64 = 0.01;
/// Real distance from the alighting point below which the last stretch is walked.
pub const DEFAULT_WALK_THRESHOLD_KM: f64 = 0.5;

// --- Jeepney fare fallback (used when no tier qualifies) ---

/// Minimum jeepney fare floor.
pub const JEEPNEY_MINIMUM_FARE: f64 = 12.0;
/// Per-kilometer jeepney rate applied to the rounded-up distance.
pub const JEEPNEY_FALLBACK_PER_KM: f64 = 2.0;

// --- Tricycle special-trip formula ---

/// Flat boarding fare covering the first kilometer.
pub const SPECIAL_TRIP_BASE_FARE: f64 = 40.0;
/// Kilometers covered by the flat boarding fare.
pub const SPECIAL_TRIP_BASE_KM: f64 = 1.0;
/// Increment per kilometer beyond the first.
pub const SPECIAL_TRIP_PER_KM: f64 = 8.0;

// --- Discounts ---

/// System-wide reduction for students, seniors and PWDs (20%).
pub const DISCOUNT_RATE: f64 = 0.20;

// --- Presentation ---

/// Currency marker used for every fare string.
pub const CURRENCY_SYMBOL: &str = "₱";

// --- Directions provider ---

/// Maximum alternatives kept from a single directions response.
pub const MAX_CANDIDATE_PATHS: usize = 5;
/// Default TTL for cached directions responses: 1 hour. Overridden by `DIRECTIONS_CACHE_TTL`.
pub const DEFAULT_DIRECTIONS_CACHE_TTL_SECONDS: u64 = 3_600;
/// Maximum entries for the in-memory directions cache.
pub const DEFAULT_DIRECTIONS_CACHE_MAX_ENTRIES: u64 = 1_000;
/// Default timeout for a directions request. Overridden by `DIRECTIONS_TIMEOUT_MS`.
pub const DEFAULT_DIRECTIONS_TIMEOUT_MS: u64 = 8_000;
/// Cache key precision: 4 decimals is roughly 11 m.
pub const DIRECTIONS_CACHE_KEY_DECIMALS: u32 = 4;

// --- Narration ---

/// Default timeout for each narrator provider. Overridden by `NARRATOR_TIMEOUT_MS`.
pub const DEFAULT_NARRATOR_TIMEOUT_MS: u64 = 4_000;
