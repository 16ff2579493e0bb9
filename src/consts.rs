/// Memories shown side by side on one journal spread.
pub const RECORDS_PER_PAGE: usize = 2;

/// Mean Earth radius used by the haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Horizontal travel a swipe needs before it turns the page.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Window over which sample memories get their back-dated `created_at`.
pub const SAMPLE_SPREAD_DAYS: i64 = 30;
