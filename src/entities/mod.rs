mod history;
mod impact;
mod location;
pub(crate) mod route;
mod transport_mode;

pub use history::{group_by_day, HistoryDay, RouteHistoryEntry};
pub use impact::{EcoRating, ImpactSummary, RouteImpact};
pub use location::{Coordinates, MapBounds};
pub use route::{Route, RouteDetails};
pub use transport_mode::TransportMode;

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
