//! Mock route generation.
//!
//! There is no geocoding or path-finding behind a search: both endpoints are
//! jittered around a fixed city centre, distances are drawn from a uniform
//! range and scaled per mode, and the path is a straight-line interpolation.
//! Durations and carbon footprints are derived from the rounded distance so
//! every emitted route satisfies
//! `carbon_footprint == round2(distance * emission_factor)` and
//! `duration == round(distance * minutes_per_km)`.

use chrono::Utc;
use geo_types::{Coord, Line};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use uuid::Builder;

use crate::entities::{round1, round2, Coordinates, Route, TransportMode};

/// Hyderabad.
pub const CITY_CENTER: Coordinates = Coordinates {
    lat: 17.3850,
    lng: 78.4867,
};

/// Degrees of independent jitter applied to each axis of each endpoint.
pub const JITTER_DEGREES: f64 = 0.1;

/// Segments between start and end; the path carries one more point.
pub const PATH_SEGMENTS: usize = 5;

/// Modes produced by a default search, in generation order. Plane is left
/// out on purpose.
pub const DEFAULT_MODES: [TransportMode; 5] = [
    TransportMode::Walking,
    TransportMode::Cycling,
    TransportMode::PublicTransit,
    TransportMode::Car,
    TransportMode::Train,
];

const BASE_DISTANCE_KM: (f64, f64) = (5.0, 15.0);
const PLANE_DISTANCE_KM: (f64, f64) = (200.0, 1000.0);
const WALKING_MAX_KM: f64 = 5.0;
const CYCLING_MAX_KM: f64 = 10.0;

pub struct Generator<R> {
    rng: R,
    center: Coordinates,
    jitter: Uniform<f64>,
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R) -> Self {
        Self::with_center(rng, CITY_CENTER)
    }

    pub fn with_center(rng: R, center: Coordinates) -> Self {
        Self {
            rng,
            center,
            jitter: Uniform::new(-JITTER_DEGREES, JITTER_DEGREES),
        }
    }

    /// One route per default mode, ordered by ascending carbon footprint.
    pub fn generate_routes(&mut self, start_name: &str, end_name: &str) -> Vec<Route> {
        self.generate_for_modes(start_name, end_name, &DEFAULT_MODES)
    }

    /// One route per given mode, ordered by ascending carbon footprint. Ties
    /// keep the order of `modes`.
    pub fn generate_for_modes(
        &mut self,
        start_name: &str,
        end_name: &str,
        modes: &[TransportMode],
    ) -> Vec<Route> {
        let mut routes: Vec<Route> = modes
            .iter()
            .map(|mode| self.generate_route(start_name, end_name, *mode))
            .collect();

        routes.sort_by(|a, b| a.carbon_footprint.total_cmp(&b.carbon_footprint));

        tracing::debug!(
            "generated {} routes from {:?} to {:?}",
            routes.len(),
            start_name,
            end_name
        );

        routes
    }

    pub fn generate_route(
        &mut self,
        start_name: &str,
        end_name: &str,
        mode: TransportMode,
    ) -> Route {
        let start = self.jittered_center();
        let end = self.jittered_center();

        let distance = round1(self.draw_distance(mode));
        let duration = (distance * mode.minutes_per_km()).round() as i64;
        let carbon_footprint = round2(distance * mode.emission_factor());

        Route {
            id: self.next_id(),
            start_name: start_name.into(),
            end_name: end_name.into(),
            start_coordinates: start,
            end_coordinates: end,
            distance,
            duration,
            carbon_footprint,
            transport_mode: mode,
            path: Some(interpolate_path(start, end, PATH_SEGMENTS)),
            date: Utc::now(),
        }
    }

    fn jittered_center(&mut self) -> Coordinates {
        Coordinates {
            lat: self.center.lat + self.jitter.sample(&mut self.rng),
            lng: self.center.lng + self.jitter.sample(&mut self.rng),
        }
    }

    fn draw_distance(&mut self, mode: TransportMode) -> f64 {
        let base = self.rng.gen_range(BASE_DISTANCE_KM.0..BASE_DISTANCE_KM.1);
        let distance = base * mode.distance_multiplier();

        match mode {
            TransportMode::Walking => distance.min(WALKING_MAX_KM),
            TransportMode::Cycling => distance.min(CYCLING_MAX_KM),
            TransportMode::Plane => self
                .rng
                .gen_range(PLANE_DISTANCE_KM.0..PLANE_DISTANCE_KM.1),
            _ => distance,
        }
    }

    fn next_id(&mut self) -> String {
        Builder::from_random_bytes(self.rng.gen())
            .into_uuid()
            .to_string()
    }
}

/// `segments + 1` evenly spaced points from `start` to `end` inclusive.
pub fn interpolate_path(
    start: Coordinates,
    end: Coordinates,
    segments: usize,
) -> Vec<Coordinates> {
    let line = Line::new(Coord::from(start), Coord::from(end));
    let delta = line.delta();

    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            Coordinates::from(line.start + delta * t)
        })
        .collect()
}

#[cfg(test)]
fn seeded(seed: u64) -> Generator<rand::rngs::StdRng> {
    use rand::SeedableRng;

    Generator::new(rand::rngs::StdRng::seed_from_u64(seed))
}

#[test]
fn one_route_per_default_mode_sorted_by_footprint() {
    for seed in 0..50 {
        let routes = seeded(seed).generate_routes("Hyderabad", "Secunderabad");

        assert_eq!(routes.len(), 5);
        for mode in DEFAULT_MODES {
            assert_eq!(
                routes.iter().filter(|r| r.transport_mode == mode).count(),
                1
            );
        }
        assert!(routes
            .windows(2)
            .all(|pair| pair[0].carbon_footprint <= pair[1].carbon_footprint));
        assert!(routes
            .iter()
            .all(|r| r.transport_mode != TransportMode::Plane));
    }
}

#[test]
fn footprint_and_duration_follow_distance() {
    for seed in 0..50 {
        for route in seeded(seed).generate_routes("A", "B") {
            let mode = route.transport_mode;

            assert_eq!(
                route.carbon_footprint,
                round2(route.distance * mode.emission_factor())
            );
            assert_eq!(
                route.duration,
                (route.distance * mode.minutes_per_km()).round() as i64
            );
            assert_eq!(route.distance, round1(route.distance));
            assert!(route.distance > 0.0);
        }
    }
}

#[test]
fn walking_and_cycling_are_capped() {
    for seed in 0..200 {
        for route in seeded(seed).generate_routes("A", "B") {
            match route.transport_mode {
                TransportMode::Walking => assert!(route.distance <= 5.0),
                TransportMode::Cycling => assert!(route.distance <= 10.0),
                _ => {}
            }
        }
    }
}

#[test]
fn endpoints_stay_near_center() {
    for route in seeded(7).generate_routes("A", "B") {
        for point in [route.start_coordinates, route.end_coordinates] {
            assert!((point.lat - CITY_CENTER.lat).abs() <= JITTER_DEGREES + 1e-9);
            assert!((point.lng - CITY_CENTER.lng).abs() <= JITTER_DEGREES + 1e-9);
        }
    }
}

#[test]
fn path_is_linear_interpolation() {
    for route in seeded(3).generate_routes("A", "B") {
        let path = route.path.clone().unwrap();
        let (start, end) = (route.start_coordinates, route.end_coordinates);

        assert_eq!(path.len(), 6);
        assert_eq!(path[0], start);
        assert!((path[5].lat - end.lat).abs() < 1e-9);
        assert!((path[5].lng - end.lng).abs() < 1e-9);

        for (i, point) in path.iter().enumerate() {
            let t = i as f64 / 5.0;
            assert!((point.lat - (start.lat + (end.lat - start.lat) * t)).abs() < 1e-9);
            assert!((point.lng - (start.lng + (end.lng - start.lng) * t)).abs() < 1e-9);
        }
    }
}

#[test]
fn same_seed_same_routes() {
    let a = seeded(42).generate_routes("A", "B");
    let b = seeded(42).generate_routes("A", "B");

    for (left, right) in a.iter().zip(&b) {
        assert_eq!(left.id, right.id);
        assert_eq!(left.distance, right.distance);
        assert_eq!(left.start_coordinates, right.start_coordinates);
    }
}

#[test]
fn ids_are_unique_within_a_search() {
    let routes = seeded(11).generate_routes("A", "B");
    let mut ids: Vec<_> = routes.iter().map(|r| r.id.clone()).collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 5);
}

#[test]
fn plane_draws_long_distance() {
    for seed in 0..50 {
        let route = seeded(seed).generate_route("A", "B", TransportMode::Plane);

        assert!(route.distance >= 200.0 && route.distance <= 1000.0);
        assert_eq!(route.carbon_footprint, round2(route.distance * 0.25));
    }
}

#[test]
fn hyderabad_to_secunderabad() {
    let routes = seeded(2024).generate_routes("Hyderabad", "Secunderabad");

    assert_eq!(routes.len(), 5);
    assert_eq!(routes[0].transport_mode, TransportMode::Walking);
    assert_eq!(routes[1].transport_mode, TransportMode::Cycling);
    assert_eq!(routes[0].carbon_footprint, 0.0);
    assert_eq!(routes[1].carbon_footprint, 0.0);
    assert!(routes
        .iter()
        .all(|r| r.start_name == "Hyderabad" && r.end_name == "Secunderabad"));
}
