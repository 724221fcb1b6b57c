use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, EcoRating, MapBounds, RouteImpact, TransportMode};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub start_name: String,
    pub end_name: String,
    pub start_coordinates: Coordinates,
    pub end_coordinates: Coordinates,
    /// km
    pub distance: f64,
    /// minutes
    pub duration: i64,
    /// kg CO2
    pub carbon_footprint: f64,
    pub transport_mode: TransportMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Coordinates>>,
    pub date: DateTime<Utc>,
}

impl Route {
    pub fn eco_rating(&self) -> EcoRating {
        EcoRating::of(self.carbon_footprint)
    }

    pub fn impact(&self) -> RouteImpact {
        RouteImpact::versus_car(self.distance, self.carbon_footprint)
    }

    pub fn bounds(&self) -> MapBounds {
        let mut rest = vec![self.end_coordinates];
        if let Some(path) = &self.path {
            rest.extend(path.iter().copied());
        }

        MapBounds::enclosing(self.start_coordinates, &rest)
    }
}

/// A route as shown on its details view.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDetails {
    pub route: Route,
    pub eco_rating: EcoRating,
    pub impact: RouteImpact,
    pub bounds: MapBounds,
    pub is_saved: bool,
}

impl RouteDetails {
    pub fn new(route: Route, is_saved: bool) -> Self {
        Self {
            eco_rating: route.eco_rating(),
            impact: route.impact(),
            bounds: route.bounds(),
            route,
            is_saved,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_route(id: &str, mode: TransportMode, distance: f64) -> Route {
    let start = Coordinates::new(17.40, 78.45);
    let end = Coordinates::new(17.35, 78.52);

    Route {
        id: id.into(),
        start_name: "Hyderabad".into(),
        end_name: "Secunderabad".into(),
        start_coordinates: start,
        end_coordinates: end,
        distance,
        duration: (distance * mode.minutes_per_km()).round() as i64,
        carbon_footprint: crate::entities::round2(distance * mode.emission_factor()),
        transport_mode: mode,
        path: Some(vec![start, end]),
        date: Utc::now(),
    }
}

#[test]
fn serializes_with_camel_case_keys() {
    let route = sample_route("abc", TransportMode::PublicTransit, 10.0);
    let value = serde_json::to_value(&route).unwrap();

    assert_eq!(value["startName"], "Hyderabad");
    assert_eq!(value["transportMode"], "public_transit");
    assert_eq!(value["carbonFootprint"], 0.3);
    assert!(value["date"].as_str().unwrap().contains('T'));
}

#[test]
fn route_without_path_parses() {
    let mut route = sample_route("abc", TransportMode::Car, 8.0);
    route.path = None;

    let json = serde_json::to_string(&route).unwrap();
    assert!(!json.contains("\"path\""));

    let parsed: Route = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, route);
    assert_eq!(
        parsed.bounds(),
        MapBounds::enclosing(route.start_coordinates, &[route.end_coordinates])
    );
}
