use serde::{Deserialize, Serialize};

use crate::entities::{round2, RouteHistoryEntry, TransportMode};

/// kg CO2 a mature tree absorbs per year.
const TREE_KG_PER_YEAR: f64 = 21.0;
/// kg CO2 a mature tree absorbs per day.
const TREE_KG_PER_DAY: f64 = 0.057;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcoRating {
    CarbonNeutral,
    VeryLow,
    Low,
    Medium,
    High,
}

impl EcoRating {
    pub fn of(carbon_footprint: f64) -> Self {
        if carbon_footprint == 0.0 {
            Self::CarbonNeutral
        } else if carbon_footprint < 1.0 {
            Self::VeryLow
        } else if carbon_footprint < 3.0 {
            Self::Low
        } else if carbon_footprint < 8.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

fn car_baseline(distance: f64) -> f64 {
    distance * TransportMode::Car.emission_factor()
}

/// Emissions avoided by one route compared with driving it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteImpact {
    pub saved_emissions: f64,
    pub tree_days_equivalent: i64,
}

impl RouteImpact {
    pub fn versus_car(distance: f64, carbon_footprint: f64) -> Self {
        let saved = (car_baseline(distance) - carbon_footprint).max(0.0);

        Self {
            saved_emissions: round2(saved),
            tree_days_equivalent: (saved / TREE_KG_PER_DAY).round() as i64,
        }
    }
}

/// Totals over everything in the history collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSummary {
    pub routes_planned: usize,
    pub total_distance: f64,
    pub total_emitted: f64,
    pub carbon_saved: f64,
    pub trees_equivalent: i64,
}

impl ImpactSummary {
    pub fn from_history(history: &[RouteHistoryEntry]) -> Self {
        // fold from +0.0; an empty f64 sum is -0.0
        let total_distance = history
            .iter()
            .fold(0.0, |total, entry| total + entry.route.distance);
        let total_emitted = history
            .iter()
            .fold(0.0, |total, entry| total + entry.route.carbon_footprint);
        let saved = (car_baseline(total_distance) - total_emitted).max(0.0);

        Self {
            routes_planned: history.len(),
            total_distance: round2(total_distance),
            total_emitted: round2(total_emitted),
            carbon_saved: round2(saved),
            trees_equivalent: (saved / TREE_KG_PER_YEAR).round() as i64,
        }
    }
}

#[test]
fn rating_thresholds() {
    assert_eq!(EcoRating::of(0.0), EcoRating::CarbonNeutral);
    assert_eq!(EcoRating::of(0.45), EcoRating::VeryLow);
    assert_eq!(EcoRating::of(1.0), EcoRating::Low);
    assert_eq!(EcoRating::of(2.99), EcoRating::Low);
    assert_eq!(EcoRating::of(3.0), EcoRating::Medium);
    assert_eq!(EcoRating::of(8.0), EcoRating::High);
}

#[test]
fn car_route_saves_nothing() {
    let impact = RouteImpact::versus_car(10.0, 1.2);

    assert_eq!(impact.saved_emissions, 0.0);
    assert_eq!(impact.tree_days_equivalent, 0);
}

#[test]
fn cycling_route_saves_car_emissions() {
    let impact = RouteImpact::versus_car(8.0, 0.0);

    assert_eq!(impact.saved_emissions, 0.96);
    assert_eq!(impact.tree_days_equivalent, 17);
}

#[test]
fn summary_over_history() {
    use crate::entities::route::sample_route;

    let history = vec![
        RouteHistoryEntry::new(sample_route("a", TransportMode::Cycling, 100.0)),
        RouteHistoryEntry::new(sample_route("b", TransportMode::Train, 100.0)),
        RouteHistoryEntry::new(sample_route("c", TransportMode::Walking, 75.0)),
    ];

    let summary = ImpactSummary::from_history(&history);

    assert_eq!(summary.routes_planned, 3);
    assert_eq!(summary.total_distance, 275.0);
    assert_eq!(summary.total_emitted, 4.0);
    // 275 * 0.12 - 4 = 29
    assert_eq!(summary.carbon_saved, 29.0);
    assert_eq!(summary.trees_equivalent, 1);
}

#[test]
fn empty_history_summary() {
    let summary = ImpactSummary::from_history(&[]);

    assert_eq!(summary, ImpactSummary::default());
    assert!(summary.total_distance.is_sign_positive());
    assert!(summary.total_emitted.is_sign_positive());
    assert!(summary.carbon_saved.is_sign_positive());
    assert_eq!(
        serde_json::to_string(&summary).unwrap(),
        r#"{"routesPlanned":0,"totalDistance":0.0,"totalEmitted":0.0,"carbonSaved":0.0,"treesEquivalent":0}"#
    );
}
