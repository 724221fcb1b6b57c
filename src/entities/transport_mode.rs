use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Walking,
    Cycling,
    PublicTransit,
    Car,
    Train,
    Plane,
}

impl TransportMode {
    /// kg CO2 emitted per km travelled.
    pub fn emission_factor(&self) -> f64 {
        match self {
            Self::Walking | Self::Cycling => 0.0,
            Self::PublicTransit => 0.03,
            Self::Train => 0.04,
            Self::Car => 0.12,
            Self::Plane => 0.25,
        }
    }

    /// Minutes needed per km travelled.
    pub fn minutes_per_km(&self) -> f64 {
        match self {
            Self::Walking => 12.0,
            Self::Cycling => 4.0,
            Self::PublicTransit => 3.0,
            Self::Car => 1.5,
            Self::Train => 1.2,
            Self::Plane => 0.5,
        }
    }

    /// Scale applied to the shared base distance draw.
    pub fn distance_multiplier(&self) -> f64 {
        match self {
            Self::Walking => 0.7,
            Self::Cycling => 0.8,
            Self::PublicTransit | Self::Plane => 1.0,
            Self::Car => 1.2,
            Self::Train => 1.1,
        }
    }
}

#[test]
fn serializes_as_snake_case() {
    let names = [
        (TransportMode::Walking, "walking"),
        (TransportMode::Cycling, "cycling"),
        (TransportMode::PublicTransit, "public_transit"),
        (TransportMode::Car, "car"),
        (TransportMode::Train, "train"),
        (TransportMode::Plane, "plane"),
    ];

    for (mode, name) in names {
        assert_eq!(serde_json::to_string(&mode).unwrap(), format!("\"{}\"", name));
        let parsed: TransportMode = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
        assert_eq!(parsed, mode);
    }
}
