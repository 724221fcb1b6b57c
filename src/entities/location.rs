use geo_types::{Coord, Rect};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

// geo-types uses x = longitude, y = latitude
impl From<Coordinates> for Coord<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Coord {
            x: coordinates.lng,
            y: coordinates.lat,
        }
    }
}

impl From<Coord<f64>> for Coordinates {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

/// Axis-aligned box a map view fits its viewport to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapBounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl MapBounds {
    pub fn enclosing<'a, I>(first: Coordinates, rest: I) -> Self
    where
        I: IntoIterator<Item = &'a Coordinates>,
    {
        let start: Coord<f64> = first.into();
        let rect = rest.into_iter().fold(Rect::new(start, start), |rect, point| {
            let point: Coord<f64> = (*point).into();
            Rect::new(
                Coord {
                    x: rect.min().x.min(point.x),
                    y: rect.min().y.min(point.y),
                },
                Coord {
                    x: rect.max().x.max(point.x),
                    y: rect.max().y.max(point.y),
                },
            )
        });

        Self {
            south_west: rect.min().into(),
            north_east: rect.max().into(),
        }
    }
}

#[test]
fn bounds_enclose_every_point() {
    let points = [
        Coordinates::new(17.40, 78.50),
        Coordinates::new(17.30, 78.55),
        Coordinates::new(17.35, 78.42),
    ];

    let bounds = MapBounds::enclosing(points[0], &points[1..]);

    assert_eq!(bounds.south_west, Coordinates::new(17.30, 78.42));
    assert_eq!(bounds.north_east, Coordinates::new(17.40, 78.55));
}

#[test]
fn geo_coord_uses_lng_as_x() {
    let coord: Coord<f64> = Coordinates::new(17.385, 78.4867).into();

    assert_eq!(coord.x, 78.4867);
    assert_eq!(coord.y, 17.385);
    assert_eq!(Coordinates::from(coord), Coordinates::new(17.385, 78.4867));
}
