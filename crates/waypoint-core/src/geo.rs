//! Geographic primitives.
//!
//! [`Coordinate`] is validated on construction so every other type can assume
//! finite, in-range values. [`Region`] is the "centre plus span" shape used to
//! scope searches and to frame the default camera. [`MapRect`] is the
//! axis-aligned bounding box used for route viewports.

use serde::Deserialize;

use crate::CoordinateError;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Unvalidated latitude/longitude pair.
///
/// Wire and configuration shape for [`Coordinate`]. Converting into a
/// [`Coordinate`] validates ranges.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLon {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// A validated WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "LatLon")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Construct from constants known to be in range.
    pub(crate) const fn from_trusted(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub const fn lat(self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub const fn lon(self) -> f64 {
        self.lon
    }

    /// Great-circle distance to `other` in metres.
    pub fn distance_to(self, other: Self) -> f64 {
        haversine_distance(self, other)
    }

    /// Point at fraction `t` of the straight lat/lon segment towards `other`.
    ///
    /// `t` is clamped to `[0, 1]`, so the result is always in range. The
    /// endpoints are returned exactly.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        if t >= 1.0 {
            return other;
        }
        let t = t.max(0.0);
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }
}

impl TryFrom<LatLon> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: LatLon) -> Result<Self, Self::Error> {
        Self::new(value.lat, value.lon)
    }
}

impl From<Coordinate> for LatLon {
    fn from(coord: Coordinate) -> Self {
        Self { lat: coord.lat, lon: coord.lon }
    }
}

/// Haversine distance between two coordinates in metres.
pub fn haversine_distance(p1: Coordinate, p2: Coordinate) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lon = (p2.lon - p1.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_M * c
}

/// A square region described by its centre and edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Centre of the region.
    pub center: Coordinate,
    /// Edge length in metres (both north-south and east-west).
    pub span_meters: f64,
}

impl Region {
    /// Create a region centred on `center`, `span_meters` across.
    pub const fn new(center: Coordinate, span_meters: f64) -> Self {
        Self { center, span_meters }
    }

    /// Bounding box covering this region.
    ///
    /// Longitude degrees shrink with latitude; near the poles the box widens
    /// to the full longitude range rather than dividing by zero.
    pub fn bounds(&self) -> MapRect {
        let half = self.span_meters / 2.0;
        let lat_delta = half / METERS_PER_DEGREE;
        let lon_scale = self.center.lat.to_radians().cos() * METERS_PER_DEGREE;
        let lon_delta = if lon_scale > f64::EPSILON { half / lon_scale } else { 180.0 };

        MapRect {
            min_lat: (self.center.lat - lat_delta).max(-90.0),
            max_lat: (self.center.lat + lat_delta).min(90.0),
            min_lon: (self.center.lon - lon_delta).max(-180.0),
            max_lon: (self.center.lon + lon_delta).min(180.0),
        }
    }
}

/// Axis-aligned latitude/longitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRect {
    /// Southern edge.
    pub min_lat: f64,
    /// Western edge.
    pub min_lon: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Eastern edge.
    pub max_lon: f64,
}

impl MapRect {
    /// Smallest box containing every point. `None` for an empty slice.
    pub fn from_points(points: &[Coordinate]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Self {
            min_lat: first.lat,
            min_lon: first.lon,
            max_lat: first.lat,
            max_lon: first.lon,
        };

        Some(rest.iter().fold(init, |rect, p| Self {
            min_lat: rect.min_lat.min(p.lat),
            min_lon: rect.min_lon.min(p.lon),
            max_lat: rect.max_lat.max(p.lat),
            max_lon: rect.max_lon.max(p.lon),
        }))
    }

    /// Whether `coord` lies inside or on the edge of this box.
    pub fn contains(&self, coord: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.lat)
            && (self.min_lon..=self.max_lon).contains(&coord.lon)
    }

    /// Centre of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lon: (self.min_lon + self.max_lon) / 2.0,
        }
    }

    /// Grow the box by `fraction` of its size on every side.
    ///
    /// Degenerate boxes (a single point) are padded by a fixed minimum so a
    /// renderer always has a non-zero extent to work with.
    #[must_use]
    pub fn padded(&self, fraction: f64) -> Self {
        const MIN_PAD_DEGREES: f64 = 0.001;

        let lat_pad = ((self.max_lat - self.min_lat) * fraction).max(MIN_PAD_DEGREES);
        let lon_pad = ((self.max_lon - self.min_lon) * fraction).max(MIN_PAD_DEGREES);

        Self {
            min_lat: (self.min_lat - lat_pad).max(-90.0),
            min_lon: (self.min_lon - lon_pad).max(-180.0),
            max_lat: (self.max_lat + lat_pad).min(90.0),
            max_lon: (self.max_lon + lon_pad).min(180.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn rejects_invalid_coordinates() {
        assert_eq!(Coordinate::new(f64::NAN, 0.0), Err(CoordinateError::NonFinite));
        assert_eq!(Coordinate::new(90.5, 0.0), Err(CoordinateError::LatitudeOutOfRange(90.5)));
        assert_eq!(
            Coordinate::new(0.0, -180.5),
            Err(CoordinateError::LongitudeOutOfRange(-180.5))
        );
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = coord(43.64, -79.38);
        assert!(p.distance_to(p).abs() < 1e-6);
    }

    #[test]
    fn one_degree_latitude_is_about_111km() {
        let d = coord(0.0, 0.0).distance_to(coord(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn region_bounds_cover_span() {
        let center = coord(43.64161207774052, -79.38569460148615);
        let bounds = Region::new(center, 10_000.0).bounds();

        assert!(bounds.contains(center));
        let north_south = coord(bounds.min_lat, center.lon())
            .distance_to(coord(bounds.max_lat, center.lon()));
        assert!((north_south - 10_000.0).abs() < 50.0, "got {north_south}");
    }

    #[test]
    fn rect_from_points() {
        let rect = MapRect::from_points(&[coord(1.0, 5.0), coord(-2.0, 3.0), coord(0.5, 7.0)]);
        assert_eq!(
            rect,
            Some(MapRect { min_lat: -2.0, min_lon: 3.0, max_lat: 1.0, max_lon: 7.0 })
        );
        assert_eq!(MapRect::from_points(&[]), None);
    }

    #[test]
    fn padded_point_has_extent() {
        let rect = MapRect::from_points(&[coord(10.0, 10.0)]).unwrap().padded(0.1);
        assert!(rect.max_lat > rect.min_lat);
        assert!(rect.max_lon > rect.min_lon);
    }

    #[test]
    fn latlon_conversion_rejects_out_of_range() {
        let raw = LatLon { lat: 100.0, lon: 0.0 };
        assert!(Coordinate::try_from(raw).is_err());
    }

    proptest! {
        #[test]
        fn prop_rect_contains_all_points(
            raw in prop::collection::vec((-89.0f64..89.0, -179.0f64..179.0), 1..20)
        ) {
            let points: Vec<_> = raw.iter().map(|&(lat, lon)| coord(lat, lon)).collect();
            let rect = MapRect::from_points(&points).unwrap();
            for p in &points {
                prop_assert!(rect.contains(*p));
            }
        }

        #[test]
        fn prop_lerp_stays_on_segment(t in -1.0f64..2.0) {
            let a = coord(10.0, 20.0);
            let b = coord(12.0, 18.0);
            let p = a.lerp(b, t);
            let rect = MapRect::from_points(&[a, b]).unwrap();
            prop_assert!(rect.contains(p));
        }
    }
}
