//! Point types and related functionality

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Tolerance on the squared norm for a vector to count as unit length
const UNIT_NORM2_TOLERANCE: f64 = 1e-14;

/// A point on the unit sphere, stored as a unit-length direction vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point(pub Vector3d);

impl Point {
    /// Create a point from raw coordinates, projecting it onto the unit sphere
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        let v = Vector3d::new(x, y, z);
        let norm = v.norm();
        if norm > 0.0 {
            Self(v / norm)
        } else {
            Self(v)
        }
    }

    /// Wrap a vector as-is, without normalizing it
    pub fn from_vector(v: Vector3d) -> Self {
        Self(v)
    }

    pub fn from_latlng(latlng: LatLng) -> Self {
        let (sin_lat, cos_lat) = latlng.lat.sin_cos();
        let (sin_lng, cos_lng) = latlng.lng.sin_cos();
        Self(Vector3d::new(cos_lat * cos_lng, cos_lat * sin_lng, sin_lat))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Borrow the underlying direction vector
    pub fn coords(&self) -> &Vector3d {
        &self.0
    }

    /// Coordinates as a plain array, the form the spatial index works with
    pub fn to_array(&self) -> [f64; 3] {
        [self.0.x, self.0.y, self.0.z]
    }

    pub fn to_latlng(&self) -> LatLng {
        let lat = self.0.z.atan2((self.0.x * self.0.x + self.0.y * self.0.y).sqrt());
        let lng = self.0.y.atan2(self.0.x);
        LatLng { lat, lng }
    }

    /// Angle in radians between the two direction vectors
    pub fn angle(&self, other: &Point) -> f64 {
        vector_angle(&self.0, &other.0)
    }

    /// A vector orthogonal to both points, computed as `(a + b) x (b - a)`.
    ///
    /// This is twice `a x b` but loses far less precision when the points are
    /// nearly identical.
    pub fn point_cross(&self, other: &Point) -> Vector3d {
        (self.0 + other.0).cross(&(other.0 - self.0))
    }

    pub fn is_unit(&self) -> bool {
        (self.0.norm_squared() - 1.0).abs() <= UNIT_NORM2_TOLERANCE
    }

    pub fn is_antipodal(&self, other: &Point) -> bool {
        self.0 == -other.0
    }
}

impl From<LatLng> for Point {
    fn from(latlng: LatLng) -> Self {
        Point::from_latlng(latlng)
    }
}

/// Angle between two arbitrary vectors, stable for both small and large angles
pub fn vector_angle(a: &Vector3d, b: &Vector3d) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// A latitude/longitude pair, stored in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn from_radians(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        Self {
            lat: lat.to_radians(),
            lng: lng.to_radians(),
        }
    }

    pub fn lat_degrees(&self) -> f64 {
        self.lat.to_degrees()
    }

    pub fn lng_degrees(&self) -> f64 {
        self.lng.to_degrees()
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180] degrees
    pub fn is_valid(&self) -> bool {
        self.lat.abs() <= FRAC_PI_2 && self.lng.abs() <= PI
    }
}

impl From<Point> for LatLng {
    fn from(point: Point) -> Self {
        point.to_latlng()
    }
}
