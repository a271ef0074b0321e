//! Struct and functions for working with `Vertex`s from which `Polygon`s are composed.

use crate::float_types::Real;
use nalgebra::{Matrix4, Point3};

/// A vertex of a polygon.
///
/// `weight` holds the homogeneous coordinate of the last projective transform
/// that produced this vertex. It stays `None` for constructed vertices and
/// for vertices that only went through affine transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub weight: Option<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`]. The position is **copied verbatim**: signed
    /// zeros and non-finite values are kept as given, see [`Vertex::is_finite`].
    #[inline]
    pub const fn new(pos: Point3<Real>) -> Self {
        Vertex { pos, weight: None }
    }

    /// `true` when no coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.pos.coords.iter().all(|c| c.is_finite())
    }

    /// Apply a 4x4 transform, tracking the homogeneous weight.
    ///
    /// # Example
    /// ```rust
    /// # use nalgebra::{Matrix4, Point3, Vector3};
    /// # use solidgen::vertex::Vertex;
    /// let v = Vertex::new(Point3::new(1.0, 2.0, 3.0));
    /// let moved = v.transform(&Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0)));
    /// assert_eq!(moved.pos, Point3::new(2.0, 2.0, 3.0));
    /// assert_eq!(moved.weight, None, "affine transforms leave the weight untouched");
    /// ```
    pub fn transform(&self, matrix: &Matrix4<Real>) -> Vertex {
        let (pos, weight) = apply_homogeneous(matrix, &self.pos);
        Vertex {
            pos,
            weight: weight.or(self.weight),
        }
    }

    /// Euclidean distance between vertex positions.
    pub fn distance_to(&self, other: &Vertex) -> Real {
        (self.pos - other.pos).norm()
    }
}

impl From<Point3<Real>> for Vertex {
    fn from(pos: Point3<Real>) -> Self {
        Vertex::new(pos)
    }
}

/// Multiplies `[x, y, z, 1]` by `matrix` and projects back to 3D.
///
/// Terms are summed left to right in a fixed order so that signed zeros come
/// out the same on every run. The second value is the homogeneous `w` when it
/// differs from `1`.
pub(crate) fn apply_homogeneous(
    matrix: &Matrix4<Real>,
    pos: &Point3<Real>,
) -> (Point3<Real>, Option<Real>) {
    let (x, y, z) = (pos.x, pos.y, pos.z);
    let row = |r: usize| {
        x * matrix[(r, 0)] + y * matrix[(r, 1)] + z * matrix[(r, 2)] + matrix[(r, 3)]
    };
    let (px, py, pz, w) = (row(0), row(1), row(2), row(3));

    if w != 1.0 {
        let inv_w = 1.0 / w;
        (Point3::new(px * inv_w, py * inv_w, pz * inv_w), Some(w))
    } else {
        (Point3::new(px, py, pz), None)
    }
}
