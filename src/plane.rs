//! Oriented planes (`normal · p = w`) carried by every polygon.

use crate::errors::GeometryError;
use crate::float_types::{Real, tolerance};
use crate::vertex::{Vertex, apply_homogeneous};
use nalgebra::{Matrix4, Point3, Vector3};

/// Rounding slack, in ulps of the squared ring size, allowed per fan cross
/// product before a ring counts as collinear.
const CANCELLATION_ULPS: Real = 16.0;

/// A plane in 3D space defined by a unit normal and an offset `w`.
///
/// The normal points to the *outside* of the polygon that owns the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a plane from a normal and offset. The normal is rescaled to
    /// unit length, `w` is interpreted against the rescaled normal.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Result<Plane, GeometryError> {
        let len = normal.norm();
        if !len.is_finite() || len <= tolerance() {
            return Err(GeometryError::DegenerateNormal(Point3::from(normal * w)));
        }
        Ok(Plane {
            normal: normal / len,
            w: w / len,
        })
    }

    /// Plane through three points, oriented counter-clockwise `a → b → c`.
    pub fn from_points(
        a: &Point3<Real>,
        b: &Point3<Real>,
        c: &Point3<Real>,
    ) -> Result<Plane, GeometryError> {
        let ab = b - a;
        let ac = c - a;
        let extent = ab.norm_squared().max(ac.norm_squared());
        Plane::from_normal_sum(ab.cross(&ac), extent, 1, a)
    }

    /// Plane of a polygon ring.
    ///
    /// **Algorithm**: accumulate the fan cross products
    /// `Σ (v[i+1] - v0) × (v[i+2] - v0)`, which is twice the vector area of the
    /// ring and therefore robust for slightly non-planar or nearly collinear
    /// input. For a triangle this is exactly the single cross product.
    pub fn from_vertices(vertices: &[Vertex]) -> Result<Plane, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        let anchor = vertices[0].pos;
        let mut extent: Real = 0.0;
        for v in &vertices[1..] {
            extent = extent.max((v.pos - anchor).norm_squared());
        }

        let mut sum = (vertices[1].pos - anchor).cross(&(vertices[2].pos - anchor));
        for pair in vertices[2..].windows(2) {
            sum += (pair[0].pos - anchor).cross(&(pair[1].pos - anchor));
        }
        Plane::from_normal_sum(sum, extent, vertices.len() - 2, &anchor)
    }

    /// Normalise an accumulated cross product of `terms` fan triangles.
    ///
    /// `extent` is the squared size of the ring. A cross product of edges no
    /// longer than `√extent` carries a rounding error of a few ulps of
    /// `extent`, so anything below that bound is cancellation noise and the
    /// ring is collinear. Long thin faces stay well above it.
    fn from_normal_sum(
        sum: Vector3<Real>,
        extent: Real,
        terms: usize,
        anchor: &Point3<Real>,
    ) -> Result<Plane, GeometryError> {
        let len = sum.norm();
        if !len.is_finite() || !extent.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate(*anchor));
        }
        let noise = CANCELLATION_ULPS * terms as Real * Real::EPSILON * extent;
        if extent == 0.0 || len <= noise {
            return Err(GeometryError::DegenerateNormal(*anchor));
        }
        let normal = sum / len;
        Ok(Plane {
            normal,
            w: ordered_dot(&normal, &anchor.coords),
        })
    }

    /// Point on the plane closest to the origin.
    pub fn origin_point(&self) -> Point3<Real> {
        Point3::from(self.normal * self.w)
    }

    /// Positive in front of the plane (the outside), negative behind it.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Reverse the orientation in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Copy with the orientation reversed.
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Transform the plane with a 4x4 matrix.
    ///
    /// Three points of the plane (the foot point plus two offsets along an
    /// in-plane basis) are pushed through the matrix and the plane is rebuilt
    /// from them, so non-uniform scales and projective matrices stay exact.
    /// Mirroring matrices flip the result to keep the normal outward.
    pub fn transform(&self, matrix: &Matrix4<Real>) -> Result<Plane, GeometryError> {
        let u = self.normal.cross(&least_dominant_axis(&self.normal));
        let v = self.normal.cross(&u);

        let p1 = self.origin_point();
        let p2 = p1 + u;
        let p3 = p1 + v;

        let (p1, _) = apply_homogeneous(matrix, &p1);
        let (p2, _) = apply_homogeneous(matrix, &p2);
        let (p3, _) = apply_homogeneous(matrix, &p3);

        let plane = Plane::from_points(&p1, &p2, &p3)?;
        Ok(if is_mirroring(matrix) {
            plane.flipped()
        } else {
            plane
        })
    }
}

/// `a · b` summed strictly as `x + y + z` so an all-negative-zero result
/// stays `-0.0`.
pub(crate) fn ordered_dot(a: &Vector3<Real>, b: &Vector3<Real>) -> Real {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Unit axis along the smallest absolute component of `v` (ties resolve to
/// x, then y). Never parallel to a non-zero `v`.
pub(crate) fn least_dominant_axis(v: &Vector3<Real>) -> Vector3<Real> {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    }
}

/// `true` when the linear part of `matrix` reverses handedness.
pub(crate) fn is_mirroring(matrix: &Matrix4<Real>) -> bool {
    matrix.fixed_view::<3, 3>(0, 0).determinant() < 0.0
}
