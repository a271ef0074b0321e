//! Primitive builders.
//!
//! Each family resolves its options, emits polygons in a fixed order with
//! planes derived from the vertex rings, and applies the centering offset as
//! a final translation of the whole solid.

use crate::errors::{GeometryError, PrimitiveError};
use crate::float_types::Real;
use crate::options::{CubeOptions, CylinderOptions, PolyhedronOptions, SphereOptions, TorusOptions};
use crate::polygon::{Polygon, Shared};
use crate::solid::Solid;
use crate::tag::TagCounter;
use crate::traits::{Primitive, Transform};
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

pub mod cube;
pub mod cylinder;
pub mod geodesic;
pub mod polyhedron;
pub mod rounded;
pub mod sphere;
pub mod torus;

impl Solid {
    /// Axis-aligned box, see [`CubeOptions`].
    pub fn cube(options: &CubeOptions, tags: &TagCounter) -> Result<Solid, PrimitiveError> {
        options.build(tags)
    }

    /// Cylinder, cone or frustum, see [`CylinderOptions`].
    pub fn cylinder(options: &CylinderOptions, tags: &TagCounter) -> Result<Solid, PrimitiveError> {
        options.build(tags)
    }

    /// Latitude-longitude or geodesic sphere, see [`SphereOptions`].
    pub fn sphere(options: &SphereOptions, tags: &TagCounter) -> Result<Solid, PrimitiveError> {
        options.build(tags)
    }

    /// Ring torus, see [`TorusOptions`].
    pub fn torus(options: &TorusOptions, tags: &TagCounter) -> Result<Solid, PrimitiveError> {
        options.build(tags)
    }

    /// Solid from explicit points and faces, see [`PolyhedronOptions`].
    pub fn polyhedron(
        options: &PolyhedronOptions,
        tags: &TagCounter,
    ) -> Result<Solid, PrimitiveError> {
        options.build(tags)
    }
}

/// Polygon from a ring of positions, plane derived from the ring.
pub(crate) fn polygon_from_points(
    points: impl IntoIterator<Item = Point3<Real>>,
    shared: Shared,
) -> Result<Polygon, GeometryError> {
    Polygon::new(points.into_iter().map(Vertex::new).collect(), shared)
}

/// Per-axis offset: `0` for centred axes, `extent` otherwise.
pub(crate) fn center_offset(center: [bool; 3], extent: Vector3<Real>) -> Vector3<Real> {
    Vector3::new(
        if center[0] { 0.0 } else { extent.x },
        if center[1] { 0.0 } else { extent.y },
        if center[2] { 0.0 } else { extent.z },
    )
}

/// Translate by `offset` unless it is exactly zero.
pub(crate) fn translate_if_offset(
    solid: Solid,
    offset: Vector3<Real>,
) -> Result<Solid, GeometryError> {
    if offset == Vector3::zeros() {
        Ok(solid)
    } else {
        solid.translate_vector(offset)
    }
}
