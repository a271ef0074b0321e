//! Convex planar polygons and the per-face data they share.

use crate::errors::GeometryError;
use crate::float_types::{Real, tolerance};
use crate::plane::{Plane, is_mirroring};
use crate::tag::Tag;
use crate::vertex::Vertex;
use nalgebra::{Matrix4, Point3};
use serde::Deserialize;

/// RGBA colour with components in `[0, 1]`.
///
/// Deserializes from `[r, g, b]` (opaque) or `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f32>")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }
}

impl TryFrom<Vec<f32>> for Color {
    type Error = String;

    fn try_from(components: Vec<f32>) -> Result<Self, Self::Error> {
        match components.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
            other => Err(format!(
                "a colour has 3 or 4 components, got {}",
                other.len()
            )),
        }
    }
}

/// Per-face attributes shared by every polygon of one face.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Shared {
    pub color: Option<Color>,
    pub tag: Option<Tag>,
}

impl Shared {
    pub const fn tagged(tag: Tag) -> Self {
        Shared {
            color: None,
            tag: Some(tag),
        }
    }

    pub const fn with_color(self, color: Option<Color>) -> Self {
        Shared { color, ..self }
    }
}

/// A convex planar polygon, vertices in counter-clockwise order when seen
/// from the outside of the solid.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub shared: Shared,
    pub plane: Plane,
}

impl Polygon {
    /// Create a polygon and derive its plane from the vertex ring.
    ///
    /// Fails on rings with fewer than three vertices, non-finite coordinates
    /// or a degenerate (zero-area) outline.
    pub fn new(vertices: Vec<Vertex>, shared: Shared) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate(bad.pos));
        }
        let plane = Plane::from_vertices(&vertices)?;
        Ok(Polygon {
            vertices,
            shared,
            plane,
        })
    }

    /// Create a polygon with a plane already known to fit the vertices.
    pub const fn with_plane(vertices: Vec<Vertex>, shared: Shared, plane: Plane) -> Self {
        Polygon {
            vertices,
            shared,
            plane,
        }
    }

    /// Reverse winding order and flip the plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Transform vertices and plane. Mirroring matrices also reverse the ring
    /// so the winding stays counter-clockwise from outside.
    pub fn transform(&self, matrix: &Matrix4<Real>) -> Result<Polygon, GeometryError> {
        let mut vertices: Vec<Vertex> = self.vertices.iter().map(|v| v.transform(matrix)).collect();
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate(bad.pos));
        }
        let plane = self.plane.transform(matrix)?;
        if is_mirroring(matrix) {
            vertices.reverse();
        }
        Ok(Polygon {
            vertices,
            shared: self.shared,
            plane,
        })
    }

    /// Arithmetic mean of the vertex positions.
    pub fn centroid(&self) -> Point3<Real> {
        let sum = self
            .vertices
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, v| acc + v.pos.coords);
        Point3::from(sum / self.vertices.len() as Real)
    }

    /// Iterate over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Point3<Real>> + '_ {
        self.vertices.iter().map(|v| v.pos)
    }

    /// Check the polygon invariants: at least three finite vertices, a unit
    /// normal and every vertex on the plane within [`tolerance`].
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(self.vertices.len()));
        }
        let eps = tolerance();
        let len = self.plane.normal.norm();
        if !len.is_finite() || (len - 1.0).abs() > eps {
            return Err(GeometryError::NonUnitNormal(len));
        }
        for v in &self.vertices {
            if !v.is_finite() {
                return Err(GeometryError::NonFiniteCoordinate(v.pos));
            }
            // relative to the polygon size so large solids are not rejected
            let distance = self.plane.signed_distance(&v.pos);
            let scale = 1.0 + v.pos.coords.amax();
            if distance.abs() > eps * scale {
                return Err(GeometryError::NotPlanar {
                    point: v.pos,
                    distance,
                });
            }
        }
        Ok(())
    }
}
