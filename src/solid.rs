//! The polygon soup produced by every primitive builder.

use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::polygon::Polygon;
use crate::properties::Properties;
use crate::tag::Tag;
use crate::traits::Transform;
use nalgebra::{Matrix4, Point3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A closed boundary representation: an ordered list of convex polygons whose
/// normals point outward, plus the named reference points of the primitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    pub polygons: Vec<Polygon>,
    pub properties: Properties,
}

impl Solid {
    /// Create an empty solid.
    pub fn new() -> Self {
        Solid::default()
    }

    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Solid {
            polygons,
            properties: Properties::new(),
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Tag of the first polygon; builders stamp all polygons alike.
    pub fn tag(&self) -> Option<Tag> {
        self.polygons.first().and_then(|p| p.shared.tag)
    }

    pub fn vertex_count(&self) -> usize {
        self.polygons.iter().map(|p| p.vertices.len()).sum()
    }

    /// Axis-aligned bounds `(mins, maxs)`, `None` for an empty solid.
    pub fn bounding_box(&self) -> Option<(Point3<Real>, Point3<Real>)> {
        let mut positions = self.polygons.iter().flat_map(|p| p.positions());
        let first = positions.next()?;
        Some(positions.fold((first, first), |(mins, maxs), p| {
            (mins.inf(&p), maxs.sup(&p))
        }))
    }

    /// Check every polygon (see [`Polygon::validate`]).
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.polygons.iter().try_for_each(Polygon::validate)
    }
}

impl Transform for Solid {
    /// Apply a 4x4 matrix to every polygon and to the properties.
    fn transform(&self, matrix: &Matrix4<Real>) -> Result<Solid, GeometryError> {
        #[cfg(feature = "parallel")]
        let polygons = self
            .polygons
            .par_iter()
            .map(|p| p.transform(matrix))
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(not(feature = "parallel"))]
        let polygons = self
            .polygons
            .iter()
            .map(|p| p.transform(matrix))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Solid {
            polygons,
            properties: self.properties.transform(matrix),
        })
    }
}

impl Transform for Polygon {
    fn transform(&self, matrix: &Matrix4<Real>) -> Result<Polygon, GeometryError> {
        Polygon::transform(self, matrix)
    }
}
