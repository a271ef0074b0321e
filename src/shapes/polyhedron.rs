//! Solids from explicit point and face lists.

use crate::errors::{GeometryError, PrimitiveError};
use crate::float_types::Real;
use crate::options::{PolyhedronOptions, ResolvedPolyhedron, Winding};
use crate::polygon::{Polygon, Shared};
use crate::properties::Properties;
use crate::solid::Solid;
use crate::tag::{Tag, TagCounter};
use crate::traits::Primitive;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

pub(crate) fn polyhedron(
    resolved: &ResolvedPolyhedron,
    tag: Option<Tag>,
) -> Result<Solid, GeometryError> {
    let centroid = Point3::from(
        resolved
            .points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords)
            / resolved.points.len() as Real,
    );

    let mut polygons = Vec::with_capacity(resolved.faces.len());
    for (face, color) in resolved.faces.iter().zip(&resolved.colors) {
        let shared = Shared { color: *color, tag };
        let ring: Vec<Vertex> = face.iter().map(|&i| Vertex::new(resolved.points[i])).collect();
        let polygon = match resolved.winding {
            Winding::Clockwise => Polygon::new(ring.into_iter().rev().collect(), shared)?,
            Winding::AsGiven => Polygon::new(ring, shared)?,
            Winding::Outward => {
                let mut polygon = Polygon::new(ring, shared)?;
                if polygon.plane.normal.dot(&(polygon.centroid() - centroid)) < 0.0 {
                    polygon.flip();
                }
                polygon
            }
        };
        polygons.push(polygon);
    }

    let mut properties = Properties::new();
    properties.insert_point("polyhedron", "center", centroid);
    Ok(Solid::from_polygons(polygons).with_properties(properties))
}

impl Primitive for PolyhedronOptions {
    /// One polygon per face, in input order.
    #[instrument(level = "debug", skip_all, fields(points = self.points.len()))]
    fn build(&self, tags: &TagCounter) -> Result<Solid, PrimitiveError> {
        let resolved = self.resolve()?;
        let tag = tags.next_tag();
        let solid = polyhedron(&resolved, Some(tag))?;
        debug!(family = "polyhedron", polygons = solid.polygons.len(), tag, "built solid");
        Ok(solid)
    }
}
