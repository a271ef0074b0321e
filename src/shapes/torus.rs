//! Ring tori, revolving a circular profile about the Z axis.

use crate::errors::{GeometryError, PrimitiveError};
use crate::float_types::{Real, TAU};
use crate::options::{ResolvedTorus, TorusOptions};
use crate::polygon::{Polygon, Shared};
use crate::properties::Properties;
use crate::shapes::polygon_from_points;
use crate::solid::Solid;
use crate::tag::TagCounter;
use crate::traits::Primitive;
use nalgebra::Point3;
use tracing::{debug, instrument};

/// Quad corners as produced by the revolution, before plane derivation.
type RawQuad = [[Real; 3]; 4];

/// Profile circle in the XZ half plane: `(ro + ri cos α, ri sin α)`.
fn profile(torus: &ResolvedTorus) -> Vec<(Real, Real)> {
    (0..torus.fni)
        .map(|k| {
            let alpha = TAU * k as Real / torus.fni as Real + torus.roti;
            (torus.ro + torus.ri * alpha.cos(), torus.ri * alpha.sin())
        })
        .collect()
}

/// Revolve every profile side through `fno` steps of the full turn.
fn revolve(torus: &ResolvedTorus) -> Vec<RawQuad> {
    let profile = profile(torus);
    let turns: Vec<(Real, Real)> = (0..torus.fno)
        .map(|i| {
            let beta = TAU * i as Real / torus.fno as Real;
            (beta.cos(), beta.sin())
        })
        .collect();
    let at = |(x, z): (Real, Real), i: usize| {
        let (cos, sin) = turns[i % torus.fno];
        [x * cos, -x * sin, z]
    };

    let mut quads = Vec::with_capacity(torus.fno * torus.fni);
    for i in 1..=torus.fno {
        for k in 0..torus.fni {
            let a = profile[(k + torus.fni - 1) % torus.fni];
            let b = profile[k];
            quads.push([at(a, i - 1), at(b, i - 1), at(b, i), at(a, i)]);
        }
    }
    quads
}

fn quad_to_polygon(quad: &RawQuad, shared: Shared) -> Result<Polygon, GeometryError> {
    polygon_from_points(quad.iter().map(|&[x, y, z]| Point3::new(x, y, z)), shared)
}

pub(crate) fn torus(resolved: &ResolvedTorus, shared: Shared) -> Result<Solid, GeometryError> {
    let polygons = revolve(resolved)
        .iter()
        .map(|quad| quad_to_polygon(quad, shared))
        .collect::<Result<Vec<_>, _>>()?;

    let mut properties = Properties::new();
    properties.insert_point("torus", "center", Point3::origin());
    Ok(Solid::from_polygons(polygons).with_properties(properties))
}

impl Primitive for TorusOptions {
    /// `fno × fni` quads around the origin, axis along Z.
    #[instrument(level = "debug", skip(tags))]
    fn build(&self, tags: &TagCounter) -> Result<Solid, PrimitiveError> {
        let resolved = self.resolve()?;
        let tag = tags.next_tag();
        let solid = torus(&resolved, Shared::tagged(tag))?;
        debug!(family = "torus", polygons = solid.polygons.len(), tag, "built solid");
        Ok(solid)
    }
}
