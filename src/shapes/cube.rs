//! Axis-aligned boxes.

use crate::errors::{GeometryError, PrimitiveError};
use crate::float_types::Real;
use crate::options::CubeOptions;
use crate::polygon::Shared;
use crate::properties::Properties;
use crate::shapes::{center_offset, polygon_from_points, rounded};
use crate::solid::Solid;
use crate::tag::TagCounter;
use crate::traits::{Primitive, Transform};
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

/// Corner rings of the six faces in order `-X, +X, -Y, +Y, -Z, +Z`.
///
/// ```text
/// corner index bits: 1 = +x, 2 = +y, 4 = +z
///
///       6-------7
///      /|      /|
///     4-------5 |
///     | 2-----|-3
///     |/      |/
///     0-------1
/// ```
const FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 4, 6, 2],
    [1, 3, 7, 5],
    [0, 1, 5, 4],
    [2, 6, 7, 3],
    [0, 2, 3, 1],
    [4, 5, 7, 6],
];

/// Box of half-extent `half` centred at the origin.
pub(crate) fn cuboid(half: Vector3<Real>, shared: Shared) -> Result<Solid, GeometryError> {
    let corner = |i: usize| {
        let sign = |bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
        Point3::new(half.x * sign(1), half.y * sign(2), half.z * sign(4))
    };

    let polygons = FACE_CORNERS
        .iter()
        .map(|ring| polygon_from_points(ring.iter().map(|&i| corner(i)), shared))
        .collect::<Result<Vec<_>, _>>()?;

    let mut properties = Properties::new();
    properties.insert_point("cube", "center", Point3::origin());
    Ok(Solid::from_polygons(polygons).with_properties(properties))
}

impl Primitive for CubeOptions {
    /// Six quads, or the rounded box when `round`/`radius` is set.
    ///
    /// The box is built around the origin and then always translated by the
    /// centering offset (`s/2` on every axis that is not centred), which
    /// re-derives each plane through [`crate::plane::Plane::transform`].
    #[instrument(level = "debug", skip(tags))]
    fn build(&self, tags: &TagCounter) -> Result<Solid, PrimitiveError> {
        let resolved = self.resolve()?;
        let half = resolved.size / 2.0;
        let tag = tags.next_tag();
        let shared = Shared::tagged(tag);

        let (family, solid) = match resolved.rounding {
            Some(rounding) => ("roundedCube", rounded::rounded_cuboid(half, rounding, shared)?),
            None => ("cube", cuboid(half, shared)?),
        };
        let solid = solid.translate_vector(center_offset(resolved.center, half))?;

        debug!(family, polygons = solid.polygons.len(), tag, "built solid");
        Ok(solid)
    }
}
