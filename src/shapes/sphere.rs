//! Latitude-longitude spheres and the shared lat-long grid.

use crate::errors::{GeometryError, PrimitiveError};
use crate::float_types::{FRAC_PI_2, Real, TAU};
use crate::options::{SphereKind, SphereOptions};
use crate::polygon::{Polygon, Shared};
use crate::properties::Properties;
use crate::shapes::{center_offset, geodesic, polygon_from_points, translate_if_offset};
use crate::solid::Solid;
use crate::tag::TagCounter;
use crate::traits::Primitive;
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

/// Lat-long sampling of a sphere as offsets from its center.
///
/// Longitude `i` runs over `segments` slices of the ring spanned by `x` and
/// `y`; latitude `s` runs from the equator (`0`) to the pole (`bands`) along
/// `axis`. Longitudes wrap and the pole is exact, so neighbouring cells share
/// vertices bit for bit.
pub(crate) struct SphereGrid {
    rings: Vec<Vector3<Real>>,
    pitches: Vec<(Real, Real)>,
    axis: Vector3<Real>,
}

impl SphereGrid {
    pub(crate) fn new(
        x: Vector3<Real>,
        y: Vector3<Real>,
        axis: Vector3<Real>,
        segments: usize,
        bands: usize,
    ) -> SphereGrid {
        let rings = (0..segments)
            .map(|i| {
                let angle = TAU * i as Real / segments as Real;
                x * angle.cos() + y * angle.sin()
            })
            .collect();
        let pitches = (0..=bands)
            .map(|s| {
                if s == bands {
                    (0.0, 1.0)
                } else {
                    let pitch = FRAC_PI_2 * s as Real / bands as Real;
                    (pitch.cos(), pitch.sin())
                }
            })
            .collect();
        SphereGrid {
            rings,
            pitches,
            axis,
        }
    }

    pub(crate) fn bands(&self) -> usize {
        self.pitches.len() - 1
    }

    /// Equator ring direction of longitude `i`.
    pub(crate) fn ring(&self, i: usize) -> Vector3<Real> {
        self.rings[i % self.rings.len()]
    }

    /// Point of the lower (`-axis`) hemisphere.
    pub(crate) fn lower(&self, i: usize, s: usize) -> Vector3<Real> {
        let (cos, sin) = self.pitches[s];
        self.ring(i) * cos - self.axis * sin
    }

    /// Point of the upper (`+axis`) hemisphere.
    pub(crate) fn upper(&self, i: usize, s: usize) -> Vector3<Real> {
        let (cos, sin) = self.pitches[s];
        self.ring(i) * cos + self.axis * sin
    }

    /// Outward ring of the lower cell between longitudes `i-1..i` and
    /// latitudes `s-1..s`; a triangle at the pole.
    pub(crate) fn lower_cell(&self, i: usize, s: usize) -> Vec<Vector3<Real>> {
        let mut cell = vec![self.lower(i - 1, s - 1), self.lower(i, s - 1)];
        if s < self.bands() {
            cell.push(self.lower(i, s));
        }
        cell.push(self.lower(i - 1, s));
        cell
    }

    /// Outward ring of the upper cell mirroring [`SphereGrid::lower_cell`].
    pub(crate) fn upper_cell(&self, i: usize, s: usize) -> Vec<Vector3<Real>> {
        let mut cell = vec![self.upper(i - 1, s - 1), self.upper(i, s - 1)];
        if s < self.bands() {
            cell.push(self.upper(i, s));
        }
        cell.push(self.upper(i - 1, s));
        cell.reverse();
        cell
    }
}

/// Bands per hemisphere for `segments` slices: `max(1, round(fn / 4))`.
pub(crate) fn lat_long_bands(segments: usize) -> usize {
    ((segments as Real / 4.0).round() as usize).max(1)
}

/// Lat-long sphere around `center`.
///
/// For every slice `i` and band `s` one lower and one upper polygon are
/// emitted, `2 · fn · q` in total.
pub(crate) fn lat_long_sphere(
    center: Point3<Real>,
    radius: Real,
    segments: usize,
    shared: Shared,
) -> Result<Solid, GeometryError> {
    let x = Vector3::new(1.0, 0.0, 0.0) * radius;
    let y = Vector3::new(0.0, -1.0, 0.0) * radius;
    let z = Vector3::new(0.0, 0.0, 1.0) * radius;
    let grid = SphereGrid::new(x, y, z, segments, lat_long_bands(segments));

    let mut polygons: Vec<Polygon> = Vec::with_capacity(2 * segments * grid.bands());
    for i in 1..=segments {
        for s in 1..=grid.bands() {
            polygons.push(polygon_from_points(
                grid.lower_cell(i, s).into_iter().map(|v| center + v),
                shared,
            )?);
            polygons.push(polygon_from_points(
                grid.upper_cell(i, s).into_iter().map(|v| center + v),
                shared,
            )?);
        }
    }

    let mut properties = Properties::new();
    properties.insert_point("sphere", "center", center);
    properties.insert_point("sphere", "facepoint", center + x);
    Ok(Solid::from_polygons(polygons).with_properties(properties))
}

impl Primitive for SphereOptions {
    /// Standard or geodesic sphere; axes that are not centred move by `r`.
    #[instrument(level = "debug", skip(tags))]
    fn build(&self, tags: &TagCounter) -> Result<Solid, PrimitiveError> {
        let resolved = self.resolve()?;
        let tag = tags.next_tag();
        let shared = Shared::tagged(tag);

        let solid = match resolved.kind {
            SphereKind::Standard => {
                lat_long_sphere(Point3::origin(), resolved.radius, resolved.segments, shared)?
            }
            SphereKind::Geodesic => {
                geodesic::geodesic_sphere(Point3::origin(), resolved.radius, resolved.depth, shared)?
            }
        };
        let offset = center_offset(resolved.center, Vector3::repeat(resolved.radius));
        let solid = translate_if_offset(solid, offset)?;

        debug!(
            family = "sphere",
            kind = ?resolved.kind,
            polygons = solid.polygons.len(),
            tag,
            "built solid"
        );
        Ok(solid)
    }
}
