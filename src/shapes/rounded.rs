//! Rounded boxes and capsules.
//!
//! **Mathematical Foundations**
//!
//! A rounded box is the Minkowski sum of its inner box (half-extent
//! `e = half - ρ`) with a sphere of radius `ρ`. Its boundary splits into
//! - eight sphere octants, one around each inner corner `(±e.x, ±e.y, ±e.z)`,
//! - twelve quarter-cylinders along the inner edges,
//! - six flat faces, the inner faces pushed out by `ρ`.
//!
//! All three parts are read off one lat-long grid of radius `ρ` whose
//! quadrant seams lie on the coordinate planes: a cell takes the corner of its
//! octant, a seam between two quadrants becomes an edge strip and the pole and
//! seam crossings outline the flat faces.

use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::options::Rounding;
use crate::polygon::{Polygon, Shared};
use crate::properties::{Connector, Properties};
use crate::shapes::polygon_from_points;
use crate::shapes::sphere::SphereGrid;
use crate::solid::Solid;
use nalgebra::{Point3, Vector3};

/// `(x, y)` corner signs of the four longitude quadrants. Quadrant `k` spans
/// `[k·90°, (k+1)·90°]` of the ring `x cos θ - y sin θ`.
const QUADRANT_SIGNS: [(Real, Real); 4] = [(1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)];

/// Box of half-extent `half` with every edge and corner filleted.
///
/// Polygon order: corner cells, meridian strips (horizontal edges), equator
/// strips (vertical edges), then the faces `-Z, +Z` and the four sides.
/// `fn²/2 + 3·fn + 6` polygons for `fn = rounding.segments`.
pub(crate) fn rounded_cuboid(
    half: Vector3<Real>,
    rounding: Rounding,
    shared: Shared,
) -> Result<Solid, GeometryError> {
    let Rounding { radius, segments } = rounding;
    let inner = half - Vector3::repeat(radius);
    let grid = SphereGrid::new(
        Vector3::new(radius, 0.0, 0.0),
        Vector3::new(0.0, -radius, 0.0),
        Vector3::new(0.0, 0.0, radius),
        segments,
        segments / 4,
    );
    let q = grid.bands();
    let corner = |quadrant: usize, z: Real| {
        let (sx, sy) = QUADRANT_SIGNS[quadrant % 4];
        Point3::new(sx * inner.x, sy * inner.y, z * inner.z)
    };
    let quadrant_of_cell = |i: usize| (i - 1) / q;
    let poly = |points: Vec<Point3<Real>>| polygon_from_points(points, shared);

    let mut polygons: Vec<Polygon> = Vec::with_capacity(segments * segments / 2 + 3 * segments + 6);

    // corner sphere octants
    for i in 1..=segments {
        let (low, high) = (
            corner(quadrant_of_cell(i), -1.0),
            corner(quadrant_of_cell(i), 1.0),
        );
        for s in 1..=q {
            polygons.push(poly(grid.lower_cell(i, s).into_iter().map(|v| low + v).collect())?);
            polygons.push(poly(grid.upper_cell(i, s).into_iter().map(|v| high + v).collect())?);
        }
    }

    // horizontal edges: strips across the four meridian seams
    for seam in 1..=4 {
        let i = seam * q;
        let (left, right) = (seam - 1, seam);
        for s in 1..=q {
            let (ll, lr) = (corner(left, -1.0), corner(right, -1.0));
            polygons.push(poly(vec![
                ll + grid.lower(i, s),
                ll + grid.lower(i, s - 1),
                lr + grid.lower(i, s - 1),
                lr + grid.lower(i, s),
            ])?);
            let (ul, ur) = (corner(left, 1.0), corner(right, 1.0));
            polygons.push(poly(vec![
                ul + grid.upper(i, s - 1),
                ul + grid.upper(i, s),
                ur + grid.upper(i, s),
                ur + grid.upper(i, s - 1),
            ])?);
        }
    }

    // vertical edges: strips along the equator
    for i in 1..=segments {
        let quadrant = quadrant_of_cell(i);
        let (low, high) = (corner(quadrant, -1.0), corner(quadrant, 1.0));
        polygons.push(poly(vec![
            low + grid.lower(i, 0),
            low + grid.lower(i - 1, 0),
            high + grid.upper(i - 1, 0),
            high + grid.upper(i, 0),
        ])?);
    }

    // flat faces
    polygons.push(poly((0..4).map(|k| corner(k, -1.0) + grid.lower(0, q)).collect())?);
    polygons.push(poly((0..4).rev().map(|k| corner(k, 1.0) + grid.upper(0, q)).collect())?);
    for seam in 1..=4 {
        let offset = grid.ring(seam * q);
        let (left, right) = (seam - 1, seam);
        polygons.push(poly(vec![
            corner(left, -1.0) + offset,
            corner(left, 1.0) + offset,
            corner(right, 1.0) + offset,
            corner(right, -1.0) + offset,
        ])?);
    }

    let mut properties = Properties::new();
    properties.insert_point("roundedCube", "center", Point3::origin());
    properties.insert_point("sphere", "center", Point3::from(-inner));
    Ok(Solid::from_polygons(polygons).with_properties(properties))
}

/// Cylinder of radius `radius` from `start` to `end` closed by hemispheres.
///
/// Per slice: one side quad, then for each band a polygon of the start
/// hemisphere and one of the end hemisphere, `fn·(1 + 2q)` in total with
/// `q = max(1, ⌊fn/4⌋)`.
pub(crate) fn capsule(
    start: Point3<Real>,
    end: Point3<Real>,
    radius: Real,
    segments: usize,
    shared: Shared,
) -> Result<Solid, GeometryError> {
    let direction = end - start;
    let reference = if direction.x.abs() > direction.y.abs() {
        Vector3::new(0.0, 1.0, 0.0)
    } else {
        Vector3::new(1.0, 0.0, 0.0)
    };
    let zv = direction.normalize() * radius;
    let xv = zv.cross(&reference).normalize() * radius;
    let yv = xv.cross(&zv).normalize() * radius;
    let grid = SphereGrid::new(xv, yv, zv, segments, (segments / 4).max(1));
    let poly = |points: Vec<Point3<Real>>| polygon_from_points(points, shared);

    let mut polygons: Vec<Polygon> = Vec::with_capacity(segments * (1 + 2 * grid.bands()));
    for i in 1..=segments {
        polygons.push(poly(vec![
            start + grid.ring(i),
            start + grid.ring(i - 1),
            end + grid.ring(i - 1),
            end + grid.ring(i),
        ])?);
        for s in 1..=grid.bands() {
            polygons.push(poly(grid.lower_cell(i, s).into_iter().map(|v| start + v).collect())?);
            polygons.push(poly(grid.upper_cell(i, s).into_iter().map(|v| end + v).collect())?);
        }
    }

    let mut properties = Properties::new();
    properties.insert_connector("roundedCylinder", "start", Connector::new(start, -zv, xv));
    properties.insert_connector("roundedCylinder", "end", Connector::new(end, zv, xv));
    Ok(Solid::from_polygons(polygons).with_properties(properties))
}
