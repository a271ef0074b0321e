//! Cylinders, cones and frustums between two points.

use crate::errors::{GeometryError, PrimitiveError};
use crate::float_types::{Real, TAU};
use crate::options::{CapStyle, CylinderAxis, CylinderOptions};
use crate::plane::least_dominant_axis;
use crate::polygon::{Polygon, Shared};
use crate::properties::{Connector, Properties};
use crate::shapes::{polygon_from_points, rounded, translate_if_offset};
use crate::solid::Solid;
use crate::tag::TagCounter;
use crate::traits::Primitive;
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

/// Orthonormal frame of a cylinder axis: `z` along the axis, `x` at angle zero.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AxisFrame {
    pub x: Vector3<Real>,
    pub y: Vector3<Real>,
    pub z: Vector3<Real>,
}

impl AxisFrame {
    /// `x` is the least dominant world axis of `z`, orthogonalised against it.
    pub(crate) fn along(ray: &Vector3<Real>) -> AxisFrame {
        let z = ray / ray.norm();
        let reference = least_dominant_axis(&z);
        let x = reference - z * reference.dot(&z);
        let x = x / x.norm();
        let y = x.cross(&z);
        let y = y / y.norm();
        AxisFrame { x, y, z }
    }

    /// Unit direction at fraction `t` of a full turn.
    fn direction(&self, t: Real) -> Vector3<Real> {
        let angle = TAU * t;
        self.x * angle.cos() + self.y * angle.sin()
    }
}

/// Frustum from `start` (radius `r1`) to `end` (radius `r2`).
///
/// ## Polygon order
/// - [`CapStyle::Polygon`]: bottom n-gon (if `r1 > 0`), `segments` side faces
///   (triangles against an apex), top n-gon (if `r2 > 0`).
/// - [`CapStyle::Fan`]: per slice a bottom triangle, the side and a top
///   triangle; unequal radii split the side into two triangles emitted with
///   their cap.
pub(crate) fn frustum(
    start: Point3<Real>,
    end: Point3<Real>,
    r1: Real,
    r2: Real,
    segments: usize,
    caps: CapStyle,
    shared: Shared,
) -> Result<Solid, GeometryError> {
    let ray = end - start;
    let frame = AxisFrame::along(&ray);

    // Ring i of stack 0 (start) or 1 (end); indices wrap so the seam closes exactly.
    let ring = |stack: Real, radius: Real| -> Vec<Point3<Real>> {
        (0..segments)
            .map(|i| start + ray * stack + frame.direction(i as Real / segments as Real) * radius)
            .collect()
    };
    let bottom = ring(0.0, r1);
    let top = ring(1.0, r2);
    let (p0, p1) = (|i: usize| bottom[i % segments], |i: usize| top[i % segments]);
    let poly = |points: Vec<Point3<Real>>| polygon_from_points(points, shared);

    let mut polygons: Vec<Polygon> = Vec::with_capacity(3 * segments);
    match caps {
        CapStyle::Polygon => {
            if r1 > 0.0 {
                polygons.push(poly(bottom.clone())?);
            }
            for i in 0..segments {
                let side = if r1 == 0.0 {
                    vec![start, p1(i), p1(i + 1)]
                } else if r2 == 0.0 {
                    vec![p0(i + 1), p0(i), end]
                } else {
                    vec![p0(i + 1), p0(i), p1(i), p1(i + 1)]
                };
                polygons.push(poly(side)?);
            }
            if r2 > 0.0 {
                polygons.push(poly(top.iter().rev().copied().collect())?);
            }
        }
        CapStyle::Fan => {
            for i in 0..segments {
                if r1 == r2 {
                    polygons.push(poly(vec![start, p0(i), p0(i + 1)])?);
                    polygons.push(poly(vec![p0(i + 1), p0(i), p1(i), p1(i + 1)])?);
                    polygons.push(poly(vec![end, p1(i + 1), p1(i)])?);
                    continue;
                }
                if r1 > 0.0 {
                    polygons.push(poly(vec![start, p0(i), p0(i + 1)])?);
                    polygons.push(poly(vec![p0(i), p1(i), p0(i + 1)])?);
                }
                if r2 > 0.0 {
                    polygons.push(poly(vec![end, p1(i + 1), p1(i)])?);
                    polygons.push(poly(vec![p1(i), p1(i + 1), p0(i + 1)])?);
                }
            }
        }
    }

    let mut properties = Properties::new();
    properties.insert_connector("cylinder", "start", Connector::new(start, -frame.z, frame.x));
    properties.insert_connector("cylinder", "end", Connector::new(end, frame.z, frame.x));
    Ok(Solid::from_polygons(polygons).with_properties(properties))
}

impl Primitive for CylinderOptions {
    /// Cylinder between `start`/`end`, or of height `h` on the Z axis.
    ///
    /// In the height form `x`/`y` axes that are not centred move by the
    /// larger radius and a centred `z` axis moves by `-h/2`. The solid is only
    /// translated when that offset is non-zero.
    #[instrument(level = "debug", skip(tags))]
    fn build(&self, tags: &TagCounter) -> Result<Solid, PrimitiveError> {
        let resolved = self.resolve()?;
        let (start, end, offset) = match resolved.axis {
            CylinderAxis::Between { start, end } => (start, end, Vector3::zeros()),
            CylinderAxis::Height(h) => {
                let r = resolved.r1.max(resolved.r2);
                let [cx, cy, cz] = resolved.center;
                let offset = Vector3::new(
                    if cx { 0.0 } else { r },
                    if cy { 0.0 } else { r },
                    if cz { -h / 2.0 } else { 0.0 },
                );
                (Point3::origin(), Point3::new(0.0, 0.0, h), offset)
            }
        };

        let tag = tags.next_tag();
        let shared = Shared::tagged(tag);
        let (family, solid) = if resolved.round {
            let solid = rounded::capsule(start, end, resolved.r1, resolved.segments, shared)?;
            ("roundedCylinder", solid)
        } else {
            let solid = frustum(
                start,
                end,
                resolved.r1,
                resolved.r2,
                resolved.segments,
                resolved.caps,
                shared,
            )?;
            ("cylinder", solid)
        };
        let solid = translate_if_offset(solid, offset)?;

        debug!(family, polygons = solid.polygons.len(), tag, "built solid");
        Ok(solid)
    }
}
