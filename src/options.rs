//! Option structs for every primitive family and their resolution into
//! canonical, validated parameters.
//!
//! Options deserialize with `serde` from the loose shapes a scripting front
//! end hands over (`{"size": [2, 1, 3], "center": [false, true, false]}`) and
//! are turned into `Resolved*` structs by a total `resolve()` function. Every
//! rejected value is reported as a [`ConfigurationError`] naming its field.
//!
//! ## Radius aliases
//! Radii may be given as `r`, `r1`/`r2`, or as diameters `d`, `d1`/`d2`.
//! For each end the most specific field wins, and a radius beats a diameter
//! of the same specificity:
//!
//! ```text
//! start = r1 > d1 > r > d > 1
//! end   = r2 > d2 > r > d > 1
//! ```

use crate::errors::ConfigurationError;
use crate::float_types::Real;
use crate::polygon::Color;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use tracing::warn;

/// Default angular resolution of cylinders and spheres.
pub const DEFAULT_SEGMENTS: usize = 32;
/// Default angular resolution of rounded cubes.
pub const DEFAULT_CUBE_ROUNDING_SEGMENTS: usize = 8;
/// Default profile and revolution resolution of a torus.
pub const DEFAULT_TORUS_SEGMENTS: (usize, usize) = (16, 32);
/// Deepest geodesic subdivision accepted (`20 × 4^8` triangles).
pub const MAX_GEODESIC_DEPTH: u32 = 8;
/// Largest `fn`, `fni` or `fno` accepted. Polygon counts grow with the square
/// of the resolution, so this keeps every count well inside `usize`.
pub const MAX_SEGMENTS: usize = 4096;

/// Extent given as one value for all axes or per axis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Size {
    Uniform(Real),
    PerAxis([Real; 3]),
}

impl Size {
    fn resolve(&self, field: &'static str) -> Result<Vector3<Real>, ConfigurationError> {
        let v = match *self {
            Size::Uniform(s) => Vector3::new(s, s, s),
            Size::PerAxis([x, y, z]) => Vector3::new(x, y, z),
        };
        for c in v.iter() {
            positive(field, *c)?;
        }
        Ok(v)
    }
}

impl From<Real> for Size {
    fn from(s: Real) -> Self {
        Size::Uniform(s)
    }
}

impl From<[Real; 3]> for Size {
    fn from(s: [Real; 3]) -> Self {
        Size::PerAxis(s)
    }
}

/// Centering flag for all axes or per axis. `true` centres the axis extent
/// on zero, `false` makes it start at zero.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Center {
    All(bool),
    PerAxis([bool; 3]),
}

impl Center {
    pub const fn axes(&self) -> [bool; 3] {
        match *self {
            Center::All(b) => [b, b, b],
            Center::PerAxis(axes) => axes,
        }
    }
}

impl From<bool> for Center {
    fn from(b: bool) -> Self {
        Center::All(b)
    }
}

impl From<[bool; 3]> for Center {
    fn from(axes: [bool; 3]) -> Self {
        Center::PerAxis(axes)
    }
}

/// Fillet parameters of a rounded primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rounding {
    pub radius: Real,
    pub segments: usize,
}

// ------------------------------------------------------------------ cube

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CubeOptions {
    /// Side length, default `1`
    pub size: Option<Size>,
    /// Default `[false, false, false]`
    pub center: Option<Center>,
    pub round: bool,
    /// Fillet radius; giving it turns rounding on
    pub radius: Option<Real>,
    #[serde(rename = "fn")]
    pub segments: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCube {
    pub size: Vector3<Real>,
    pub center: [bool; 3],
    pub rounding: Option<Rounding>,
}

impl CubeOptions {
    pub fn sized(size: impl Into<Size>) -> Self {
        CubeOptions {
            size: Some(size.into()),
            ..Default::default()
        }
    }

    pub fn resolve(&self) -> Result<ResolvedCube, ConfigurationError> {
        let size_option = self.size.unwrap_or(Size::Uniform(1.0));
        let size = size_option.resolve("size")?;
        let center = self.center.map_or([false; 3], |c| c.axes());
        let segments = segments("fn", self.segments, DEFAULT_CUBE_ROUNDING_SEGMENTS)?;

        let rounding = if self.round || self.radius.is_some() {
            let radius = match (self.radius, size_option) {
                (Some(r), _) => positive("radius", r)?,
                (None, Size::Uniform(s)) => s / 10.0,
                (None, Size::PerAxis([x, y, z])) => (x + y + z) / 30.0,
            };
            if segments % 4 != 0 {
                return Err(ConfigurationError::new(
                    "fn",
                    format!("rounded cubes need a multiple of 4 segments, got {segments}"),
                ));
            }
            let inner = size / 2.0 - Vector3::repeat(radius);
            if inner.iter().any(|e| *e <= 0.0) {
                return Err(ConfigurationError::new(
                    "radius",
                    format!("fillet radius {radius} must be below half the smallest side"),
                ));
            }
            Some(Rounding { radius, segments })
        } else {
            None
        };

        Ok(ResolvedCube {
            size,
            center,
            rounding,
        })
    }
}

// -------------------------------------------------------------- cylinder

/// Cap layout of a (non-rounded) cylinder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapStyle {
    /// One n-gon per cap
    #[default]
    Polygon,
    /// A triangle per slice on each cap
    Fan,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CylinderOptions {
    pub r: Option<Real>,
    pub r1: Option<Real>,
    pub r2: Option<Real>,
    pub d: Option<Real>,
    pub d1: Option<Real>,
    pub d2: Option<Real>,
    /// Height along +Z, default `1`; ignored when `start`/`end` are given
    pub h: Option<Real>,
    pub start: Option<[Real; 3]>,
    pub end: Option<[Real; 3]>,
    /// Default `[true, true, false]`
    pub center: Option<Center>,
    #[serde(rename = "fn")]
    pub segments: Option<i64>,
    pub round: bool,
    pub caps: CapStyle,
}

/// Where the cylinder axis runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CylinderAxis {
    /// From the origin to `(0, 0, h)`, then moved by the centering rule
    Height(Real),
    /// Explicit endpoints, no centering
    Between {
        start: Point3<Real>,
        end: Point3<Real>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCylinder {
    pub r1: Real,
    pub r2: Real,
    pub axis: CylinderAxis,
    pub center: [bool; 3],
    pub segments: usize,
    pub round: bool,
    pub caps: CapStyle,
}

impl CylinderOptions {
    pub fn new(r: Real, h: Real) -> Self {
        CylinderOptions {
            r: Some(r),
            h: Some(h),
            ..Default::default()
        }
    }

    pub fn resolve(&self) -> Result<ResolvedCylinder, ConfigurationError> {
        let uniform = radius_or_diameter(("r", self.r), ("d", self.d))?;
        let r1 = radius_or_diameter(("r1", self.r1), ("d1", self.d1))?
            .or(uniform)
            .unwrap_or(1.0);
        let r2 = radius_or_diameter(("r2", self.r2), ("d2", self.d2))?
            .or(uniform)
            .unwrap_or(1.0);
        if r1 == 0.0 && r2 == 0.0 {
            return Err(ConfigurationError::new(
                "r",
                "at least one end radius must be positive",
            ));
        }
        if self.round && r1 != r2 {
            return Err(ConfigurationError::new(
                "r2",
                format!("rounded cylinders need equal end radii, got {r1} and {r2}"),
            ));
        }

        let axis = match (self.start, self.end) {
            (Some(start), Some(end)) => {
                let start = finite_point("start", start)?;
                let end = finite_point("end", end)?;
                if start == end {
                    return Err(ConfigurationError::new("end", "must differ from start"));
                }
                CylinderAxis::Between { start, end }
            }
            (Some(_), None) => {
                return Err(ConfigurationError::new("end", "required together with start"));
            }
            (None, Some(_)) => {
                return Err(ConfigurationError::new("start", "required together with end"));
            }
            (None, None) => CylinderAxis::Height(positive("h", self.h.unwrap_or(1.0))?),
        };

        Ok(ResolvedCylinder {
            r1,
            r2,
            axis,
            center: self.center.map_or([true, true, false], |c| c.axes()),
            segments: segments("fn", self.segments, DEFAULT_SEGMENTS)?,
            round: self.round,
            caps: self.caps,
        })
    }
}

// ---------------------------------------------------------------- sphere

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SphereKind {
    /// Latitude/longitude grid
    #[default]
    #[serde(alias = "normal")]
    Standard,
    /// Subdivided icosahedron
    Geodesic,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SphereOptions {
    pub r: Option<Real>,
    pub d: Option<Real>,
    /// Default `[true, true, true]`
    pub center: Option<Center>,
    #[serde(rename = "fn")]
    pub segments: Option<i64>,
    #[serde(rename = "type")]
    pub kind: SphereKind,
    /// Geodesic depth, overrides the mapping from `fn`
    pub subdivisions: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSphere {
    pub radius: Real,
    pub center: [bool; 3],
    pub segments: usize,
    pub kind: SphereKind,
    /// Subdivision depth, only meaningful for geodesic spheres
    pub depth: u32,
}

impl SphereOptions {
    pub fn with_radius(r: Real) -> Self {
        SphereOptions {
            r: Some(r),
            ..Default::default()
        }
    }

    pub fn resolve(&self) -> Result<ResolvedSphere, ConfigurationError> {
        let radius = radius_or_diameter(("r", self.r), ("d", self.d))?.unwrap_or(1.0);
        if radius == 0.0 {
            return Err(ConfigurationError::new("r", "sphere radius must be positive"));
        }
        let segments = segments("fn", self.segments, DEFAULT_SEGMENTS)?;
        let depth = match self.subdivisions {
            Some(depth) if depth > MAX_GEODESIC_DEPTH => {
                return Err(ConfigurationError::new(
                    "subdivisions",
                    format!("at most {MAX_GEODESIC_DEPTH}, got {depth}"),
                ));
            }
            Some(depth) => depth,
            None => geodesic_depth(segments),
        };
        Ok(ResolvedSphere {
            radius,
            center: self.center.map_or([true; 3], |c| c.axes()),
            segments,
            kind: self.kind,
            depth,
        })
    }
}

/// `⌊log2(max(1, ⌊fn / 6⌋))⌋`, capped at [`MAX_GEODESIC_DEPTH`].
pub fn geodesic_depth(segments: usize) -> u32 {
    (segments / 6).max(1).ilog2().min(MAX_GEODESIC_DEPTH)
}

// ----------------------------------------------------------------- torus

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TorusOptions {
    /// Tube radius, default `1`
    pub ri: Option<Real>,
    /// Distance from the axis to the tube centre, default `4`
    pub ro: Option<Real>,
    pub fni: Option<i64>,
    pub fno: Option<i64>,
    /// Rotation of the tube profile in degrees
    pub roti: Option<Real>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTorus {
    pub ri: Real,
    pub ro: Real,
    pub fni: usize,
    pub fno: usize,
    /// Profile rotation in radians
    pub roti: Real,
}

impl TorusOptions {
    pub fn resolve(&self) -> Result<ResolvedTorus, ConfigurationError> {
        let ri = positive("ri", self.ri.unwrap_or(1.0))?;
        let ro = positive("ro", self.ro.unwrap_or(4.0))?;
        if ri >= ro {
            return Err(ConfigurationError::new(
                "ri",
                format!("tube radius {ri} must be smaller than ro = {ro}"),
            ));
        }
        let roti = finite("roti", self.roti.unwrap_or(0.0))?;
        let (default_fni, default_fno) = DEFAULT_TORUS_SEGMENTS;
        Ok(ResolvedTorus {
            ri,
            ro,
            fni: segments("fni", self.fni, default_fni)?,
            fno: segments("fno", self.fno, default_fno)?,
            roti: roti.to_radians(),
        })
    }
}

// ------------------------------------------------------------ polyhedron

/// How face index rings are oriented on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Winding {
    /// Clockwise seen from outside, every ring is reversed
    #[default]
    Clockwise,
    /// Already counter-clockwise seen from outside
    AsGiven,
    /// Reverse only rings whose normal points toward the point centroid
    Outward,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolyhedronOptions {
    pub points: Vec<[Real; 3]>,
    pub triangles: Option<Vec<Vec<usize>>>,
    /// Alias of `triangles` for faces with more than three corners
    pub polygons: Option<Vec<Vec<usize>>>,
    /// One colour per face
    pub colors: Option<Vec<Color>>,
    pub winding: Winding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPolyhedron {
    pub points: Vec<Point3<Real>>,
    pub faces: Vec<Vec<usize>>,
    pub colors: Vec<Option<Color>>,
    pub winding: Winding,
}

impl PolyhedronOptions {
    pub fn new(points: Vec<[Real; 3]>, faces: Vec<Vec<usize>>) -> Self {
        PolyhedronOptions {
            points,
            polygons: Some(faces),
            ..Default::default()
        }
    }

    pub fn resolve(&self) -> Result<ResolvedPolyhedron, ConfigurationError> {
        if self.points.is_empty() {
            return Err(ConfigurationError::new("points", "must not be empty"));
        }
        let points = self
            .points
            .iter()
            .map(|p| finite_point("points", *p))
            .collect::<Result<Vec<_>, _>>()?;

        let (field, faces) = match (&self.triangles, &self.polygons) {
            (Some(_), Some(_)) => {
                return Err(ConfigurationError::new(
                    "polygons",
                    "give either triangles or polygons, not both",
                ));
            }
            (Some(faces), None) => ("triangles", faces.clone()),
            (None, Some(faces)) => ("polygons", faces.clone()),
            (None, None) => ("polygons", Vec::new()),
        };
        if faces.is_empty() {
            return Err(ConfigurationError::new(field, "must not be empty"));
        }
        for (i, face) in faces.iter().enumerate() {
            if let Some(index) = face.iter().find(|&&index| index >= points.len()) {
                return Err(ConfigurationError::new(
                    field,
                    format!("face {i} references point {index}, only {} given", points.len()),
                ));
            }
            let mut distinct: Vec<&Point3<Real>> = Vec::with_capacity(face.len());
            for p in face.iter().map(|&index| &points[index]) {
                if !distinct.contains(&p) {
                    distinct.push(p);
                }
            }
            if distinct.len() < 3 {
                return Err(ConfigurationError::new(
                    field,
                    format!("face {i} has fewer than 3 distinct points"),
                ));
            }
        }

        let colors = match &self.colors {
            Some(colors) if colors.len() != faces.len() => {
                return Err(ConfigurationError::new(
                    "colors",
                    format!("{} colours for {} faces", colors.len(), faces.len()),
                ));
            }
            Some(colors) => colors.iter().copied().map(Some).collect(),
            None => vec![None; faces.len()],
        };

        Ok(ResolvedPolyhedron {
            points,
            faces,
            colors,
            winding: self.winding,
        })
    }
}

// --------------------------------------------------------------- helpers

/// Resolve a radius / diameter pair of the same specificity.
fn radius_or_diameter(
    (radius_field, radius): (&'static str, Option<Real>),
    (diameter_field, diameter): (&'static str, Option<Real>),
) -> Result<Option<Real>, ConfigurationError> {
    match (radius, diameter) {
        (Some(r), Some(d)) => {
            warn!(
                radius_field,
                diameter_field,
                radius = r,
                diameter = d,
                "both radius and diameter given, diameter ignored"
            );
            non_negative(radius_field, r).map(Some)
        }
        (Some(r), None) => non_negative(radius_field, r).map(Some),
        (None, Some(d)) => non_negative(diameter_field, d).map(|d| Some(d / 2.0)),
        (None, None) => Ok(None),
    }
}

fn segments(
    field: &'static str,
    value: Option<i64>,
    default: usize,
) -> Result<usize, ConfigurationError> {
    match value {
        None => Ok(default),
        Some(n) if n >= 3 => match usize::try_from(n) {
            Ok(n) if n <= MAX_SEGMENTS => Ok(n),
            _ => Err(ConfigurationError::new(
                field,
                format!("at most {MAX_SEGMENTS} segments allowed, got {n}"),
            )),
        },
        Some(n) => Err(ConfigurationError::new(
            field,
            format!("at least 3 segments required, got {n}"),
        )),
    }
}

fn finite(field: &'static str, value: Real) -> Result<Real, ConfigurationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::new(field, format!("{value} is not finite")))
    }
}

fn positive(field: &'static str, value: Real) -> Result<Real, ConfigurationError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::new(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: Real) -> Result<Real, ConfigurationError> {
    if finite(field, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::new(field, format!("must not be negative, got {value}")))
    }
}

fn finite_point(field: &'static str, p: [Real; 3]) -> Result<Point3<Real>, ConfigurationError> {
    for c in p {
        finite(field, c)?;
    }
    Ok(Point3::new(p[0], p[1], p[2]))
}
