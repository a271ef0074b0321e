//! Configuration and geometry errors

use crate::float_types::Real;
use nalgebra::Point3;

/// Everything a primitive build can fail with.
///
/// Errors are raised at the point of detection and no partial solid is ever
/// returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PrimitiveError {
    /// Invalid, missing or conflicting input fields
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// A build step would produce a degenerate polygon
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// An option field is outside its valid domain or conflicts with another one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid `{field}`: {reason}")]
pub struct ConfigurationError {
    /// Name of the offending field, as spelled in the options (`r1`, `fn`, ...)
    pub field: &'static str,
    pub reason: String,
}

impl ConfigurationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigurationError {
            field,
            reason: reason.into(),
        }
    }
}

/// All the polygon-level issues a build or a validation pass can run into
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (TooFewVertices) A polygon ring has fewer than 3 vertices
    #[error("(TooFewVertices) a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    /// (DegenerateNormal) The vertices are collinear or coincident
    #[error("(DegenerateNormal) vertices do not define a plane near: {0}")]
    DegenerateNormal(Point3<Real>),
    /// (NonFiniteCoordinate) The coordinate has a NaN or infinite
    #[error("(NonFiniteCoordinate) the coordinate ({0}) has a NaN or infinite")]
    NonFiniteCoordinate(Point3<Real>),
    /// (NotPlanar) A vertex lies off its polygon's plane
    #[error("(NotPlanar) vertex {point} is {distance} away from the polygon plane")]
    NotPlanar { point: Point3<Real>, distance: Real },
    /// (NonUnitNormal) A plane normal is not unit length
    #[error("(NonUnitNormal) plane normal has length {0}")]
    NonUnitNormal(Real),
}
