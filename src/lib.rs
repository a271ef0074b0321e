//! Boundary-representation **primitive solids** for Constructive Solid Geometry
//! pipelines: box, cylinder/cone, latitude-longitude and geodesic spheres,
//! torus, arbitrary polyhedra, and rounded boxes and capsules.
//!
//! Every primitive is a [`Solid`]: an ordered list of convex planar polygons
//! with outward normals, plus named reference points and connectors in
//! [`properties`]. Planes are derived with signed-zero preserving arithmetic so
//! identical input yields bit-identical output.
//!
//! ```rust
//! use solidgen::{Solid, TagCounter, options::CubeOptions};
//!
//! let tags = TagCounter::new();
//! let cube = Solid::cube(&CubeOptions::sized([2.0, 1.0, 3.0]), &tags).unwrap();
//! assert_eq!(cube.polygons.len(), 6);
//! assert_eq!(cube.properties.point("cube", "center").unwrap().x, 1.0);
//! ```
//!
//! # Features
//! #### Optional
//! - **parallel**: use rayon for solid transforms

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod options;
pub mod plane;
pub mod polygon;
pub mod properties;
pub mod shapes;
pub mod solid;
pub mod tag;
pub mod traits;
pub mod vertex;

pub use errors::{ConfigurationError, GeometryError, PrimitiveError};
pub use solid::Solid;
pub use tag::{Tag, TagCounter};
pub use traits::{Primitive, Transform};
