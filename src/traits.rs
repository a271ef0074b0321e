use crate::errors::{GeometryError, PrimitiveError};
use crate::float_types::Real;
use crate::plane::Plane;
use crate::solid::Solid;
use crate::tag::TagCounter;
use nalgebra::{Matrix3, Matrix4, Rotation3, Translation3, Vector3};

/// Anything that resolves its options and synthesises a [`Solid`].
pub trait Primitive {
    /// Build the solid, stamping every polygon with one tag from `tags`.
    fn build(&self, tags: &TagCounter) -> Result<Solid, PrimitiveError>;
}

/// Affine and projective transforms built on a single `transform`.
pub trait Transform: Sized {
    fn transform(&self, matrix: &Matrix4<Real>) -> Result<Self, GeometryError>;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Result<Self, GeometryError> {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Result<Self, GeometryError> {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Rotates by x_deg, y_deg, z_deg (applied about x, then y, then z)
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Result<Self, GeometryError> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());

        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Scales by sx, sy, sz
    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Result<Self, GeometryError> {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }

    /// Reflect about `plane`. Winding and plane orientation are corrected by
    /// `transform`, so the result still faces outward.
    fn mirror(&self, plane: &Plane) -> Result<Self, GeometryError> {
        let n = plane.normal;
        let offset = n * plane.w;
        let t1 = Translation3::from(-offset).to_homogeneous();

        // R = I - 2 n n^T
        let mut reflect_4 = Matrix4::identity();
        let reflect_3 = Matrix3::identity() - 2.0 * n * n.transpose();
        reflect_4.fixed_view_mut::<3, 3>(0, 0).copy_from(&reflect_3);

        let t2 = Translation3::from(offset).to_homogeneous();
        self.transform(&(t2 * reflect_4 * t1))
    }
}
