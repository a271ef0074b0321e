//! Geodesic spheres: a subdivided icosahedron projected onto the sphere.

use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::polygon::{Polygon, Shared};
use crate::properties::Properties;
use crate::shapes::polygon_from_points;
use crate::solid::Solid;
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// Faces of the icosahedron, counter-clockwise seen from outside.
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [1, 9, 0],
    [0, 10, 1],
    [0, 7, 6],
    [0, 6, 10],
    [0, 9, 7],
    [4, 1, 5],
    [9, 1, 4],
    [1, 10, 5],
    [3, 8, 2],
    [2, 11, 3],
    [4, 5, 2],
    [2, 8, 4],
    [5, 11, 2],
    [6, 7, 3],
    [3, 11, 6],
    [3, 7, 8],
    [4, 8, 9],
    [5, 10, 11],
    [6, 11, 10],
    [7, 9, 8],
];

/// Unit-sphere mesh: vertex arena plus index triangles.
#[derive(Debug, Clone)]
pub(crate) struct Icosphere {
    vertices: Vec<Vector3<Real>>,
    faces: Vec<[usize; 3]>,
}

impl Icosphere {
    /// Regular icosahedron inscribed in the unit sphere.
    ///
    /// Vertices sit at `(±b, 0, ±a)`, `(0, ±a, ±b)`, `(±a, ±b, 0)` with
    /// `a = 1/√(1+φ²)` and `b = φa`, φ the golden ratio.
    pub(crate) fn icosahedron() -> Icosphere {
        let phi = (1.0 + (5.0 as Real).sqrt()) / 2.0;
        let a = 1.0 / (1.0 + phi * phi).sqrt();
        let b = phi * a;
        let vertices = vec![
            Vector3::new(b, 0.0, -a),
            Vector3::new(b, 0.0, a),
            Vector3::new(-b, 0.0, a),
            Vector3::new(-b, 0.0, -a),
            Vector3::new(0.0, -a, b),
            Vector3::new(0.0, a, b),
            Vector3::new(0.0, a, -b),
            Vector3::new(0.0, -a, -b),
            Vector3::new(-a, -b, 0.0),
            Vector3::new(a, -b, 0.0),
            Vector3::new(a, b, 0.0),
            Vector3::new(-a, b, 0.0),
        ];
        Icosphere {
            vertices,
            faces: ICOSAHEDRON_FACES.to_vec(),
        }
    }

    /// One 1-to-4 midpoint split of every triangle. New vertices are
    /// projected onto the unit sphere; an edge shared by two triangles gets a
    /// single midpoint.
    pub(crate) fn subdivide(&mut self) {
        let mut midpoints: HashMap<(usize, usize), usize> =
            HashMap::with_capacity(self.faces.len() * 3 / 2);
        let coarse = std::mem::take(&mut self.faces);
        let mut faces = Vec::with_capacity(coarse.len() * 4);

        for &[a, b, c] in &coarse {
            let ab = self.midpoint(&mut midpoints, a, b);
            let bc = self.midpoint(&mut midpoints, b, c);
            let ca = self.midpoint(&mut midpoints, c, a);
            faces.push([a, ab, ca]);
            faces.push([ab, b, bc]);
            faces.push([ca, bc, c]);
            faces.push([ab, bc, ca]);
        }
        self.faces = faces;
    }

    fn midpoint(
        &mut self,
        cache: &mut HashMap<(usize, usize), usize>,
        a: usize,
        b: usize,
    ) -> usize {
        let key = if a < b { (a, b) } else { (b, a) };
        *cache.entry(key).or_insert_with(|| {
            let mid = (self.vertices[a] + self.vertices[b]).normalize();
            self.vertices.push(mid);
            self.vertices.len() - 1
        })
    }

    pub(crate) fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Geodesic sphere of `20 × 4^depth` triangles.
pub(crate) fn geodesic_sphere(
    center: Point3<Real>,
    radius: Real,
    depth: u32,
    shared: Shared,
) -> Result<Solid, GeometryError> {
    let mut mesh = Icosphere::icosahedron();
    for _ in 0..depth {
        mesh.subdivide();
    }
    debug!(
        depth,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "subdivided icosahedron"
    );

    let polygons = mesh
        .faces
        .iter()
        .map(|face| {
            polygon_from_points(
                face.iter().map(|&i| center + mesh.vertices[i] * radius),
                shared,
            )
        })
        .collect::<Result<Vec<Polygon>, _>>()?;

    let mut properties = Properties::new();
    properties.insert_point("sphere", "center", center);
    Ok(Solid::from_polygons(polygons).with_properties(properties))
}
