//! Named reference points and connectors attached to a solid.
//!
//! Properties are grouped by family (`cube`, `sphere`, `cylinder`, ...) and
//! follow the solid through every transform.

use crate::float_types::Real;
use crate::vertex::apply_homogeneous;
use nalgebra::{Matrix4, Point3, Vector3};
use std::collections::BTreeMap;

/// An attachment frame: a point, an axis leaving the solid and a normal
/// fixing the rotation about that axis. Both vectors are unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub point: Point3<Real>,
    pub axisvector: Vector3<Real>,
    pub normalvector: Vector3<Real>,
}

impl Connector {
    pub fn new(point: Point3<Real>, axisvector: Vector3<Real>, normalvector: Vector3<Real>) -> Self {
        Connector {
            point,
            axisvector: axisvector / axisvector.norm(),
            normalvector: normalvector / normalvector.norm(),
        }
    }

    /// Vectors are mapped as the difference of two transformed points, so
    /// translations leave them alone and scales are renormalised away.
    pub fn transform(&self, matrix: &Matrix4<Real>) -> Connector {
        let (point, _) = apply_homogeneous(matrix, &self.point);
        let (axis_tip, _) = apply_homogeneous(matrix, &(self.point + self.axisvector));
        let (normal_tip, _) = apply_homogeneous(matrix, &(self.point + self.normalvector));
        Connector::new(point, axis_tip - point, normal_tip - point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property {
    Point(Point3<Real>),
    Connector(Connector),
}

impl Property {
    pub fn transform(&self, matrix: &Matrix4<Real>) -> Property {
        match self {
            Property::Point(p) => Property::Point(apply_homogeneous(matrix, p).0),
            Property::Connector(c) => Property::Connector(c.transform(matrix)),
        }
    }
}

/// Two-level map `family → name → property`, iterated in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    families: BTreeMap<String, BTreeMap<String, Property>>,
}

impl Properties {
    pub fn new() -> Self {
        Properties::default()
    }

    pub fn insert(&mut self, family: &str, name: &str, property: Property) {
        self.families
            .entry(family.to_owned())
            .or_default()
            .insert(name.to_owned(), property);
    }

    pub fn insert_point(&mut self, family: &str, name: &str, point: Point3<Real>) {
        self.insert(family, name, Property::Point(point));
    }

    pub fn insert_connector(&mut self, family: &str, name: &str, connector: Connector) {
        self.insert(family, name, Property::Connector(connector));
    }

    pub fn get(&self, family: &str, name: &str) -> Option<&Property> {
        self.families.get(family)?.get(name)
    }

    pub fn point(&self, family: &str, name: &str) -> Option<Point3<Real>> {
        match self.get(family, name)? {
            Property::Point(p) => Some(*p),
            Property::Connector(_) => None,
        }
    }

    pub fn connector(&self, family: &str, name: &str) -> Option<&Connector> {
        match self.get(family, name)? {
            Property::Connector(c) => Some(c),
            Property::Point(_) => None,
        }
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// All `(family, name, property)` triples in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Property)> {
        self.families.iter().flat_map(|(family, entries)| {
            entries
                .iter()
                .map(move |(name, property)| (family.as_str(), name.as_str(), property))
        })
    }

    pub fn len(&self) -> usize {
        self.families.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn transform(&self, matrix: &Matrix4<Real>) -> Properties {
        let families = self
            .families
            .iter()
            .map(|(family, entries)| {
                let entries = entries
                    .iter()
                    .map(|(name, property)| (name.clone(), property.transform(matrix)))
                    .collect();
                (family.clone(), entries)
            })
            .collect();
        Properties { families }
    }
}
