//! Per-point data fields attached to a mesh.
//!
//! A [`Field`] holds one value per mesh point. Scalar fields carry one
//! component (pressure `p`), vector fields carry three (velocity `U`).

use glam::DVec3;

/// The kind of a field, by component count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// One component per point.
    Scalar,
    /// Three components per point.
    Vector,
}

/// Per-point values of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldData {
    /// Scalar values.
    Scalar(Vec<f64>),
    /// Vector values.
    Vector(Vec<DVec3>),
}

impl FieldData {
    /// Returns the number of points this data covers.
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(values) => values.len(),
            Self::Vector(values) => values.len(),
        }
    }

    /// Returns true if the data holds no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The value of a field at a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Scalar(f64),
    Vector(DVec3),
}

/// A named per-point field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    data: FieldData,
}

impl Field {
    /// Creates a field from raw data.
    pub fn new(name: impl Into<String>, data: FieldData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Creates a scalar field.
    pub fn scalar(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, FieldData::Scalar(values))
    }

    /// Creates a vector field.
    pub fn vector(name: impl Into<String>, values: Vec<DVec3>) -> Self {
        Self::new(name, FieldData::Vector(values))
    }

    /// Returns the name of this field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind of this field.
    pub fn kind(&self) -> FieldKind {
        match self.data {
            FieldData::Scalar(_) => FieldKind::Scalar,
            FieldData::Vector(_) => FieldKind::Vector,
        }
    }

    /// Returns the raw per-point data.
    pub fn data(&self) -> &FieldData {
        &self.data
    }

    /// Returns the number of points covered.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the field holds no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the value at a point index, or `None` if out of range.
    pub fn value_at(&self, index: usize) -> Option<FieldValue> {
        match &self.data {
            FieldData::Scalar(values) => values.get(index).copied().map(FieldValue::Scalar),
            FieldData::Vector(values) => values.get(index).copied().map(FieldValue::Vector),
        }
    }
}
