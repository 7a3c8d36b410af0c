//! Scalar type tags, decoded values, and homogeneous slices

use super::error::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of scalar types the codec supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    #[serde(rename = "int8")]
    I8,
    #[serde(rename = "int16")]
    I16,
    #[serde(rename = "int32")]
    I32,
    #[serde(rename = "int64")]
    I64,
    #[serde(rename = "float32")]
    F32,
    #[serde(rename = "float64")]
    F64,
}

impl ScalarType {
    /// Returns the width in bytes of this scalar type
    pub const fn width(&self) -> usize {
        match self {
            ScalarType::I8 => 1,
            ScalarType::I16 => 2,
            ScalarType::I32 | ScalarType::F32 => 4,
            ScalarType::I64 | ScalarType::F64 => 8,
        }
    }

    /// The canonical textual tag for this type
    pub const fn tag(&self) -> &'static str {
        match self {
            ScalarType::I8 => "int8",
            ScalarType::I16 => "int16",
            ScalarType::I32 => "int32",
            ScalarType::I64 => "int64",
            ScalarType::F32 => "float32",
            ScalarType::F64 => "float64",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ScalarType {
    type Err = MemoryError;

    /// Parses a scalar type tag, case-insensitively. Unknown tags are
    /// rejected explicitly rather than falling through to a default.
    fn from_str(s: &str) -> MemoryResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "int8" => Ok(ScalarType::I8),
            "int16" => Ok(ScalarType::I16),
            "int32" => Ok(ScalarType::I32),
            "int64" => Ok(ScalarType::I64),
            "float32" => Ok(ScalarType::F32),
            "float64" => Ok(ScalarType::F64),
            _ => Err(MemoryError::UnsupportedType(s.to_string())),
        }
    }
}

/// A decoded scalar value tagged with its type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ScalarValue {
    #[serde(rename = "int8")]
    I8(i8),
    #[serde(rename = "int16")]
    I16(i16),
    #[serde(rename = "int32")]
    I32(i32),
    #[serde(rename = "int64")]
    I64(i64),
    #[serde(rename = "float32")]
    F32(f32),
    #[serde(rename = "float64")]
    F64(f64),
}

impl ScalarValue {
    /// Gets the type tag for this value
    pub const fn scalar_type(&self) -> ScalarType {
        match self {
            ScalarValue::I8(_) => ScalarType::I8,
            ScalarValue::I16(_) => ScalarType::I16,
            ScalarValue::I32(_) => ScalarType::I32,
            ScalarValue::I64(_) => ScalarType::I64,
            ScalarValue::F32(_) => ScalarType::F32,
            ScalarValue::F64(_) => ScalarType::F64,
        }
    }

    /// Returns the size in bytes of the value
    pub const fn size(&self) -> usize {
        self.scalar_type().width()
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::I8(v) => write!(f, "{}", v),
            ScalarValue::I16(v) => write!(f, "{}", v),
            ScalarValue::I32(v) => write!(f, "{}", v),
            ScalarValue::I64(v) => write!(f, "{}", v),
            ScalarValue::F32(v) => write!(f, "{}", v),
            ScalarValue::F64(v) => write!(f, "{}", v),
        }
    }
}

/// An ordered sequence of decoded scalars of one declared element type.
///
/// Produced by strided array reads; construction guarantees homogeneity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedSlice {
    element_type: ScalarType,
    values: Vec<ScalarValue>,
}

impl TypedSlice {
    /// Creates an empty slice of the given element type
    pub fn new(element_type: ScalarType) -> Self {
        TypedSlice {
            element_type,
            values: Vec::new(),
        }
    }

    /// Creates a slice from already-decoded values, rejecting mixed types
    pub fn from_values(
        element_type: ScalarType,
        values: Vec<ScalarValue>,
    ) -> MemoryResult<Self> {
        for (index, value) in values.iter().enumerate() {
            if value.scalar_type() != element_type {
                return Err(MemoryError::HeterogeneousArray {
                    expected: element_type,
                    found: value.scalar_type(),
                    index,
                });
            }
        }
        Ok(TypedSlice {
            element_type,
            values,
        })
    }

    /// Appends a value; the caller must have matched the element type
    pub(crate) fn push(&mut self, value: ScalarValue) {
        debug_assert_eq!(value.scalar_type(), self.element_type);
        self.values.push(value);
    }

    pub fn element_type(&self) -> ScalarType {
        self.element_type
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScalarValue> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScalarValue> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a TypedSlice {
    type Item = &'a ScalarValue;
    type IntoIter = std::slice::Iter<'a, ScalarValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
