//! Script fields
//!
//! Scripts expose a set of named, typed values that a host can read and
//! override per instance.

use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::math::{Vec2, Vec3, Vec4};

/// Type tag of a script field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptFieldType {
    /// `bool`
    Bool,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `u32`
    UInt32,
    /// `u64`
    UInt64,
    /// `f32`
    Float,
    /// `f64`
    Double,
    /// 2D vector
    Vector2,
    /// 3D vector
    Vector3,
    /// 4D vector
    Vector4,
}

impl fmt::Display for ScriptFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Value of a script field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptFieldValue {
    /// `bool`
    Bool(bool),
    /// `i32`
    Int32(i32),
    /// `i64`
    Int64(i64),
    /// `u32`
    UInt32(u32),
    /// `u64`
    UInt64(u64),
    /// `f32`
    Float(f32),
    /// `f64`
    Double(f64),
    /// 2D vector
    Vector2(Vec2),
    /// 3D vector
    Vector3(Vec3),
    /// 4D vector
    Vector4(Vec4),
}

impl ScriptFieldValue {
    /// Type tag of this value
    pub const fn field_type(&self) -> ScriptFieldType {
        match self {
            Self::Bool(_) => ScriptFieldType::Bool,
            Self::Int32(_) => ScriptFieldType::Int32,
            Self::Int64(_) => ScriptFieldType::Int64,
            Self::UInt32(_) => ScriptFieldType::UInt32,
            Self::UInt64(_) => ScriptFieldType::UInt64,
            Self::Float(_) => ScriptFieldType::Float,
            Self::Double(_) => ScriptFieldType::Double,
            Self::Vector2(_) => ScriptFieldType::Vector2,
            Self::Vector3(_) => ScriptFieldType::Vector3,
            Self::Vector4(_) => ScriptFieldType::Vector4,
        }
    }

    /// The value as `f32`, if it is a `Float`
    pub const fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }
}

macro_rules! impl_from_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ScriptFieldValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_field_value! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    Vec2 => Vector2,
    Vec3 => Vector3,
    Vec4 => Vector4,
}

/// Named script fields, ordered by name
pub type ScriptFieldMap = BTreeMap<String, ScriptFieldValue>;
