//! Column data types and the type-code parser.
//!
//! Type codes follow the NumPy array-protocol spelling that columnar file
//! readers already speak (`i4`, `f8`, `M8[ns]`, ...), plus the long aliases
//! (`int32`, `float64`, `datetime64[ns]`) and the `category` marker.

use std::fmt;
use std::str::FromStr;

use crate::category::Categories;
use crate::error::FrameError;

/// Resolution of a datetime or timedelta column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeUnit {
    /// Seconds.
    Second,
    /// Milliseconds.
    Millisecond,
    /// Microseconds.
    Microsecond,
    /// Nanoseconds (the default when a code carries no unit).
    Nanosecond,
}

impl TimeUnit {
    /// The bracketed suffix used in type codes (`"ns"` for `M8[ns]`).
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Millisecond => "ms",
            Self::Microsecond => "us",
            Self::Nanosecond => "ns",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "s" => Some(Self::Second),
            "ms" => Some(Self::Millisecond),
            "us" => Some(Self::Microsecond),
            "ns" => Some(Self::Nanosecond),
            _ => None,
        }
    }
}

/// The in-memory element type backing a column.
///
/// Several logical types share one physical type: `Int64`, `DateTime` and
/// `TimeDelta` are all stored as `i64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `half::f16`
    F16,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `bool`
    Bool,
}

impl PhysicalType {
    /// Size of one element in bytes.
    pub fn byte_width(&self) -> usize {
        match self {
            Self::I8 | Self::U8 | Self::Bool => 1,
            Self::I16 | Self::U16 | Self::F16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }
}

/// A primitive or temporal column type.
///
/// Columns of equal `ScalarType` share one contiguous column group, so the
/// type (including the time unit) is the grouping key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Signed 8-bit integer (`i1`).
    Int8,
    /// Signed 16-bit integer (`i2`).
    Int16,
    /// Signed 32-bit integer (`i4`).
    Int32,
    /// Signed 64-bit integer (`i8`).
    Int64,
    /// Unsigned 8-bit integer (`u1`).
    UInt8,
    /// Unsigned 16-bit integer (`u2`).
    UInt16,
    /// Unsigned 32-bit integer (`u4`).
    UInt32,
    /// Unsigned 64-bit integer (`u8`).
    UInt64,
    /// Half-precision float (`f2`).
    Float16,
    /// Single-precision float (`f4`).
    Float32,
    /// Double-precision float (`f8`).
    Float64,
    /// Boolean (`b1`).
    Bool,
    /// Timestamp counted in `TimeUnit`s since the Unix epoch (`M8[unit]`).
    DateTime(TimeUnit),
    /// Duration counted in `TimeUnit`s (`m8[unit]`).
    TimeDelta(TimeUnit),
}

impl ScalarType {
    /// The storage element type for this column type.
    pub fn physical(&self) -> PhysicalType {
        match self {
            Self::Int8 => PhysicalType::I8,
            Self::Int16 => PhysicalType::I16,
            Self::Int32 => PhysicalType::I32,
            Self::Int64 | Self::DateTime(_) | Self::TimeDelta(_) => PhysicalType::I64,
            Self::UInt8 => PhysicalType::U8,
            Self::UInt16 => PhysicalType::U16,
            Self::UInt32 => PhysicalType::U32,
            Self::UInt64 => PhysicalType::U64,
            Self::Float16 => PhysicalType::F16,
            Self::Float32 => PhysicalType::F32,
            Self::Float64 => PhysicalType::F64,
            Self::Bool => PhysicalType::Bool,
        }
    }

    /// Size of one element in bytes.
    pub fn byte_width(&self) -> usize {
        self.physical().byte_width()
    }

    /// Whether this is a datetime type (the only kind that carries a timezone).
    pub fn is_datetime(&self) -> bool {
        matches!(self, Self::DateTime(_))
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int8 => f.write_str("i1"),
            Self::Int16 => f.write_str("i2"),
            Self::Int32 => f.write_str("i4"),
            Self::Int64 => f.write_str("i8"),
            Self::UInt8 => f.write_str("u1"),
            Self::UInt16 => f.write_str("u2"),
            Self::UInt32 => f.write_str("u4"),
            Self::UInt64 => f.write_str("u8"),
            Self::Float16 => f.write_str("f2"),
            Self::Float32 => f.write_str("f4"),
            Self::Float64 => f.write_str("f8"),
            Self::Bool => f.write_str("b1"),
            Self::DateTime(unit) => write!(f, "M8[{}]", unit.suffix()),
            Self::TimeDelta(unit) => write!(f, "m8[{}]", unit.suffix()),
        }
    }
}

impl FromStr for ScalarType {
    type Err = FrameError;

    /// Parse a single scalar type code.
    ///
    /// Accepts an optional little-endian/native byte-order prefix (`<`, `=`,
    /// `|`). Big-endian codes are rejected: storage is always native order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || FrameError::UnknownTypeCode {
            code: s.to_string(),
            position: 0,
        };
        let code = s.trim();
        let code = code
            .strip_prefix(['<', '=', '|'])
            .unwrap_or(code);

        // Temporal codes carry an optional `[unit]` suffix.
        let (base, unit) = match code.split_once('[') {
            Some((base, rest)) => {
                let unit = rest
                    .strip_suffix(']')
                    .and_then(TimeUnit::from_suffix)
                    .ok_or_else(unknown)?;
                (base, Some(unit))
            }
            None => (code, None),
        };

        let scalar = match base {
            "M8" | "datetime64" => Self::DateTime(unit.unwrap_or(TimeUnit::Nanosecond)),
            "m8" | "timedelta64" => Self::TimeDelta(unit.unwrap_or(TimeUnit::Nanosecond)),
            _ if unit.is_some() => return Err(unknown()),
            "i1" | "int8" => Self::Int8,
            "i2" | "int16" => Self::Int16,
            "i4" | "int32" => Self::Int32,
            "i8" | "int64" | "int" => Self::Int64,
            "u1" | "uint8" => Self::UInt8,
            "u2" | "uint16" => Self::UInt16,
            "u4" | "uint32" => Self::UInt32,
            "u8" | "uint64" => Self::UInt64,
            "f2" | "float16" | "half" => Self::Float16,
            "f4" | "float32" => Self::Float32,
            "f8" | "float64" | "float" => Self::Float64,
            "b1" | "bool" | "?" => Self::Bool,
            _ => return Err(unknown()),
        };
        Ok(scalar)
    }
}

/// A column type as requested by the caller, before categories are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// A primitive or temporal column.
    Scalar(ScalarType),
    /// A dictionary-encoded column; its categories come from the request.
    Category,
}

impl TypeTag {
    /// Marker code for categorical columns.
    pub const CATEGORY_CODE: &'static str = "category";
}

impl From<ScalarType> for TypeTag {
    fn from(scalar: ScalarType) -> Self {
        Self::Scalar(scalar)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => fmt::Display::fmt(scalar, f),
            Self::Category => f.write_str(Self::CATEGORY_CODE),
        }
    }
}

impl FromStr for TypeTag {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == Self::CATEGORY_CODE {
            return Ok(Self::Category);
        }
        s.parse().map(Self::Scalar)
    }
}

/// Split a delimited type string into tags.
///
/// A blank string yields no columns. Errors report the zero-based position
/// of the offending code.
pub fn parse_type_list(types: &str, delimiter: char) -> Result<Vec<TypeTag>, FrameError> {
    if types.trim().is_empty() {
        return Ok(Vec::new());
    }
    types
        .split(delimiter)
        .enumerate()
        .map(|(position, code)| {
            code.parse::<TypeTag>().map_err(|_| FrameError::UnknownTypeCode {
                code: code.trim().to_string(),
                position,
            })
        })
        .collect()
}

/// A fully resolved column type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// A primitive or temporal column stored in a column group.
    Primitive(ScalarType),
    /// A dictionary-encoded column: integer codes plus a label table.
    Categorical(Categories),
}

impl ColumnType {
    /// The scalar type, if this column is not categorical.
    pub fn scalar(&self) -> Option<ScalarType> {
        match self {
            Self::Primitive(scalar) => Some(*scalar),
            Self::Categorical(_) => None,
        }
    }

    /// The category table, if this column is categorical.
    pub fn categories(&self) -> Option<&Categories> {
        match self {
            Self::Primitive(_) => None,
            Self::Categorical(categories) => Some(categories),
        }
    }

    /// Whether the column is dictionary-encoded.
    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical(_))
    }

    /// The storage element type: the scalar's physical type, or the
    /// narrowest code width for the current categories. A frame's code array
    /// keeps the width it was allocated with when its labels are replaced.
    pub fn physical(&self) -> PhysicalType {
        match self {
            Self::Primitive(scalar) => scalar.physical(),
            Self::Categorical(categories) => categories.code_width().physical(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(scalar) => fmt::Display::fmt(scalar, f),
            Self::Categorical(_) => f.write_str(TypeTag::CATEGORY_CODE),
        }
    }
}
