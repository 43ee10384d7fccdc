//! Categorical (dictionary-encoded) column metadata.
//!
//! A categorical column stores one unsigned integer code per row plus a
//! label table shared by all rows. The table is either an explicit list of
//! labels or a placeholder range `0..n` that a reader replaces once the
//! real dictionary is known.

use std::fmt;

use crate::dtype::PhysicalType;

/// Placeholder category count used when the caller gives no metadata for a
/// categorical column. Sized so the codes fit in 16 bits.
pub const DEFAULT_CATEGORY_CAPACITY: u32 = 1 << 16;

/// Caller-supplied categorical metadata for one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategorySpec {
    /// Allocate `n` placeholder labels `0..n`.
    Count(u32),
    /// Use these labels, in order; code `i` decodes to `labels[i]`.
    Labels(Vec<String>),
}

impl From<u32> for CategorySpec {
    fn from(n: u32) -> Self {
        Self::Count(n)
    }
}

impl From<Vec<String>> for CategorySpec {
    fn from(labels: Vec<String>) -> Self {
        Self::Labels(labels)
    }
}

impl From<Vec<&str>> for CategorySpec {
    fn from(labels: Vec<&str>) -> Self {
        Self::Labels(labels.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CategorySpec {
    fn from(labels: [&str; N]) -> Self {
        Self::Labels(labels.iter().map(|s| s.to_string()).collect())
    }
}

/// Resolved label table of a categorical column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Categories {
    /// Placeholder labels `0..n`, not materialised.
    Range(u32),
    /// Explicit labels.
    Labels(Vec<String>),
}

impl Categories {
    /// Resolve a column's categories: explicit labels, then a sized
    /// placeholder range, then the default placeholder range.
    pub fn resolve(spec: Option<&CategorySpec>, default_capacity: u32) -> Self {
        match spec {
            Some(CategorySpec::Labels(labels)) => Self::Labels(labels.clone()),
            Some(CategorySpec::Count(n)) => Self::Range(*n),
            None => Self::Range(default_capacity),
        }
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        match self {
            Self::Range(n) => *n as usize,
            Self::Labels(labels) => labels.len(),
        }
    }

    /// Whether the table has no categories.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the labels are placeholders.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Range(_))
    }

    /// Decode a code. Returns `None` when the code is out of range.
    pub fn label(&self, code: u32) -> Option<Label<'_>> {
        match self {
            Self::Range(n) => (code < *n).then_some(Label::Placeholder(code)),
            Self::Labels(labels) => labels.get(code as usize).map(|s| Label::Text(s)),
        }
    }

    /// Whether `code` decodes to a label.
    pub fn contains_code(&self, code: u64) -> bool {
        code < self.len() as u64
    }

    /// Iterate over all labels in code order.
    pub fn iter(&self) -> impl Iterator<Item = Label<'_>> + '_ {
        (0..self.len() as u32).filter_map(move |code| self.label(code))
    }

    /// Narrowest code width able to address every category.
    pub fn code_width(&self) -> CodeWidth {
        CodeWidth::for_count(self.len())
    }
}

/// A decoded categorical value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label<'a> {
    /// An explicit label.
    Text(&'a str),
    /// A placeholder label; the value is the code itself.
    Placeholder(u32),
}

impl fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Placeholder(code) => write!(f, "{code}"),
        }
    }
}

/// Element width of a categorical code array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CodeWidth {
    /// `u8` codes, up to 256 categories.
    U8,
    /// `u16` codes, up to 65 536 categories.
    U16,
    /// `u32` codes.
    U32,
}

impl CodeWidth {
    /// Pick the narrowest width whose codes `0..count` all fit.
    pub fn for_count(count: usize) -> Self {
        if count <= u8::MAX as usize + 1 {
            Self::U8
        } else if count <= u16::MAX as usize + 1 {
            Self::U16
        } else {
            Self::U32
        }
    }

    /// Largest code representable at this width.
    pub fn max_code(&self) -> u32 {
        match self {
            Self::U8 => u8::MAX as u32,
            Self::U16 => u16::MAX as u32,
            Self::U32 => u32::MAX,
        }
    }

    /// The width stored as `physical`, if it is a code type.
    pub fn from_physical(physical: PhysicalType) -> Option<Self> {
        match physical {
            PhysicalType::U8 => Some(Self::U8),
            PhysicalType::U16 => Some(Self::U16),
            PhysicalType::U32 => Some(Self::U32),
            _ => None,
        }
    }

    /// Most categories addressable at this width.
    pub fn max_categories(&self) -> usize {
        (self.max_code() as usize).saturating_add(1)
    }

    /// Storage element type of the code array.
    pub fn physical(&self) -> PhysicalType {
        match self {
            Self::U8 => PhysicalType::U8,
            Self::U16 => PhysicalType::U16,
            Self::U32 => PhysicalType::U32,
        }
    }
}
