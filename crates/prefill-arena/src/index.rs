//! Row index of a frame.

use std::ops::Range;

use prefill_core::{ColumnValues, FrameError, NativeType, ScalarType, ValuesMut, ValuesRef};

/// The row labels of a frame.
///
/// Either the implicit positions `0..len`, or an explicitly typed, zeroed
/// array the caller fills in like any column.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameIndex {
    /// Default sequential index; nothing is allocated.
    Range {
        /// Number of rows.
        len: usize,
    },
    /// Explicit index storage.
    Typed {
        /// Element type of the index.
        dtype: ScalarType,
        /// Backing array, one element per row.
        values: ColumnValues,
    },
}

impl FrameIndex {
    /// A zeroed typed index of `rows` elements.
    pub fn zeroed(dtype: ScalarType, rows: usize) -> Result<Self, FrameError> {
        if rows
            .checked_mul(dtype.byte_width())
            .is_none_or(|bytes| bytes > isize::MAX as usize)
        {
            return Err(FrameError::CapacityOverflow { rows, columns: 1 });
        }
        Ok(Self::Typed {
            dtype,
            values: ColumnValues::zeroed(dtype.physical(), rows),
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Range { len } => *len,
            Self::Typed { values, .. } => values.len(),
        }
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The positions covered, if this is a range index.
    pub fn as_range(&self) -> Option<Range<usize>> {
        match self {
            Self::Range { len } => Some(0..*len),
            Self::Typed { .. } => None,
        }
    }

    /// Element type, if typed.
    pub fn dtype(&self) -> Option<ScalarType> {
        match self {
            Self::Range { .. } => None,
            Self::Typed { dtype, .. } => Some(*dtype),
        }
    }

    /// Backing storage, if typed.
    pub fn values(&self) -> Option<ValuesRef<'_>> {
        match self {
            Self::Range { .. } => None,
            Self::Typed { values, .. } => Some(values.as_values()),
        }
    }

    /// Mutable backing storage, if typed.
    pub fn values_mut(&mut self) -> Option<ValuesMut<'_>> {
        match self {
            Self::Range { .. } => None,
            Self::Typed { values, .. } => Some(values.as_values_mut()),
        }
    }

    /// Typed storage as a concrete slice.
    pub fn values_as<T: NativeType>(&self) -> Option<&[T]> {
        T::from_values(self.values()?)
    }

    /// Size of the backing storage in bytes (zero for a range index).
    pub fn memory_bytes(&self) -> usize {
        match self {
            Self::Range { .. } => 0,
            Self::Typed { values, .. } => values.memory_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_index_allocates_nothing() {
        let index = FrameIndex::Range { len: 5 };
        assert_eq!(index.as_range(), Some(0..5));
        assert_eq!(index.memory_bytes(), 0);
        assert!(index.values().is_none());
    }

    #[test]
    fn typed_index_is_zeroed() {
        let index = FrameIndex::zeroed(ScalarType::Int64, 3).unwrap();
        assert_eq!(index.dtype(), Some(ScalarType::Int64));
        assert_eq!(index.values_as::<i64>(), Some(&[0i64, 0, 0][..]));
        assert!(index.as_range().is_none());
    }
}
