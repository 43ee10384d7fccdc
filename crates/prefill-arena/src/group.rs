//! Column groups: one contiguous buffer per scalar type.
//!
//! A [`ColumnGroup`] packs every column of one [`ScalarType`] into a single
//! zeroed buffer of `width * rows` elements, column after column, so each
//! column is one contiguous run of `rows` elements at `slot * rows`.

use prefill_core::{ColumnValues, FrameError, ScalarType, ValuesMut, ValuesRef};

/// Contiguous storage shared by all columns of one scalar type.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnGroup {
    dtype: ScalarType,
    width: usize,
    rows: usize,
    values: ColumnValues,
}

impl ColumnGroup {
    /// Allocate a zeroed group of `width` columns with `rows` rows each.
    pub fn zeroed(dtype: ScalarType, width: usize, rows: usize) -> Result<Self, FrameError> {
        let len = width
            .checked_mul(rows)
            .filter(|len| {
                len.checked_mul(dtype.byte_width())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(FrameError::CapacityOverflow {
                rows,
                columns: width,
            })?;
        Ok(Self {
            dtype,
            width,
            rows,
            values: ColumnValues::zeroed(dtype.physical(), len),
        })
    }

    /// The scalar type of every column in the group.
    pub fn dtype(&self) -> ScalarType {
        self.dtype
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows per column.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Read one column.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= width`.
    pub fn column(&self, slot: usize) -> ValuesRef<'_> {
        assert!(slot < self.width, "slot {slot} out of range for group of {}", self.width);
        let start = slot * self.rows;
        self.values.slice(start..start + self.rows)
    }

    /// Write one column.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= width`.
    pub fn column_mut(&mut self, slot: usize) -> ValuesMut<'_> {
        assert!(slot < self.width, "slot {slot} out of range for group of {}", self.width);
        let start = slot * self.rows;
        self.values.slice_mut(start..start + self.rows)
    }

    /// Split into one disjoint writable run per column, in slot order.
    pub fn split_mut(&mut self) -> Vec<ValuesMut<'_>> {
        self.values.as_values_mut().split_runs(self.width, self.rows)
    }

    /// Size of the backing buffer in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.values.memory_bytes()
    }
}
