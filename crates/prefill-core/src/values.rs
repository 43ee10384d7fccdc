//! Owned and borrowed column storage, tagged by physical type.
//!
//! [`ColumnValues`] owns one contiguous zeroed buffer. A column group lays
//! several columns of the same type end to end in one buffer; the
//! borrowed forms ([`ValuesRef`], [`ValuesMut`]) address one column's run
//! within it.

use std::ops::Range;

use half::f16;

use crate::dtype::PhysicalType;

/// An owned, contiguous, typed buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValues {
    /// `i8` storage.
    I8(Vec<i8>),
    /// `i16` storage.
    I16(Vec<i16>),
    /// `i32` storage.
    I32(Vec<i32>),
    /// `i64` storage (also datetimes and timedeltas).
    I64(Vec<i64>),
    /// `u8` storage.
    U8(Vec<u8>),
    /// `u16` storage.
    U16(Vec<u16>),
    /// `u32` storage.
    U32(Vec<u32>),
    /// `u64` storage.
    U64(Vec<u64>),
    /// `f16` storage.
    F16(Vec<f16>),
    /// `f32` storage.
    F32(Vec<f32>),
    /// `f64` storage.
    F64(Vec<f64>),
    /// `bool` storage.
    Bool(Vec<bool>),
}

impl ColumnValues {
    /// Allocate `len` zeroed elements of the given physical type.
    pub fn zeroed(physical: PhysicalType, len: usize) -> Self {
        match physical {
            PhysicalType::I8 => Self::I8(vec![0; len]),
            PhysicalType::I16 => Self::I16(vec![0; len]),
            PhysicalType::I32 => Self::I32(vec![0; len]),
            PhysicalType::I64 => Self::I64(vec![0; len]),
            PhysicalType::U8 => Self::U8(vec![0; len]),
            PhysicalType::U16 => Self::U16(vec![0; len]),
            PhysicalType::U32 => Self::U32(vec![0; len]),
            PhysicalType::U64 => Self::U64(vec![0; len]),
            PhysicalType::F16 => Self::F16(vec![f16::ZERO; len]),
            PhysicalType::F32 => Self::F32(vec![0.0; len]),
            PhysicalType::F64 => Self::F64(vec![0.0; len]),
            PhysicalType::Bool => Self::Bool(vec![false; len]),
        }
    }

    /// The element type.
    pub fn physical(&self) -> PhysicalType {
        self.as_values().physical()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.as_values().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the buffer in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.len() * self.physical().byte_width()
    }

    /// Borrow the whole buffer.
    pub fn as_values(&self) -> ValuesRef<'_> {
        match self {
            Self::I8(v) => ValuesRef::I8(v),
            Self::I16(v) => ValuesRef::I16(v),
            Self::I32(v) => ValuesRef::I32(v),
            Self::I64(v) => ValuesRef::I64(v),
            Self::U8(v) => ValuesRef::U8(v),
            Self::U16(v) => ValuesRef::U16(v),
            Self::U32(v) => ValuesRef::U32(v),
            Self::U64(v) => ValuesRef::U64(v),
            Self::F16(v) => ValuesRef::F16(v),
            Self::F32(v) => ValuesRef::F32(v),
            Self::F64(v) => ValuesRef::F64(v),
            Self::Bool(v) => ValuesRef::Bool(v),
        }
    }

    /// Mutably borrow the whole buffer.
    pub fn as_values_mut(&mut self) -> ValuesMut<'_> {
        match self {
            Self::I8(v) => ValuesMut::I8(v),
            Self::I16(v) => ValuesMut::I16(v),
            Self::I32(v) => ValuesMut::I32(v),
            Self::I64(v) => ValuesMut::I64(v),
            Self::U8(v) => ValuesMut::U8(v),
            Self::U16(v) => ValuesMut::U16(v),
            Self::U32(v) => ValuesMut::U32(v),
            Self::U64(v) => ValuesMut::U64(v),
            Self::F16(v) => ValuesMut::F16(v),
            Self::F32(v) => ValuesMut::F32(v),
            Self::F64(v) => ValuesMut::F64(v),
            Self::Bool(v) => ValuesMut::Bool(v),
        }
    }

    /// Borrow a sub-range.
    ///
    /// # Panics
    ///
    /// Panics if `range` exceeds the buffer.
    pub fn slice(&self, range: Range<usize>) -> ValuesRef<'_> {
        self.as_values().slice(range)
    }

    /// Mutably borrow a sub-range.
    ///
    /// # Panics
    ///
    /// Panics if `range` exceeds the buffer.
    pub fn slice_mut(&mut self, range: Range<usize>) -> ValuesMut<'_> {
        self.as_values_mut().slice(range)
    }
}

/// A borrowed, typed, read-only run of elements.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum ValuesRef<'a> {
    I8(&'a [i8]),
    I16(&'a [i16]),
    I32(&'a [i32]),
    I64(&'a [i64]),
    U8(&'a [u8]),
    U16(&'a [u16]),
    U32(&'a [u32]),
    U64(&'a [u64]),
    F16(&'a [f16]),
    F32(&'a [f32]),
    F64(&'a [f64]),
    Bool(&'a [bool]),
}

impl<'a> ValuesRef<'a> {
    /// The element type.
    pub fn physical(&self) -> PhysicalType {
        match self {
            Self::I8(_) => PhysicalType::I8,
            Self::I16(_) => PhysicalType::I16,
            Self::I32(_) => PhysicalType::I32,
            Self::I64(_) => PhysicalType::I64,
            Self::U8(_) => PhysicalType::U8,
            Self::U16(_) => PhysicalType::U16,
            Self::U32(_) => PhysicalType::U32,
            Self::U64(_) => PhysicalType::U64,
            Self::F16(_) => PhysicalType::F16,
            Self::F32(_) => PhysicalType::F32,
            Self::F64(_) => PhysicalType::F64,
            Self::Bool(_) => PhysicalType::Bool,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::I8(s) => s.len(),
            Self::I16(s) => s.len(),
            Self::I32(s) => s.len(),
            Self::I64(s) => s.len(),
            Self::U8(s) => s.len(),
            Self::U16(s) => s.len(),
            Self::U32(s) => s.len(),
            Self::U64(s) => s.len(),
            Self::F16(s) => s.len(),
            Self::F32(s) => s.len(),
            Self::F64(s) => s.len(),
            Self::Bool(s) => s.len(),
        }
    }

    /// Whether the run is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Narrow to a sub-range.
    pub fn slice(self, range: Range<usize>) -> ValuesRef<'a> {
        match self {
            Self::I8(s) => Self::I8(&s[range]),
            Self::I16(s) => Self::I16(&s[range]),
            Self::I32(s) => Self::I32(&s[range]),
            Self::I64(s) => Self::I64(&s[range]),
            Self::U8(s) => Self::U8(&s[range]),
            Self::U16(s) => Self::U16(&s[range]),
            Self::U32(s) => Self::U32(&s[range]),
            Self::U64(s) => Self::U64(&s[range]),
            Self::F16(s) => Self::F16(&s[range]),
            Self::F32(s) => Self::F32(&s[range]),
            Self::F64(s) => Self::F64(&s[range]),
            Self::Bool(s) => Self::Bool(&s[range]),
        }
    }

    /// Read element `i` as an unsigned integer, for code arrays.
    ///
    /// Returns `None` for non-integer storage, negative values, or an
    /// out-of-bounds index.
    pub fn get_u64(&self, i: usize) -> Option<u64> {
        match self {
            Self::U8(s) => s.get(i).map(|&v| v as u64),
            Self::U16(s) => s.get(i).map(|&v| v as u64),
            Self::U32(s) => s.get(i).map(|&v| v as u64),
            Self::U64(s) => s.get(i).copied(),
            Self::I8(s) => s.get(i).and_then(|&v| u64::try_from(v).ok()),
            Self::I16(s) => s.get(i).and_then(|&v| u64::try_from(v).ok()),
            Self::I32(s) => s.get(i).and_then(|&v| u64::try_from(v).ok()),
            Self::I64(s) => s.get(i).and_then(|&v| u64::try_from(v).ok()),
            Self::F16(_) | Self::F32(_) | Self::F64(_) | Self::Bool(_) => None,
        }
    }
}

/// A borrowed, typed, writable run of elements.
///
/// Distinct `ValuesMut`s produced from one buffer never overlap, so they can
/// be filled independently (including from different threads).
#[derive(Debug, PartialEq)]
#[allow(missing_docs)]
pub enum ValuesMut<'a> {
    I8(&'a mut [i8]),
    I16(&'a mut [i16]),
    I32(&'a mut [i32]),
    I64(&'a mut [i64]),
    U8(&'a mut [u8]),
    U16(&'a mut [u16]),
    U32(&'a mut [u32]),
    U64(&'a mut [u64]),
    F16(&'a mut [f16]),
    F32(&'a mut [f32]),
    F64(&'a mut [f64]),
    Bool(&'a mut [bool]),
}

impl<'a> ValuesMut<'a> {
    /// The element type.
    pub fn physical(&self) -> PhysicalType {
        self.as_values().physical()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.as_values().len()
    }

    /// Whether the run is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the same run.
    pub fn as_values(&self) -> ValuesRef<'_> {
        match self {
            Self::I8(s) => ValuesRef::I8(s),
            Self::I16(s) => ValuesRef::I16(s),
            Self::I32(s) => ValuesRef::I32(s),
            Self::I64(s) => ValuesRef::I64(s),
            Self::U8(s) => ValuesRef::U8(s),
            Self::U16(s) => ValuesRef::U16(s),
            Self::U32(s) => ValuesRef::U32(s),
            Self::U64(s) => ValuesRef::U64(s),
            Self::F16(s) => ValuesRef::F16(s),
            Self::F32(s) => ValuesRef::F32(s),
            Self::F64(s) => ValuesRef::F64(s),
            Self::Bool(s) => ValuesRef::Bool(s),
        }
    }

    /// Shorter-lived mutable view of the same run.
    pub fn reborrow(&mut self) -> ValuesMut<'_> {
        match self {
            Self::I8(s) => ValuesMut::I8(s),
            Self::I16(s) => ValuesMut::I16(s),
            Self::I32(s) => ValuesMut::I32(s),
            Self::I64(s) => ValuesMut::I64(s),
            Self::U8(s) => ValuesMut::U8(s),
            Self::U16(s) => ValuesMut::U16(s),
            Self::U32(s) => ValuesMut::U32(s),
            Self::U64(s) => ValuesMut::U64(s),
            Self::F16(s) => ValuesMut::F16(s),
            Self::F32(s) => ValuesMut::F32(s),
            Self::F64(s) => ValuesMut::F64(s),
            Self::Bool(s) => ValuesMut::Bool(s),
        }
    }

    /// Narrow to a sub-range, keeping the full lifetime.
    pub fn slice(self, range: Range<usize>) -> ValuesMut<'a> {
        match self {
            Self::I8(s) => Self::I8(&mut s[range]),
            Self::I16(s) => Self::I16(&mut s[range]),
            Self::I32(s) => Self::I32(&mut s[range]),
            Self::I64(s) => Self::I64(&mut s[range]),
            Self::U8(s) => Self::U8(&mut s[range]),
            Self::U16(s) => Self::U16(&mut s[range]),
            Self::U32(s) => Self::U32(&mut s[range]),
            Self::U64(s) => Self::U64(&mut s[range]),
            Self::F16(s) => Self::F16(&mut s[range]),
            Self::F32(s) => Self::F32(&mut s[range]),
            Self::F64(s) => Self::F64(&mut s[range]),
            Self::Bool(s) => Self::Bool(&mut s[range]),
        }
    }

    /// Split into `width` consecutive runs of `len` elements each.
    ///
    /// Works for `len == 0`, where every run is empty.
    ///
    /// # Panics
    ///
    /// Panics if the buffer holds fewer than `width * len` elements.
    pub fn split_runs(self, width: usize, len: usize) -> Vec<ValuesMut<'a>> {
        match self {
            Self::I8(s) => split_runs(s, width, len).into_iter().map(Self::I8).collect(),
            Self::I16(s) => split_runs(s, width, len).into_iter().map(Self::I16).collect(),
            Self::I32(s) => split_runs(s, width, len).into_iter().map(Self::I32).collect(),
            Self::I64(s) => split_runs(s, width, len).into_iter().map(Self::I64).collect(),
            Self::U8(s) => split_runs(s, width, len).into_iter().map(Self::U8).collect(),
            Self::U16(s) => split_runs(s, width, len).into_iter().map(Self::U16).collect(),
            Self::U32(s) => split_runs(s, width, len).into_iter().map(Self::U32).collect(),
            Self::U64(s) => split_runs(s, width, len).into_iter().map(Self::U64).collect(),
            Self::F16(s) => split_runs(s, width, len).into_iter().map(Self::F16).collect(),
            Self::F32(s) => split_runs(s, width, len).into_iter().map(Self::F32).collect(),
            Self::F64(s) => split_runs(s, width, len).into_iter().map(Self::F64).collect(),
            Self::Bool(s) => split_runs(s, width, len).into_iter().map(Self::Bool).collect(),
        }
    }

    /// Write an unsigned integer at `i`, for code arrays.
    ///
    /// Returns `false` when the storage is not an unsigned integer type,
    /// `i` is out of bounds, or `value` does not fit the element width.
    pub fn set_u64(&mut self, i: usize, value: u64) -> bool {
        fn put<T: TryFrom<u64>>(s: &mut [T], i: usize, value: u64) -> bool {
            match (s.get_mut(i), T::try_from(value)) {
                (Some(slot), Ok(v)) => {
                    *slot = v;
                    true
                }
                _ => false,
            }
        }
        match self {
            Self::U8(s) => put(s, i, value),
            Self::U16(s) => put(s, i, value),
            Self::U32(s) => put(s, i, value),
            Self::U64(s) => put(s, i, value),
            _ => false,
        }
    }
}

fn split_runs<T>(mut data: &mut [T], width: usize, len: usize) -> Vec<&mut [T]> {
    let mut runs = Vec::with_capacity(width);
    for _ in 0..width {
        let (run, rest) = std::mem::take(&mut data).split_at_mut(len);
        runs.push(run);
        data = rest;
    }
    runs
}
