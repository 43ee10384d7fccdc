//! Categorical code arrays and their typed access wrappers.
//!
//! Codes are stored as the narrowest unsigned integer that addresses every
//! category (see [`CodeWidth`](prefill_core::CodeWidth)). Raw writes through
//! [`CodesMut::values`] are unchecked; [`CodesMut::set`] checks the code
//! against the category count. Label tables are replaced through
//! [`CategoryDefMut`] or [`Frame::set_categories`](crate::Frame::set_categories).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use prefill_core::{
    Categories, CodeWidth, ColumnValues, FrameError, Label, NativeType, PhysicalType, ValuesMut,
    ValuesRef,
};

/// Allocate a zeroed code array for `rows` rows of the given categories.
pub(crate) fn zeroed_codes(categories: &Categories, rows: usize) -> Result<ColumnValues, FrameError> {
    let width = categories.code_width().physical();
    if rows
        .checked_mul(width.byte_width())
        .is_none_or(|bytes| bytes > isize::MAX as usize)
    {
        return Err(FrameError::CapacityOverflow { rows, columns: 1 });
    }
    Ok(ColumnValues::zeroed(width, rows))
}

/// Read-only access to a categorical column.
#[derive(Clone, Copy, Debug)]
pub struct CategoricalRef<'a> {
    name: &'a str,
    categories: &'a Categories,
    codes: ValuesRef<'a>,
}

impl<'a> CategoricalRef<'a> {
    pub(crate) fn new(name: &'a str, categories: &'a Categories, codes: ValuesRef<'a>) -> Self {
        Self {
            name,
            categories,
            codes,
        }
    }

    /// The column name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The label table.
    pub fn categories(&self) -> &'a Categories {
        self.categories
    }

    /// The raw code array.
    pub fn codes(&self) -> ValuesRef<'a> {
        self.codes
    }

    /// The code array as a concrete slice type (`u8`, `u16` or `u32`).
    pub fn codes_as<T: NativeType>(&self) -> Option<&'a [T]> {
        T::from_values(self.codes)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// The code at `row`, widened to `u32`.
    pub fn code(&self, row: usize) -> Option<u32> {
        self.codes.get_u64(row).map(|c| c as u32)
    }

    /// Decode the value at `row`. `None` if the row or code is out of range.
    pub fn label(&self, row: usize) -> Option<Label<'a>> {
        self.categories.label(self.code(row)?)
    }

    /// Check every code against the category count.
    pub fn validate(&self) -> Result<(), FrameError> {
        for row in 0..self.len() {
            let code = self.codes.get_u64(row).unwrap_or(u64::MAX);
            if !self.categories.contains_code(code) {
                return Err(FrameError::CodeOutOfRange {
                    column: self.name.to_string(),
                    row,
                    code,
                    categories: self.categories.len(),
                });
            }
        }
        Ok(())
    }
}

/// Replace a column's label table, keeping the allocated code width.
///
/// Fails if `labels` needs wider codes than `width` addresses; codes
/// already written are left as they are.
pub(crate) fn install_labels(
    column: &str,
    categories: &mut Categories,
    width: CodeWidth,
    labels: Vec<String>,
) -> Result<(), FrameError> {
    if labels.len() > width.max_categories() {
        return Err(FrameError::CategoryWidthExceeded {
            column: column.to_string(),
            categories: labels.len(),
            max: width.max_categories(),
        });
    }
    *categories = Categories::Labels(labels);
    Ok(())
}

/// Writable view of a categorical column's code array.
///
/// Aliases the frame's storage: codes written here are what
/// [`Frame::categorical`](crate::Frame::categorical) later decodes. The
/// category count used by the checked writers is shared with the column's
/// [`CategoryDefMut`], so it follows label changes made through that view.
#[derive(Debug)]
pub struct CodesMut<'a> {
    name: &'a str,
    categories: Arc<AtomicUsize>,
    values: ValuesMut<'a>,
}

impl<'a> CodesMut<'a> {
    pub(crate) fn new(name: &'a str, categories: Arc<AtomicUsize>, values: ValuesMut<'a>) -> Self {
        Self {
            name,
            categories,
            values,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element type of the code array.
    pub fn physical(&self) -> PhysicalType {
        self.values.physical()
    }

    /// Number of categories the codes index into.
    pub fn category_count(&self) -> usize {
        self.categories.load(Ordering::Relaxed)
    }

    /// The raw, unchecked code storage.
    pub fn values(&mut self) -> ValuesMut<'_> {
        self.values.reborrow()
    }

    /// The code array as a concrete slice type. Writes are unchecked.
    pub fn as_mut<T: NativeType>(&mut self) -> Option<&mut [T]> {
        T::from_values_mut(self.values.reborrow())
    }

    /// Consume the view, keeping the full borrow of the frame.
    pub fn into_values(self) -> ValuesMut<'a> {
        self.values
    }

    /// Read the code at `row`.
    pub fn get(&self, row: usize) -> Option<u32> {
        self.values.as_values().get_u64(row).map(|c| c as u32)
    }

    fn check(&self, row: usize, code: u32) -> Result<(), FrameError> {
        let categories = self.category_count();
        if row >= self.len() {
            return Err(FrameError::RowOutOfBounds {
                column: self.name.to_string(),
                row,
                rows: self.len(),
            });
        }
        if code as usize >= categories {
            return Err(FrameError::CodeOutOfRange {
                column: self.name.to_string(),
                row,
                code: code as u64,
                categories,
            });
        }
        Ok(())
    }

    /// Write a code, checking the row exists and the code addresses a
    /// category.
    pub fn set(&mut self, row: usize, code: u32) -> Result<(), FrameError> {
        self.check(row, code)?;
        self.values.set_u64(row, code as u64);
        Ok(())
    }

    /// Write codes for consecutive rows starting at `offset`.
    ///
    /// Every code is checked before any is written, so on error the column
    /// is unchanged.
    pub fn extend_from(&mut self, offset: usize, codes: &[u32]) -> Result<(), FrameError> {
        for (i, &code) in codes.iter().enumerate() {
            let row = offset.checked_add(i).ok_or(FrameError::RowOutOfBounds {
                column: self.name.to_string(),
                row: usize::MAX,
                rows: self.len(),
            })?;
            self.check(row, code)?;
        }
        for (i, &code) in codes.iter().enumerate() {
            self.values.set_u64(offset + i, code as u64);
        }
        Ok(())
    }
}

/// Writable view of a categorical column's label table: the `"<col>-catdef"`
/// entry of [`FrameViews`](crate::FrameViews).
///
/// A reader that allocated placeholder categories installs the real
/// dictionary here once it is known. The code array keeps the width it was
/// allocated with, so a label set needing wider codes is rejected.
#[derive(Debug)]
pub struct CategoryDefMut<'a> {
    name: &'a str,
    categories: &'a mut Categories,
    width: CodeWidth,
    count: Arc<AtomicUsize>,
}

impl<'a> CategoryDefMut<'a> {
    pub(crate) fn new(
        name: &'a str,
        categories: &'a mut Categories,
        width: CodeWidth,
        count: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            name,
            categories,
            width,
            count,
        }
    }

    /// The column this table belongs to.
    pub fn column(&self) -> &'a str {
        self.name
    }

    /// The current label table.
    pub fn categories(&self) -> &Categories {
        self.categories
    }

    /// Width of the column's code array.
    pub fn code_width(&self) -> CodeWidth {
        self.width
    }

    /// Replace the label table.
    pub fn set_labels(&mut self, labels: Vec<String>) -> Result<(), FrameError> {
        install_labels(self.name, self.categories, self.width, labels)?;
        self.count.store(self.categories.len(), Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: usize) -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(n))
    }

    #[test]
    fn code_array_uses_narrowest_width() {
        let small = zeroed_codes(&Categories::Range(10), 4).unwrap();
        assert_eq!(small.physical(), PhysicalType::U8);
        let default = zeroed_codes(&Categories::Range(65_536), 4).unwrap();
        assert_eq!(default.physical(), CodeWidth::U16.physical());
        let large = zeroed_codes(&Categories::Range(70_000), 4).unwrap();
        assert_eq!(large.physical(), PhysicalType::U32);
    }

    #[test]
    fn set_checks_category_count() {
        let mut codes = zeroed_codes(&Categories::Range(3), 2).unwrap();
        let mut view = CodesMut::new("c", count(3), codes.as_values_mut());
        assert!(view.set(0, 2).is_ok());
        assert_eq!(
            view.set(1, 3),
            Err(FrameError::CodeOutOfRange {
                column: "c".into(),
                row: 1,
                code: 3,
                categories: 3,
            })
        );
        assert_eq!(view.get(0), Some(2));
        assert_eq!(view.get(1), Some(0));
    }

    #[test]
    fn raw_writes_are_unchecked_and_validate_reports_them() {
        let cats = Categories::Labels(vec!["a".into(), "b".into()]);
        let mut codes = zeroed_codes(&cats, 3).unwrap();
        {
            let mut view = CodesMut::new("c", count(cats.len()), codes.as_values_mut());
            view.as_mut::<u8>().unwrap().copy_from_slice(&[1, 0, 7]);
        }
        let col = CategoricalRef::new("c", &cats, codes.as_values());
        assert_eq!(col.label(0), Some(Label::Text("b")));
        assert_eq!(col.label(1), Some(Label::Text("a")));
        assert_eq!(col.label(2), None);
        assert!(matches!(
            col.validate(),
            Err(FrameError::CodeOutOfRange { row: 2, code: 7, .. })
        ));
    }

    #[test]
    fn extend_from_writes_consecutive_rows() {
        let mut codes = zeroed_codes(&Categories::Range(4), 4).unwrap();
        let mut view = CodesMut::new("c", count(4), codes.as_values_mut());
        view.extend_from(1, &[3, 2, 1]).unwrap();
        assert_eq!(view.as_mut::<u8>().unwrap(), &[0, 3, 2, 1]);
    }

    #[test]
    fn out_of_bounds_rows_are_errors() {
        let mut codes = zeroed_codes(&Categories::Range(2), 2).unwrap();
        let mut view = CodesMut::new("c", count(2), codes.as_values_mut());
        assert_eq!(
            view.set(2, 0),
            Err(FrameError::RowOutOfBounds {
                column: "c".into(),
                row: 2,
                rows: 2,
            })
        );
        assert_eq!(
            view.extend_from(1, &[1, 1]),
            Err(FrameError::RowOutOfBounds {
                column: "c".into(),
                row: 2,
                rows: 2,
            })
        );
        // Nothing is written when any row fails.
        assert_eq!(view.get(1), Some(0));
    }

    #[test]
    fn extend_from_rejects_whole_batch_on_bad_code() {
        let mut codes = zeroed_codes(&Categories::Range(3), 3).unwrap();
        let mut view = CodesMut::new("c", count(3), codes.as_values_mut());
        assert!(matches!(
            view.extend_from(0, &[1, 2, 3]),
            Err(FrameError::CodeOutOfRange { row: 2, code: 3, .. })
        ));
        assert_eq!(view.as_mut::<u8>().unwrap(), &[0, 0, 0]);
    }

    #[test]
    fn set_labels_updates_shared_count() {
        let mut cats = Categories::Range(2);
        let shared = count(2);
        let mut codes = zeroed_codes(&cats, 1).unwrap();
        let mut view = CodesMut::new("c", Arc::clone(&shared), codes.as_values_mut());
        {
            let mut def = CategoryDefMut::new("c", &mut cats, CodeWidth::U8, shared);
            def.set_labels(vec!["a".into(), "b".into(), "z".into()]).unwrap();
            assert_eq!(def.categories().len(), 3);
        }
        assert_eq!(view.category_count(), 3);
        assert!(view.set(0, 2).is_ok());
        assert_eq!(cats.label(2), Some(Label::Text("z")));
    }

    #[test]
    fn labels_wider_than_code_array_are_rejected() {
        let mut cats = Categories::Range(4);
        let labels: Vec<String> = (0..257).map(|i| i.to_string()).collect();
        let err = install_labels("c", &mut cats, CodeWidth::U8, labels).unwrap_err();
        assert_eq!(
            err,
            FrameError::CategoryWidthExceeded {
                column: "c".into(),
                categories: 257,
                max: 256,
            }
        );
        assert_eq!(cats, Categories::Range(4));
    }
}
