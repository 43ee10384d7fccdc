//! The allocated frame and read access to its columns.
//!
//! A [`Frame`] owns its column groups, categorical code arrays and index.
//! Readers fill it through [`Frame::views_mut`]; everything here reads or
//! writes the same storage those views alias.

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use prefill_core::{
    Categories, CodeWidth, ColumnType, ColumnValues, FrameError, NativeType, ScalarType, ValuesMut,
    ValuesRef,
};

use crate::codes::{install_labels, CategoricalRef, CategoryDefMut, CodesMut};
use crate::descriptor::{catdef_key, ColumnDescriptor, ColumnEntry, Placement};
use crate::group::ColumnGroup;
use crate::index::FrameIndex;
use crate::views::{FrameViews, View};

/// Read access to one column.
#[derive(Clone, Copy, Debug)]
pub enum ColumnRef<'a> {
    /// A primitive column.
    Values {
        /// Scalar type of the column.
        dtype: ScalarType,
        /// The column's run within its group.
        values: ValuesRef<'a>,
    },
    /// A categorical column.
    Categorical(CategoricalRef<'a>),
}

/// A preallocated table: named, typed, zero-initialised columns of equal
/// length plus an index.
#[derive(Clone, Debug)]
pub struct Frame {
    descriptor: ColumnDescriptor,
    groups: Vec<ColumnGroup>,
    codes: Vec<ColumnValues>,
    index: FrameIndex,
    index_name: Option<String>,
    rows: usize,
}

impl Frame {
    pub(crate) fn from_parts(
        descriptor: ColumnDescriptor,
        groups: Vec<ColumnGroup>,
        codes: Vec<ColumnValues>,
        index: FrameIndex,
        index_name: Option<String>,
        rows: usize,
    ) -> Self {
        Self {
            descriptor,
            groups,
            codes,
            index,
            index_name,
            rows,
        }
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (the index is not counted).
    pub fn num_columns(&self) -> usize {
        self.descriptor.len()
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.descriptor.names()
    }

    /// Whether a column exists.
    pub fn contains(&self, name: &str) -> bool {
        self.descriptor.get(name).is_some()
    }

    /// Type of one column.
    pub fn column_type(&self, name: &str) -> Option<&ColumnType> {
        self.descriptor.get(name).map(|entry| &entry.column_type)
    }

    /// `(name, type)` for every column, in order.
    pub fn dtypes(&self) -> Vec<(&str, &ColumnType)> {
        self.descriptor
            .iter()
            .map(|(name, entry)| (name.as_str(), &entry.column_type))
            .collect()
    }

    /// Timezone annotation of a datetime column.
    pub fn timezone(&self, name: &str) -> Option<&str> {
        self.descriptor.get(name)?.timezone.as_deref()
    }

    /// The column descriptor.
    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.descriptor
    }

    /// Number of primitive column groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// The row index.
    pub fn index(&self) -> &FrameIndex {
        &self.index
    }

    /// The index name, if one was given.
    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    /// A typed index as a concrete mutable slice; `None` for a range index.
    pub fn index_mut<T: NativeType>(&mut self) -> Option<&mut [T]> {
        T::from_values_mut(self.index.values_mut()?)
    }

    /// Read one column.
    pub fn column(&self, name: &str) -> Option<ColumnRef<'_>> {
        let entry = self.descriptor.get(name)?;
        match (&entry.column_type, entry.placement) {
            (ColumnType::Primitive(dtype), Placement::Group { group, slot }) => {
                Some(ColumnRef::Values {
                    dtype: *dtype,
                    values: self.groups[group].column(slot),
                })
            }
            (ColumnType::Categorical(_), Placement::Categorical { .. }) => {
                self.categorical(name).map(ColumnRef::Categorical)
            }
            _ => None,
        }
    }

    /// Raw storage of one column; the code array for a categorical column.
    pub fn raw(&self, name: &str) -> Option<ValuesRef<'_>> {
        match self.descriptor.get(name)?.placement {
            Placement::Group { group, slot } => Some(self.groups[group].column(slot)),
            Placement::Categorical { slot } => Some(self.codes[slot].as_values()),
        }
    }

    /// Mutable raw storage of one column.
    pub fn raw_mut(&mut self, name: &str) -> Option<ValuesMut<'_>> {
        match self.descriptor.get(name)?.placement {
            Placement::Group { group, slot } => Some(self.groups[group].column_mut(slot)),
            Placement::Categorical { slot } => Some(self.codes[slot].as_values_mut()),
        }
    }

    /// One column as a concrete slice; `None` if absent or of another type.
    pub fn values<T: NativeType>(&self, name: &str) -> Option<&[T]> {
        T::from_values(self.raw(name)?)
    }

    /// One column as a concrete mutable slice.
    pub fn values_mut<T: NativeType>(&mut self, name: &str) -> Option<&mut [T]> {
        T::from_values_mut(self.raw_mut(name)?)
    }

    /// Read a categorical column.
    pub fn categorical(&self, name: &str) -> Option<CategoricalRef<'_>> {
        let (key, entry) = self.descriptor.get_key_value(name)?;
        match (&entry.column_type, entry.placement) {
            (ColumnType::Categorical(categories), Placement::Categorical { slot }) => Some(
                CategoricalRef::new(key, categories, self.codes[slot].as_values()),
            ),
            _ => None,
        }
    }

    /// Check every categorical code in the frame against its label table.
    ///
    /// Writes through views are unchecked; call this after filling if the
    /// source of the codes is untrusted.
    pub fn validate_codes(&self) -> Result<(), FrameError> {
        for name in self.descriptor.categoricals().map(|(name, _)| name) {
            if let Some(column) = self.categorical(name) {
                column.validate()?;
            }
        }
        Ok(())
    }

    /// Total bytes of column, code and index storage.
    pub fn memory_bytes(&self) -> usize {
        self.groups.iter().map(ColumnGroup::memory_bytes).sum::<usize>()
            + self.codes.iter().map(ColumnValues::memory_bytes).sum::<usize>()
            + self.index.memory_bytes()
    }

    /// Writable views over every column, keyed by column name.
    ///
    /// Each primitive column maps to its run within its column group. A
    /// categorical column `c` contributes two entries: `"c"` for its code
    /// array and `"c-catdef"` for its label table. A typed index is keyed by
    /// the index name. All views alias this frame's storage, label tables
    /// included.
    pub fn views_mut(&mut self) -> FrameViews<'_> {
        let Frame {
            descriptor,
            groups,
            codes,
            index,
            index_name,
            ..
        } = self;
        let capacity = descriptor.len() + descriptor.categorical_count() + 1;

        let mut group_runs: Vec<Vec<Option<ValuesMut<'_>>>> = groups
            .iter_mut()
            .map(|group| group.split_mut().into_iter().map(Some).collect())
            .collect();
        let mut code_runs: Vec<Option<ValuesMut<'_>>> = codes
            .iter_mut()
            .map(|codes| Some(codes.as_values_mut()))
            .collect();

        let mut views = FrameViews::with_capacity(capacity);
        for (name, entry) in descriptor.iter_mut() {
            let ColumnEntry {
                column_type,
                placement,
                ..
            } = entry;
            match (column_type, *placement) {
                (_, Placement::Group { group, slot }) => {
                    if let Some(run) = group_runs[group][slot].take() {
                        views.insert(name.clone(), View::Values(run));
                    }
                }
                (ColumnType::Categorical(categories), Placement::Categorical { slot }) => {
                    if let Some(run) = code_runs[slot].take() {
                        let Some(width) = CodeWidth::from_physical(run.physical()) else {
                            continue;
                        };
                        let count = Arc::new(AtomicUsize::new(categories.len()));
                        let codes = CodesMut::new(name, Arc::clone(&count), run);
                        views.insert(name.clone(), View::Codes(codes));
                        views.insert(
                            catdef_key(name),
                            View::CategoryDef(CategoryDefMut::new(name, categories, width, count)),
                        );
                    }
                }
                (ColumnType::Primitive(_), Placement::Categorical { .. }) => {}
            }
        }

        if let (Some(name), Some(values)) = (index_name.as_ref(), index.values_mut()) {
            views.insert(name.clone(), View::Values(values));
        }
        views
    }

    /// Replace the label table of a categorical column.
    ///
    /// The code array keeps its allocated width; a label set needing wider
    /// codes is rejected. Codes already written are not touched.
    pub fn set_categories(&mut self, name: &str, labels: Vec<String>) -> Result<(), FrameError> {
        let not_categorical = || FrameError::NotCategorical {
            column: name.to_string(),
        };
        let (key, entry) = self.descriptor.get_mut(name).ok_or_else(not_categorical)?;
        match (&mut entry.column_type, entry.placement) {
            (ColumnType::Categorical(categories), Placement::Categorical { slot }) => {
                let width = CodeWidth::from_physical(self.codes[slot].physical())
                    .ok_or_else(not_categorical)?;
                install_labels(key, categories, width, labels)
            }
            _ => Err(not_categorical()),
        }
    }

    /// Label table of a categorical column.
    pub fn categories(&self, name: &str) -> Option<&Categories> {
        self.column_type(name)?.categories()
    }
}
