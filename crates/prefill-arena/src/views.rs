//! Writable views over a frame's storage.
//!
//! [`FrameViews`] is produced by [`Frame::views_mut`](crate::Frame::views_mut)
//! and holds one disjoint mutable borrow per column. Writing through a view
//! writes the frame; nothing is copied.
//!
//! # Borrow-checker design
//!
//! The views are split borrows of the frame's group buffers, so they live
//! for the frame's `&mut` borrow and the frame cannot be read until they
//! are dropped. Individual views can be moved out with [`FrameViews::take`]
//! when several columns must be filled at once (e.g. from scoped threads).

use indexmap::IndexMap;
use prefill_core::{Categories, NativeType, PhysicalType, ValuesMut};

use crate::codes::{CategoryDefMut, CodesMut};

/// One entry in the view mapping.
#[derive(Debug)]
pub enum View<'a> {
    /// A primitive column's run, or a typed index.
    Values(ValuesMut<'a>),
    /// A categorical column's code array.
    Codes(CodesMut<'a>),
    /// A categorical column's label table (the `"<col>-catdef"` entry).
    CategoryDef(CategoryDefMut<'a>),
}

impl<'a> View<'a> {
    /// Element type of the underlying storage, if the view has storage.
    pub fn physical(&self) -> Option<PhysicalType> {
        match self {
            Self::Values(values) => Some(values.physical()),
            Self::Codes(codes) => Some(codes.physical()),
            Self::CategoryDef(_) => None,
        }
    }

    /// Number of rows, if the view has storage.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Values(values) => Some(values.len()),
            Self::Codes(codes) => Some(codes.len()),
            Self::CategoryDef(_) => None,
        }
    }

    /// Consume the view as a concrete slice of the full borrow.
    ///
    /// Code arrays project to their code type.
    pub fn into_slice<T: NativeType>(self) -> Option<&'a mut [T]> {
        match self {
            Self::Values(values) => T::from_values_mut(values),
            Self::Codes(codes) => T::from_values_mut(codes.into_values()),
            Self::CategoryDef(_) => None,
        }
    }
}

/// Mapping from view key to writable view.
///
/// Iteration follows column order; a categorical column's `-catdef` entry
/// directly follows its code entry and a typed index comes last.
#[derive(Debug, Default)]
pub struct FrameViews<'a> {
    views: IndexMap<String, View<'a>>,
}

impl<'a> FrameViews<'a> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            views: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, key: String, view: View<'a>) {
        self.views.insert(key, view);
    }

    /// Look up a view.
    pub fn get(&self, key: &str) -> Option<&View<'a>> {
        self.views.get(key)
    }

    /// Look up a view mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut View<'a>> {
        self.views.get_mut(key)
    }

    /// A column (or typed index) as a concrete mutable slice.
    ///
    /// For a categorical column this is its code array.
    pub fn column<T: NativeType>(&mut self, key: &str) -> Option<&mut [T]> {
        match self.views.get_mut(key)? {
            View::Values(values) => T::from_values_mut(values.reborrow()),
            View::Codes(codes) => codes.as_mut::<T>(),
            View::CategoryDef(_) => None,
        }
    }

    /// A categorical column's code array.
    pub fn codes(&mut self, key: &str) -> Option<&mut CodesMut<'a>> {
        match self.views.get_mut(key)? {
            View::Codes(codes) => Some(codes),
            _ => None,
        }
    }

    /// The label table registered under `key` (a `"<col>-catdef"` key).
    pub fn category_def(&self, key: &str) -> Option<&Categories> {
        match self.views.get(key)? {
            View::CategoryDef(def) => Some(def.categories()),
            _ => None,
        }
    }

    /// The writable label table registered under `key`.
    pub fn category_def_mut(&mut self, key: &str) -> Option<&mut CategoryDefMut<'a>> {
        match self.views.get_mut(key)? {
            View::CategoryDef(def) => Some(def),
            _ => None,
        }
    }

    /// Move a view out of the mapping, keeping the order of the rest.
    pub fn take(&mut self, key: &str) -> Option<View<'a>> {
        self.views.shift_remove(key)
    }

    /// Move a column out as a concrete slice that outlives this mapping.
    ///
    /// Returns `None` and leaves the view in place if the element type does
    /// not match.
    pub fn take_column<T: NativeType>(&mut self, key: &str) -> Option<&'a mut [T]> {
        if self.views.get(key)?.physical()? != T::PHYSICAL {
            return None;
        }
        self.take(key)?.into_slice()
    }

    /// View keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.views.contains_key(key)
    }

    /// Number of views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether there are no views.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Iterate over all views mutably, in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut View<'a>)> {
        self.views.iter_mut().map(|(key, view)| (key.as_str(), view))
    }

    /// Consume into the underlying ordered map.
    pub fn into_inner(self) -> IndexMap<String, View<'a>> {
        self.views
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::allocate;
    use crate::request::FrameRequest;
    use prefill_core::ScalarType;

    #[test]
    fn keys_follow_column_order_with_catdef_and_index() {
        let req = FrameRequest::new("i4,category,f4", 2)
            .with_columns(["a", "b", "c"])
            .with_index(ScalarType::Int64, "id");
        let mut frame = allocate(&req).unwrap();
        let views = frame.views_mut();
        assert_eq!(
            views.keys().collect::<Vec<_>>(),
            ["a", "b", "b-catdef", "c", "id"]
        );
    }

    #[test]
    fn column_rejects_mismatched_type() {
        let mut frame = allocate(&FrameRequest::new("u2", 3)).unwrap();
        let mut views = frame.views_mut();
        assert!(views.column::<i16>("0").is_none());
        assert_eq!(views.column::<u16>("0").unwrap().len(), 3);
    }

    #[test]
    fn take_column_leaves_view_on_type_mismatch() {
        let mut frame = allocate(&FrameRequest::new("f4", 1)).unwrap();
        let mut views = frame.views_mut();
        assert!(views.take_column::<f64>("0").is_none());
        assert!(views.contains_key("0"));
        let col = views.take_column::<f32>("0").unwrap();
        col[0] = 1.5;
        assert!(!views.contains_key("0"));
        drop(views);
        assert_eq!(frame.values::<f32>("0").unwrap(), &[1.5]);
    }

    #[test]
    fn category_def_only_answers_catdef_keys() {
        let req = FrameRequest::new("category", 1).with_categories("0", 3u32);
        let mut frame = allocate(&req).unwrap();
        let mut views = frame.views_mut();
        assert_eq!(views.category_def("0-catdef"), Some(&Categories::Range(3)));
        assert!(views.category_def("0").is_none());
        assert!(views.codes("0-catdef").is_none());
        assert_eq!(views.codes("0").unwrap().category_count(), 3);
    }

    #[test]
    fn range_index_has_no_view() {
        let mut frame = allocate(&FrameRequest::new("i1", 4)).unwrap();
        let views = frame.views_mut();
        assert_eq!(views.len(), 1);
    }

    #[test]
    fn labels_installed_through_catdef_decode_in_frame() {
        let mut frame = allocate(&FrameRequest::new("category", 2)).unwrap();
        {
            let mut views = frame.views_mut();
            views
                .category_def_mut("0-catdef")
                .unwrap()
                .set_labels(vec!["lo".into(), "hi".into()])
                .unwrap();
            assert_eq!(views.codes("0").unwrap().category_count(), 2);
            views.codes("0").unwrap().set(1, 1).unwrap();
        }
        let col = frame.categorical("0").unwrap();
        assert_eq!(col.label(0), Some(prefill_core::Label::Text("lo")));
        assert_eq!(col.label(1), Some(prefill_core::Label::Text("hi")));
    }
}
