//! Prefill: preallocated columnar frames for zero-copy readers.
//!
//! A columnar file reader usually knows the full output schema (names,
//! types, row count, categorical label sets) before it decodes a single
//! value. This crate allocates the whole output table up front, zeroed,
//! and hands back one writable view per column so the reader can decode
//! straight into the final storage.
//!
//! This is the top-level facade crate re-exporting the sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use prefill::prelude::*;
//!
//! let request = FrameRequest::new("i4,f4,category", 3)
//!     .with_columns(["a", "b", "c"])
//!     .with_categories("c", ["x", "y"])
//!     .with_index(ScalarType::Int64, "row");
//! let mut frame = allocate(&request).unwrap();
//!
//! {
//!     let mut views = frame.views_mut();
//!     views.column::<i32>("a").unwrap().copy_from_slice(&[1, 2, 3]);
//!     views.column::<f32>("b").unwrap()[1] = 0.5;
//!     views.codes("c").unwrap().set(2, 1).unwrap();
//!     views.column::<i64>("row").unwrap().copy_from_slice(&[10, 20, 30]);
//!     assert!(views.category_def("c-catdef").is_some());
//! }
//!
//! assert_eq!(frame.values::<i32>("a").unwrap(), &[1, 2, 3]);
//! assert_eq!(frame.values::<f32>("b").unwrap(), &[0.0, 0.5, 0.0]);
//! let c = frame.categorical("c").unwrap();
//! assert_eq!(c.label(2), Some(Label::Text("y")));
//! assert_eq!(frame.index().values_as::<i64>(), Some(&[10i64, 20, 30][..]));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `prefill-core` | Scalar and categorical types, type codes, storage, errors |
//! | [`arena`] | `prefill-arena` | The allocator, `Frame`, `FrameViews`, config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Frame allocation and column views (`prefill-arena`).
///
/// Most users only need [`arena::allocate`], [`arena::Frame`] and
/// [`arena::FrameViews`], which are also in the [`prelude`].
pub use prefill_arena as arena;

/// Column types, type-code parsing and typed storage (`prefill-core`).
pub use prefill_core as types;

/// Common imports for typical usage.
///
/// ```rust
/// use prefill::prelude::*;
/// ```
pub mod prelude {
    // Allocation
    pub use prefill_arena::{allocate, FrameAllocator, FrameConfig, FrameRequest, TypeSpec};

    // Frame and views
    pub use prefill_arena::{
        CategoricalRef, CategoryDefMut, CodesMut, ColumnRef, Frame, FrameIndex, FrameViews, View,
    };

    // Types
    pub use prefill_core::{
        f16, Categories, CategorySpec, ColumnType, Label, NativeType, ScalarType, TimeUnit,
        TypeTag,
    };

    // Errors
    pub use prefill_core::FrameError;
}
