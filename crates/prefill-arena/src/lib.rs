//! Empty-frame allocation with aliasing column views.
//!
//! A reader that knows its output schema up front asks for a [`Frame`] of
//! the right shape, then writes decoded values straight into the frame's
//! storage through [`FrameViews`], with no intermediate buffers and no copy.
//!
//! # Architecture
//!
//! ```text
//! FrameRequest ──► ColumnDescriptor (name → type, placement)
//!                        │
//!                        ▼
//! Frame
//! ├── ColumnGroup × n    (one zeroed buffer per scalar type,
//! │                       columns laid out slot after slot)
//! ├── code arrays        (one per categorical column, u8/u16/u32)
//! └── FrameIndex         (range, or a zeroed typed array)
//!
//! Frame::views_mut() ──► FrameViews  "a" → run of group 0
//!                                    "c" → code array
//!                                    "c-catdef" → label table (writable)
//!                                    "<index_name>" → typed index
//! ```
//!
//! # Safety
//!
//! All storage is zero-initialised `Vec`s. Views are disjoint `&mut`
//! borrows obtained by splitting those buffers, so no `unsafe` is needed.
//!
//! # Example
//!
//! ```
//! use prefill_arena::{allocate, FrameRequest};
//!
//! let request = FrameRequest::new("i4,category", 3)
//!     .with_columns(["n", "kind"])
//!     .with_categories("kind", ["low", "high"]);
//! let mut frame = allocate(&request).unwrap();
//! {
//!     let mut views = frame.views_mut();
//!     views.column::<i32>("n").unwrap().copy_from_slice(&[1, 2, 3]);
//!     views.codes("kind").unwrap().extend_from(0, &[0, 1, 1]).unwrap();
//! }
//! assert_eq!(frame.values::<i32>("n").unwrap(), &[1, 2, 3]);
//! let kind = frame.categorical("kind").unwrap();
//! assert_eq!(kind.label(2).unwrap().to_string(), "high");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alloc;
pub mod codes;
pub mod config;
pub mod descriptor;
pub mod frame;
pub mod group;
pub mod index;
pub mod request;
pub mod views;

pub use alloc::{allocate, FrameAllocator};
pub use codes::{CategoricalRef, CategoryDefMut, CodesMut};
pub use config::FrameConfig;
pub use descriptor::{
    catdef_key, ColumnDescriptor, ColumnEntry, GroupLayout, Placement, CATDEF_SUFFIX,
};
pub use frame::{ColumnRef, Frame};
pub use group::ColumnGroup;
pub use index::FrameIndex;
pub use request::{FrameRequest, TypeSpec};
pub use views::{FrameViews, View};
