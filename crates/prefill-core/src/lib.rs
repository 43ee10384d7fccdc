//! Core types for the prefill workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the allocator and its callers: scalar and
//! categorical column types, the type-code parser, owned and borrowed
//! column storage, the [`NativeType`] bridge from Rust primitives to that
//! storage, and the [`FrameError`] type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod category;
pub mod dtype;
pub mod error;
pub mod native;
pub mod values;

pub use category::{Categories, CategorySpec, CodeWidth, Label, DEFAULT_CATEGORY_CAPACITY};
pub use dtype::{parse_type_list, ColumnType, PhysicalType, ScalarType, TimeUnit, TypeTag};
pub use error::FrameError;
pub use native::NativeType;
pub use values::{ColumnValues, ValuesMut, ValuesRef};

pub use half::f16;
