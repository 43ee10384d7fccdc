//! The empty-frame allocator.
//!
//! [`FrameAllocator::allocate`] turns a [`FrameRequest`] into a [`Frame`]
//! whose storage is fully allocated and zeroed. Callers then fill it in
//! place through [`Frame::views_mut`].

use crate::codes::zeroed_codes;
use crate::config::FrameConfig;
use crate::descriptor::ColumnDescriptor;
use crate::frame::Frame;
use crate::group::ColumnGroup;
use crate::index::FrameIndex;
use crate::request::FrameRequest;
use prefill_core::FrameError;

/// Allocates empty frames under a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct FrameAllocator {
    config: FrameConfig,
}

impl FrameAllocator {
    /// Create an allocator, validating the config.
    pub fn new(config: FrameConfig) -> Result<Self, FrameError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The allocator's configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Allocate a zeroed frame shaped by `request`.
    ///
    /// Columns of the same scalar type share one contiguous group buffer.
    /// Each categorical column gets its own code array, sized to the
    /// narrowest unsigned width that addresses its categories. The index is
    /// a range of `size` positions unless `index_type` is set, in which case
    /// `index_name` is required and a zeroed array of that type is built.
    ///
    /// # Errors
    ///
    /// [`FrameError::MissingIndexName`] if `index_type` is set without
    /// `index_name`; checked before anything is allocated. Otherwise any
    /// error from resolving the column layout or sizing the buffers.
    pub fn allocate(&self, request: &FrameRequest) -> Result<Frame, FrameError> {
        let index_name = match (&request.index_type, &request.index_name) {
            (Some(index_type), None) => {
                return Err(FrameError::MissingIndexName {
                    index_type: *index_type,
                })
            }
            (_, name) => name.clone(),
        };

        let descriptor = ColumnDescriptor::from_request(request, &self.config)?;
        let rows = request.size;

        let mut groups = Vec::with_capacity(descriptor.groups().len());
        for layout in descriptor.groups() {
            let group = ColumnGroup::zeroed(layout.dtype, layout.width(), rows)?;
            tracing::trace!(
                dtype = %layout.dtype,
                width = layout.width(),
                bytes = group.memory_bytes(),
                "allocated column group"
            );
            groups.push(group);
        }

        let mut codes = Vec::with_capacity(descriptor.categorical_count());
        for (name, categories) in descriptor.categoricals() {
            let array = zeroed_codes(categories, rows)?;
            tracing::trace!(
                column = name,
                categories = categories.len(),
                width = ?array.physical(),
                "allocated code array"
            );
            codes.push(array);
        }

        let index = match request.index_type {
            Some(dtype) => FrameIndex::zeroed(dtype, rows)?,
            None => FrameIndex::Range { len: rows },
        };

        let frame = Frame::from_parts(descriptor, groups, codes, index, index_name, rows);
        tracing::debug!(
            rows,
            columns = frame.num_columns(),
            groups = frame.group_count(),
            bytes = frame.memory_bytes(),
            "allocated empty frame"
        );
        Ok(frame)
    }
}

/// Allocate a frame with the default configuration.
///
/// Shorthand for `FrameAllocator::default().allocate(request)`.
pub fn allocate(request: &FrameRequest) -> Result<Frame, FrameError> {
    FrameAllocator::default().allocate(request)
}
