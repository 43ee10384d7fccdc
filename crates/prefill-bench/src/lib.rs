//! Benchmark profiles for prefill frame allocation.
//!
//! Provides request shapes resembling real reader output:
//!
//! - [`narrow_profile`]: a handful of mixed columns, the common case
//! - [`wide_profile`]: hundreds of columns spread over every scalar type
//! - [`categorical_profile`]: many categorical columns of varying size

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use prefill_arena::{FrameRequest, FrameViews, View};
use prefill_core::{NativeType, ScalarType};

const SCALAR_CODES: [&str; 12] = [
    "i1", "i2", "i4", "i8", "u1", "u2", "u4", "u8", "f2", "f4", "f8", "b1",
];

/// Six mixed columns (two sharing `f8`), one categorical, a typed index.
pub fn narrow_profile(rows: usize) -> FrameRequest {
    FrameRequest::new("i8,f8,f8,i4,category,M8[ns]", rows)
        .with_columns(["id", "bid", "ask", "size", "venue", "ts"])
        .with_categories("venue", ["nyse", "nasdaq", "arca", "bats"])
        .with_index(ScalarType::Int64, "seq")
}

/// `width` primitive columns cycling through every scalar type.
pub fn wide_profile(width: usize, rows: usize) -> FrameRequest {
    let types: Vec<&str> = SCALAR_CODES.iter().copied().cycle().take(width).collect();
    FrameRequest::new(types.join(","), rows)
}

/// `count` categorical columns; every third uses the default capacity,
/// the rest carry explicit label sets of growing size.
pub fn categorical_profile(count: usize, rows: usize) -> FrameRequest {
    let types = vec!["category"; count].join(",");
    let mut request = FrameRequest::new(types, rows);
    for k in (0..count).filter(|k| k % 3 != 0) {
        let labels: Vec<String> = (0..(k + 1) * 10).map(|i| format!("label-{i}")).collect();
        request = request.with_categories(k.to_string(), labels);
    }
    request
}

/// Write `row` into every primitive run of a frame, the way a decoder
/// would after allocation.
pub fn fill_all(views: &mut FrameViews<'_>) {
    for (_, view) in views.iter_mut() {
        if let View::Values(values) = view {
            if let Some(s) = f64::from_values_mut(values.reborrow()) {
                s.iter_mut().enumerate().for_each(|(r, v)| *v = r as f64);
            } else if let Some(s) = i64::from_values_mut(values.reborrow()) {
                s.iter_mut().enumerate().for_each(|(r, v)| *v = r as i64);
            } else if let Some(s) = i32::from_values_mut(values.reborrow()) {
                s.iter_mut().enumerate().for_each(|(r, v)| *v = r as i32);
            }
        }
    }
}
