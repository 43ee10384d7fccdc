//! Test fixtures for prefill development.
//!
//! Provides canned [`FrameRequest`]s shaped like real reader output and a
//! deterministic fill pattern ([`fill_rows`] / [`check_rows`]) so tests can
//! write through views and verify the frame without hand-writing per-type
//! loops.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use prefill_arena::{FrameRequest, FrameViews, View};
use prefill_core::{f16, ScalarType, ValuesMut, ValuesRef};

/// Labels of the `side` column in [`trades_request`].
pub const SIDES: [&str; 2] = ["buy", "sell"];

/// A trade-log shaped request: repeated dtypes, an explicit categorical,
/// a placeholder categorical, a zoned timestamp and a typed index.
///
/// Columns: `id: i8`, `price: f8`, `qty: i4`, `side: category(SIDES)`,
/// `venue: category(4)`, `ts: M8[ns] (UTC)`, `fee: f8`, `open: b1`.
/// Index: `seq: u4`.
pub fn trades_request(rows: usize) -> FrameRequest {
    FrameRequest::new("i8,f8,i4,category,category,M8[ns],f8,b1", rows)
        .with_columns(["id", "price", "qty", "side", "venue", "ts", "fee", "open"])
        .with_categories("side", SIDES)
        .with_categories("venue", 4u32)
        .with_timezone("ts", "UTC")
        .with_index(ScalarType::UInt32, "seq")
}

/// A request with `width` columns cycling through every scalar code.
pub fn wide_request(width: usize, rows: usize) -> FrameRequest {
    const CODES: [&str; 14] = [
        "i1", "i2", "i4", "i8", "u1", "u2", "u4", "u8", "f2", "f4", "f8", "b1", "M8[us]", "m8[ms]",
    ];
    let types: Vec<&str> = CODES.iter().copied().cycle().take(width).collect();
    FrameRequest::new(types.join(","), rows)
}

/// The value [`fill_rows`] writes at `row` with `seed`, as an `f64`.
///
/// Wraps at 100 so every type (including `i8` and `f16`) holds it exactly.
pub fn pattern(seed: u64, row: usize) -> f64 {
    ((seed + row as u64) % 100) as f64
}

/// Write [`pattern`] into a value run. Booleans get `pattern % 2 == 1`.
pub fn fill_rows(values: ValuesMut<'_>, seed: u64) {
    fn fill<T>(s: &mut [T], seed: u64, f: impl Fn(f64) -> T) {
        for (row, v) in s.iter_mut().enumerate() {
            *v = f(pattern(seed, row));
        }
    }
    match values {
        ValuesMut::I8(s) => fill(s, seed, |p| p as i8),
        ValuesMut::I16(s) => fill(s, seed, |p| p as i16),
        ValuesMut::I32(s) => fill(s, seed, |p| p as i32),
        ValuesMut::I64(s) => fill(s, seed, |p| p as i64),
        ValuesMut::U8(s) => fill(s, seed, |p| p as u8),
        ValuesMut::U16(s) => fill(s, seed, |p| p as u16),
        ValuesMut::U32(s) => fill(s, seed, |p| p as u32),
        ValuesMut::U64(s) => fill(s, seed, |p| p as u64),
        ValuesMut::F16(s) => fill(s, seed, f16::from_f64),
        ValuesMut::F32(s) => fill(s, seed, |p| p as f32),
        ValuesMut::F64(s) => fill(s, seed, |p| p),
        ValuesMut::Bool(s) => fill(s, seed, |p| p as u64 % 2 == 1),
    }
}

/// Whether a run holds exactly what [`fill_rows`] wrote with `seed`.
pub fn check_rows(values: ValuesRef<'_>, seed: u64) -> bool {
    fn check<T>(s: &[T], seed: u64, f: impl Fn(&T) -> f64) -> bool {
        s.iter()
            .enumerate()
            .all(|(row, v)| f(v) == pattern(seed, row))
    }
    match values {
        ValuesRef::I8(s) => check(s, seed, |&v| v as f64),
        ValuesRef::I16(s) => check(s, seed, |&v| v as f64),
        ValuesRef::I32(s) => check(s, seed, |&v| v as f64),
        ValuesRef::I64(s) => check(s, seed, |&v| v as f64),
        ValuesRef::U8(s) => check(s, seed, |&v| v as f64),
        ValuesRef::U16(s) => check(s, seed, |&v| v as f64),
        ValuesRef::U32(s) => check(s, seed, |&v| v as f64),
        ValuesRef::U64(s) => check(s, seed, |&v| v as f64),
        ValuesRef::F16(s) => check(s, seed, |&v| v.to_f64()),
        ValuesRef::F32(s) => check(s, seed, |&v| v as f64),
        ValuesRef::F64(s) => check(s, seed, |&v| v),
        ValuesRef::Bool(s) => s
            .iter()
            .enumerate()
            .all(|(row, &v)| v == (pattern(seed, row) as u64 % 2 == 1)),
    }
}

/// Seed used for the view at position `k` by [`fill_views`].
pub fn seed_for(k: usize) -> u64 {
    k as u64 * 7
}

/// Fill every view with the row pattern, seeded by view position.
///
/// Code arrays get `pattern % category_count`, written through the checked
/// setter; `-catdef` entries are skipped.
pub fn fill_views(views: &mut FrameViews<'_>) {
    for (k, (_, view)) in views.iter_mut().enumerate() {
        let seed = seed_for(k);
        match view {
            View::Values(values) => fill_rows(values.reborrow(), seed),
            View::Codes(codes) => {
                let count = codes.category_count() as u64;
                for row in 0..codes.len() {
                    let code = (pattern(seed, row) as u64 % count) as u32;
                    if codes.set(row, code).is_err() {
                        panic!("code {code} rejected for {count} categories");
                    }
                }
            }
            View::CategoryDef(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefill_core::{ColumnValues, PhysicalType};

    #[test]
    fn fill_then_check_every_physical_type() {
        let types = [
            PhysicalType::I8,
            PhysicalType::I16,
            PhysicalType::I32,
            PhysicalType::I64,
            PhysicalType::U8,
            PhysicalType::U16,
            PhysicalType::U32,
            PhysicalType::U64,
            PhysicalType::F16,
            PhysicalType::F32,
            PhysicalType::F64,
            PhysicalType::Bool,
        ];
        for physical in types {
            let mut values = ColumnValues::zeroed(physical, 150);
            fill_rows(values.as_values_mut(), 3);
            assert!(check_rows(values.as_values(), 3), "{physical:?}");
            assert!(!check_rows(values.as_values(), 4), "{physical:?}");
        }
    }

    #[test]
    fn wide_request_cycles_codes() {
        let req = wide_request(16, 1);
        match req.types {
            prefill_arena::TypeSpec::Codes(codes) => {
                assert!(codes.starts_with("i1,i2"));
                assert!(codes.ends_with("m8[ms],i1,i2"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
