//! Bridge from Rust element types to tagged column storage.

use half::f16;

use crate::dtype::PhysicalType;
use crate::values::{ValuesMut, ValuesRef};

/// A Rust type that can back a column.
///
/// Lets callers ask for `&mut [i32]` directly instead of matching on
/// [`ValuesMut`]. The projection returns `None` when the storage holds a
/// different element type.
pub trait NativeType: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// The storage tag this type corresponds to.
    const PHYSICAL: PhysicalType;

    /// Project a read-only run onto `&[Self]`.
    fn from_values(values: ValuesRef<'_>) -> Option<&[Self]>;

    /// Project a writable run onto `&mut [Self]`.
    fn from_values_mut(values: ValuesMut<'_>) -> Option<&mut [Self]>;
}

macro_rules! native_type {
    ($ty:ty, $variant:ident) => {
        impl NativeType for $ty {
            const PHYSICAL: PhysicalType = PhysicalType::$variant;

            fn from_values(values: ValuesRef<'_>) -> Option<&[Self]> {
                match values {
                    ValuesRef::$variant(s) => Some(s),
                    _ => None,
                }
            }

            fn from_values_mut(values: ValuesMut<'_>) -> Option<&mut [Self]> {
                match values {
                    ValuesMut::$variant(s) => Some(s),
                    _ => None,
                }
            }
        }
    };
}

native_type!(i8, I8);
native_type!(i16, I16);
native_type!(i32, I32);
native_type!(i64, I64);
native_type!(u8, U8);
native_type!(u16, U16);
native_type!(u32, U32);
native_type!(u64, U64);
native_type!(f16, F16);
native_type!(f32, F32);
native_type!(f64, F64);
native_type!(bool, Bool);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::ColumnValues;

    #[test]
    fn projection_matches_physical_type() {
        let mut values = ColumnValues::zeroed(PhysicalType::F32, 3);
        assert!(f32::from_values(values.as_values()).is_some());
        assert!(f64::from_values(values.as_values()).is_none());

        let slice = f32::from_values_mut(values.as_values_mut()).unwrap();
        slice[1] = 2.5;
        assert_eq!(f32::from_values(values.as_values()).unwrap(), &[0.0, 2.5, 0.0]);
    }

    #[test]
    fn physical_constants_line_up() {
        assert_eq!(<i64 as NativeType>::PHYSICAL, PhysicalType::I64);
        assert_eq!(<f16 as NativeType>::PHYSICAL, PhysicalType::F16);
        assert_eq!(<bool as NativeType>::PHYSICAL, PhysicalType::Bool);
    }
}
