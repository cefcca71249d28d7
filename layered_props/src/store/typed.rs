//! Typed scalar getters over the flat leaves.

use serde_json::Value;

use super::PropertyStore;
use crate::mapper::from_dynamic;

macro_rules! typed_getters {
    ($($ty:ty => $get:ident, $get_or:ident;)*) => {
        impl PropertyStore {
            $(
                #[doc = concat!("Leaf at `key` as `", stringify!($ty), "`, or the zero value.")]
                #[must_use]
                pub fn $get(&self, key: &str) -> $ty {
                    self.$get_or(key, <$ty>::default())
                }

                #[doc = concat!("Leaf at `key` as `", stringify!($ty), "`, or `default` when absent.")]
                ///
                /// A present leaf that cannot be coerced yields the zero value.
                #[must_use]
                pub fn $get_or(&self, key: &str, default: $ty) -> $ty {
                    self.leaf(key)
                        .map_or(default, |leaf| from_dynamic(&leaf).unwrap_or_default())
                }
            )*
        }
    };
}

typed_getters! {
    i8 => get_i8, get_i8_or;
    i16 => get_i16, get_i16_or;
    i32 => get_i32, get_i32_or;
    i64 => get_i64, get_i64_or;
    isize => get_isize, get_isize_or;
    u8 => get_u8, get_u8_or;
    u16 => get_u16, get_u16_or;
    u32 => get_u32, get_u32_or;
    u64 => get_u64, get_u64_or;
    usize => get_usize, get_usize_or;
    f32 => get_f32, get_f32_or;
    f64 => get_f64, get_f64_or;
    bool => get_bool, get_bool_or;
}

impl PropertyStore {
    fn leaf(&self, key: &str) -> Option<Value> {
        self.snapshot().flat().get(key).cloned()
    }

    /// Leaf at `key` as text, or the empty string.
    ///
    /// Numbers and booleans are rendered in their canonical form.
    #[must_use]
    pub fn get_string(&self, key: &str) -> String {
        self.get_string_or(key, "")
    }

    /// Leaf at `key` as text, or `default` when absent.
    #[must_use]
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.leaf(key).map_or_else(
            || default.to_owned(),
            |leaf| from_dynamic(&leaf).unwrap_or_default(),
        )
    }
}
