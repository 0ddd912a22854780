//! Sample types stored in image buffers.
//!
//! A [`Sample`] is one channel value of one pixel. Unlike display pipelines
//! that normalize to `[0, 1]`, the conversions here keep gray levels as-is:
//!
//! | type  | `MIN_LEVEL` | `MAX_LEVEL` |
//! |-------|-------------|-------------|
//! | `u8`  | 0           | 255         |
//! | `u16` | 0           | 65535       |
//! | `f32` | `f32::MIN`  | `f32::MAX`  |
//! | `f64` | `f64::MIN`  | `f64::MAX`  |
//!
//! Integer conversions from floating point clamp to the valid range and
//! then truncate toward zero. [`Sample::round_from_f64`] rounds instead.

/// Trait for per-channel sample types.
pub trait Sample: Copy + Default + Send + Sync + PartialOrd + std::fmt::Debug + 'static {
    /// Smallest representable level.
    const MIN_LEVEL: f64;

    /// Largest representable level.
    const MAX_LEVEL: f64;

    /// Whether this is a floating-point type.
    const IS_FLOAT: bool;

    /// Zero value.
    fn zero() -> Self;

    /// Converts to `f32` without normalization.
    fn to_f32(self) -> f32;

    /// Converts to `f64` without normalization.
    fn to_f64(self) -> f64;

    /// Converts from `f32`, clamping and truncating for integer types.
    fn from_f32(v: f32) -> Self;

    /// Converts from `f64`, clamping and truncating for integer types.
    fn from_f64(v: f64) -> Self;

    /// Converts from `f64`, rounding to nearest for integer types.
    #[inline]
    fn round_from_f64(v: f64) -> Self {
        if Self::IS_FLOAT {
            Self::from_f64(v)
        } else {
            Self::from_f64(v.round())
        }
    }
}

macro_rules! impl_int_sample {
    ($t:ty) => {
        impl Sample for $t {
            const MIN_LEVEL: f64 = <$t>::MIN as f64;
            const MAX_LEVEL: f64 = <$t>::MAX as f64;
            const IS_FLOAT: bool = false;

            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn to_f32(self) -> f32 {
                self as f32
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f32(v: f32) -> Self {
                // `as` saturates and maps NaN to 0
                v as $t
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }
        }
    };
}

impl_int_sample!(u8);
impl_int_sample!(u16);

impl Sample for f32 {
    const MIN_LEVEL: f64 = f32::MIN as f64;
    const MAX_LEVEL: f64 = f32::MAX as f64;
    const IS_FLOAT: bool = true;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl Sample for f64 {
    const MIN_LEVEL: f64 = f64::MIN;
    const MAX_LEVEL: f64 = f64::MAX;
    const IS_FLOAT: bool = true;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_truncates_and_clamps() {
        assert_eq!(u8::from_f32(12.9), 12);
        assert_eq!(u8::from_f32(-4.0), 0);
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u8::from_f32(f32::NAN), 0);
        assert_eq!(u8::from_f64(254.999), 254);
    }

    #[test]
    fn test_u8_rounding() {
        assert_eq!(u8::round_from_f64(12.5), 13);
        assert_eq!(u8::round_from_f64(12.49), 12);
        assert_eq!(u8::round_from_f64(-0.7), 0);
        assert_eq!(u8::round_from_f64(1e9), 255);
    }

    #[test]
    fn test_levels_not_normalized() {
        assert_eq!(200u8.to_f32(), 200.0);
        assert_eq!(40000u16.to_f64(), 40000.0);
        assert_eq!(u16::MAX_LEVEL, 65535.0);
    }

    #[test]
    fn test_float_passthrough() {
        assert_eq!(f32::from_f64(-3.5), -3.5);
        assert_eq!(f64::round_from_f64(2.25), 2.25);
    }
}
