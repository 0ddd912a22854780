//! Border handling for neighbourhood operations.
//!
//! A window centred near the edge reaches outside the image. [`BorderMode`]
//! decides which source sample (if any) stands in for such coordinates:
//!
//! ```text
//! image:       a b c d
//! Constant:  k k | a b c d | k k
//! Replicate: a a | a b c d | d d
//! Reflect:   b a | a b c d | d c
//! Reflect101:c b | a b c d | c b
//! Wrap:      c d | a b c d | a b
//! ```

use crate::{OpsError, OpsResult};
use dip_core::{Gray, Sample};
use std::fmt;
use std::str::FromStr;

/// How out-of-range coordinates are resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderMode {
    /// Pads with a fixed value.
    Constant(f32),
    /// Repeats the edge sample.
    Replicate,
    /// Mirrors including the edge sample.
    Reflect,
    /// Mirrors around the edge sample.
    Reflect101,
    /// Periodic continuation.
    Wrap,
}

impl Default for BorderMode {
    fn default() -> Self {
        Self::Reflect
    }
}

impl BorderMode {
    /// Zero padding.
    pub const ZERO: Self = Self::Constant(0.0);

    /// Maps `i` onto `0..len`, or `None` for constant padding.
    ///
    /// ```rust
    /// use dip_ops::BorderMode;
    ///
    /// assert_eq!(BorderMode::Reflect.resolve(-1, 4), Some(0));
    /// assert_eq!(BorderMode::Reflect101.resolve(-1, 4), Some(1));
    /// assert_eq!(BorderMode::Wrap.resolve(5, 4), Some(1));
    /// assert_eq!(BorderMode::ZERO.resolve(-1, 4), None);
    /// ```
    #[inline]
    pub fn resolve(self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let n = len as isize;
        if (0..n).contains(&i) {
            return Some(i as usize);
        }
        let idx = match self {
            Self::Constant(_) => return None,
            Self::Replicate => i.clamp(0, n - 1),
            Self::Reflect => {
                let m = i.rem_euclid(2 * n);
                if m < n {
                    m
                } else {
                    2 * n - 1 - m
                }
            }
            Self::Reflect101 => {
                if n == 1 {
                    0
                } else {
                    let period = 2 * n - 2;
                    let m = i.rem_euclid(period);
                    if m < n {
                        m
                    } else {
                        period - m
                    }
                }
            }
            Self::Wrap => i.rem_euclid(n),
        };
        Some(idx as usize)
    }

    /// Fetches the sample at (x, y) as `f32`, applying the border rule.
    #[inline]
    pub fn fetch<T: Sample>(self, img: &Gray<T>, x: isize, y: isize) -> f32 {
        let w = img.width() as usize;
        let h = img.height() as usize;
        match (self.resolve(x, w), self.resolve(y, h)) {
            (Some(sx), Some(sy)) => img.data()[sy * w + sx].to_f32(),
            _ => match self {
                Self::Constant(v) => v,
                _ => 0.0,
            },
        }
    }
}

impl fmt::Display for BorderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => write!(f, "constant:{}", v),
            Self::Replicate => f.write_str("replicate"),
            Self::Reflect => f.write_str("reflect"),
            Self::Reflect101 => f.write_str("reflect101"),
            Self::Wrap => f.write_str("wrap"),
        }
    }
}

impl FromStr for BorderMode {
    type Err = OpsError;

    /// Parses `constant[:v]`, `replicate` (or `edge`), `reflect`,
    /// `reflect101` and `wrap`.
    fn from_str(s: &str) -> OpsResult<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "constant" | "zero" => Ok(Self::ZERO),
            "replicate" | "edge" => Ok(Self::Replicate),
            "reflect" | "symmetric" => Ok(Self::Reflect),
            "reflect101" | "reflect_101" => Ok(Self::Reflect101),
            "wrap" => Ok(Self::Wrap),
            other => match other.strip_prefix("constant:") {
                Some(v) => v
                    .parse::<f32>()
                    .map(Self::Constant)
                    .map_err(|e| OpsError::InvalidParameter(format!("border value '{}': {}", v, e))),
                None => Err(OpsError::InvalidParameter(format!("unknown border mode '{}'", s))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dip_core::Gray8;

    fn row(mode: BorderMode) -> Vec<Option<usize>> {
        (-3..7).map(|i| mode.resolve(i, 4)).collect()
    }

    #[test]
    fn test_reflect_sequences() {
        let some = |v: &[usize]| v.iter().map(|&i| Some(i)).collect::<Vec<_>>();
        assert_eq!(row(BorderMode::Reflect), some(&[2, 1, 0, 0, 1, 2, 3, 3, 2, 1]));
        assert_eq!(row(BorderMode::Reflect101), some(&[3, 2, 1, 0, 1, 2, 3, 2, 1, 0]));
        assert_eq!(row(BorderMode::Replicate), some(&[0, 0, 0, 0, 1, 2, 3, 3, 3, 3]));
        assert_eq!(row(BorderMode::Wrap), some(&[1, 2, 3, 0, 1, 2, 3, 0, 1, 2]));
    }

    #[test]
    fn test_large_overhang_stays_in_range() {
        for mode in [BorderMode::Reflect, BorderMode::Reflect101, BorderMode::Wrap] {
            for i in -40..40 {
                let idx = mode.resolve(i, 3).unwrap();
                assert!(idx < 3, "{} -> {} for {}", i, idx, mode);
            }
        }
        assert_eq!(BorderMode::Reflect101.resolve(-5, 1), Some(0));
    }

    #[test]
    fn test_fetch_constant() {
        let img = Gray8::filled(2, 2, [10]);
        assert_eq!(BorderMode::Constant(7.0).fetch(&img, -1, 0), 7.0);
        assert_eq!(BorderMode::Replicate.fetch(&img, -1, 5), 10.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("edge".parse::<BorderMode>().unwrap(), BorderMode::Replicate);
        assert_eq!("constant:128".parse::<BorderMode>().unwrap(), BorderMode::Constant(128.0));
        assert_eq!(BorderMode::Reflect101.to_string().parse::<BorderMode>().unwrap(), BorderMode::Reflect101);
        assert!("mirror".parse::<BorderMode>().is_err());
    }
}
