//! Gray-level transforms via lookup tables.
//!
//! A point operation maps each input level `r` to an output level `s`
//! independently of the neighbourhood, so it is stored as a 256-entry
//! table and applied with one indexed load per pixel.
//!
//! # Power law
//!
//! `s = (r / (L-1))^γ * (L-1)` with `L = 256`. `γ < 1` brightens dark
//! regions, `γ > 1` darkens them.
//!
//! ```rust
//! use dip_ops::tone::{Lut, Rounding};
//!
//! let lut = Lut::power_law(0.4, Rounding::Truncate).unwrap();
//! assert_eq!(lut.get(0), 0);
//! assert_eq!(lut.get(255), 255);
//! assert!(lut.get(64) > 64);
//! ```

use crate::{OpsError, OpsResult};
use dip_core::{Gray8, LEVELS};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How fractional table values become integer levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Drop the fraction.
    #[default]
    Truncate,
    /// Round half away from zero.
    Nearest,
}

impl Rounding {
    #[inline]
    fn apply(self, v: f64) -> u8 {
        let v = match self {
            Self::Truncate => v,
            Self::Nearest => v.round(),
        };
        v.clamp(0.0, 255.0) as u8
    }
}

impl FromStr for Rounding {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" | "floor" => Ok(Self::Truncate),
            "nearest" | "round" => Ok(Self::Nearest),
            _ => Err(OpsError::InvalidParameter(format!("unknown rounding '{}'", s))),
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Truncate => "truncate",
            Self::Nearest => "nearest",
        })
    }
}

/// 256-entry table mapping 8-bit levels to 8-bit levels.
#[derive(Clone, PartialEq, Eq)]
pub struct Lut {
    table: [u8; LEVELS],
}

impl fmt::Debug for Lut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lut")
            .field("first", &self.table[0])
            .field("mid", &self.table[LEVELS / 2])
            .field("last", &self.table[LEVELS - 1])
            .finish()
    }
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

impl Lut {
    /// Table with `s = r`.
    pub fn identity() -> Self {
        Self::from_fn(|r| r)
    }

    /// Builds a table by evaluating `f` at every level.
    pub fn from_fn(mut f: impl FnMut(u8) -> u8) -> Self {
        let mut table = [0u8; LEVELS];
        for (r, slot) in table.iter_mut().enumerate() {
            *slot = f(r as u8);
        }
        Self { table }
    }

    /// Wraps an existing table.
    pub fn from_table(table: [u8; LEVELS]) -> Self {
        Self { table }
    }

    /// Power-law (gamma) table.
    ///
    /// # Errors
    ///
    /// `gamma` must be finite and positive.
    pub fn power_law(gamma: f64, rounding: Rounding) -> OpsResult<Self> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "gamma must be finite and > 0, got {}",
                gamma
            )));
        }
        debug!(gamma, %rounding, "power-law table");
        let max = (LEVELS - 1) as f64;
        Ok(Self::from_fn(|r| {
            rounding.apply((r as f64 / max).powf(gamma) * max)
        }))
    }

    /// Output level for input `r`.
    #[inline]
    pub fn get(&self, r: u8) -> u8 {
        self.table[r as usize]
    }

    /// The raw table.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.table
    }

    /// The table as a curve for plotting.
    pub fn to_curve(&self) -> Vec<f32> {
        self.table.iter().map(|&v| v as f32).collect()
    }

    /// Maps every pixel through the table.
    pub fn apply(&self, img: &Gray8) -> Gray8 {
        img.map(|v| self.table[v as usize])
    }
}
