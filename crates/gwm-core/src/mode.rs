//! Spherical-harmonic mode indices.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, WaveError};

/// Degree/order pair `(l, m)` of a spin-weighted spherical-harmonic mode.
///
/// Serialized as a two element array `[l, m]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u32, i32)", into = "(u32, i32)")]
pub struct Mode {
    l: u32,
    m: i32,
}

impl Mode {
    /// The dominant quadrupole mode `(2, 2)`.
    pub const DOMINANT: Mode = Mode { l: 2, m: 2 };

    /// Creates a mode, rejecting orders with `|m| > l`.
    pub fn new(l: u32, m: i32) -> Result<Self, WaveError> {
        if m.unsigned_abs() > l {
            return Err(WaveError::Validation(
                ErrorInfo::new("invalid-mode", "mode order must satisfy |m| <= l")
                    .with_context("l", l)
                    .with_context("m", m),
            ));
        }
        Ok(Self { l, m })
    }

    /// Degree of the mode.
    pub fn l(&self) -> u32 {
        self.l
    }

    /// Order of the mode.
    pub fn m(&self) -> i32 {
        self.m
    }

    /// Returns `(l, |m|)`, the form under which modes are stored.
    pub fn canonical(&self) -> Self {
        Self {
            l: self.l,
            m: self.m.abs(),
        }
    }

    /// Returns `(l, -m)`.
    pub fn conjugate(&self) -> Self {
        Self {
            l: self.l,
            m: -self.m,
        }
    }

    /// True when `m >= 0`.
    pub fn is_canonical(&self) -> bool {
        self.m >= 0
    }
}

impl TryFrom<(u32, i32)> for Mode {
    type Error = WaveError;

    fn try_from((l, m): (u32, i32)) -> Result<Self, Self::Error> {
        Mode::new(l, m)
    }
}

impl From<Mode> for (u32, i32) {
    fn from(mode: Mode) -> Self {
        (mode.l, mode.m)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.l, self.m)
    }
}
