//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the column engine. These are
//! plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## SI Units
//!
//! - Length: millimetres (mm)
//! - Area: square millimetres (mm²)
//! - Stress: megapascals (MPa = N/mm²)
//! - Force: newtons (N) internally, kilonewtons (kN) in results
//! - Moment: newton-millimetres (N·mm) internally, kilonewton-metres (kN·m) in results
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Kilonewtons, Megapascals, Newtons, SqMillimeters};
//!
//! let force: Newtons = Megapascals(420.0) * SqMillimeters(1000.0);
//! let force_kn: Kilonewtons = force.into();
//! assert_eq!(force_kn.0, 420.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Geometry
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMillimeters(pub f64);

impl Mul<Millimeters> for Millimeters {
    type Output = SqMillimeters;
    fn mul(self, rhs: Millimeters) -> SqMillimeters {
        SqMillimeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Stress
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

impl Mul<SqMillimeters> for Megapascals {
    type Output = Newtons;
    fn mul(self, rhs: SqMillimeters) -> Newtons {
        Newtons(self.0 * rhs.0)
    }
}

// ============================================================================
// Force
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl Mul<Millimeters> for Newtons {
    type Output = NewtonMillimeters;
    fn mul(self, rhs: Millimeters) -> NewtonMillimeters {
        NewtonMillimeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Moment
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<NewtonMillimeters> for KilonewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KilonewtonMeters(nmm.0 / 1.0e6)
    }
}

impl From<KilonewtonMeters> for NewtonMillimeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(SqMillimeters);
impl_arithmetic!(Megapascals);
impl_arithmetic!(Newtons);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(NewtonMillimeters);
impl_arithmetic!(KilonewtonMeters);
