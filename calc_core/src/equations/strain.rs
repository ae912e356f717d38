//! # Strain Compatibility Formulas
//!
//! Plane sections remain plane: strain varies linearly with distance from
//! the neutral axis, reaching εcu at the extreme compression fiber.
//!
//! ```text
//!   εcu ─┐
//!        │╲
//!      c │  ╲           ε(y) = εcu (c − y) / c
//!        │    ╲
//!   ─────┼──────╲──── neutral axis
//!        │        ╲
//!    d_t │          ╲
//!        └───────────● εt
//! ```
//!
//! Compression strain is positive.
//!
//! ## References
//!
//! - ACI 318-19 22.2.1 (design assumptions)
//! - Wight & MacGregor, *Reinforced Concrete*, Chapter 11

/// Strain at depth `y` for neutral axis depth `c`
///
/// # Formula
/// ε(y) = εcu (c − y) / c
///
/// `c` must be non-zero; callers validate it first.
#[inline]
pub fn linear_strain(ultimate_strain: f64, c: f64, y: f64) -> f64 {
    ultimate_strain * (c - y) / c
}

/// Neutral axis depth that produces tensile strain `tensile_strain` at `d_t`
///
/// # Formula
/// c = εcu d_t / (εcu + εt)
///
/// # Example
/// ```rust
/// use calc_core::equations::strain::neutral_axis_for_tensile_strain;
///
/// // Balanced: εt = εy = 0.0021, d_t = 435 mm
/// let c = neutral_axis_for_tensile_strain(0.003, 435.0, 0.0021);
/// assert!((c - 255.882).abs() < 0.001);
/// ```
#[inline]
pub fn neutral_axis_for_tensile_strain(ultimate_strain: f64, d_t: f64, tensile_strain: f64) -> f64 {
    ultimate_strain * d_t / (ultimate_strain + tensile_strain)
}

/// Depth of the equivalent rectangular stress block, clipped to the section
///
/// # Formula
/// a = min(β1 c, h), and zero when c ≤ 0
#[inline]
pub fn stress_block_depth(beta1: f64, c: f64, h: f64) -> f64 {
    if c <= 0.0 {
        0.0
    } else {
        (beta1 * c).min(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_strain_at_extreme_fiber() {
        assert_eq!(linear_strain(0.003, 200.0, 0.0), 0.003);
        assert_eq!(linear_strain(0.003, 200.0, 200.0), 0.0);
    }

    #[test]
    fn test_linear_strain_in_tension() {
        // y = 2c → ε = −εcu
        assert!((linear_strain(0.003, 100.0, 200.0) + 0.003).abs() < 1e-15);
    }

    #[test]
    fn test_neutral_axis_roundtrip() {
        let c = neutral_axis_for_tensile_strain(0.003, 435.0, 0.005);
        let eps_t = -linear_strain(0.003, c, 435.0);
        assert!((eps_t - 0.005).abs() < 1e-15);
    }

    #[test]
    fn test_stress_block_clipped() {
        assert_eq!(stress_block_depth(0.85, 100.0, 500.0), 85.0);
        assert_eq!(stress_block_depth(0.85, 1000.0, 500.0), 500.0);
        assert_eq!(stress_block_depth(0.85, -10.0, 500.0), 0.0);
    }
}
