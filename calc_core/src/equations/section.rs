//! # Cross-Section Formulas
//!
//! Geometry of a rectangular tied column with perimeter bars.
//!
//! ## Notation
//!
//! - `b` = Width of section (perpendicular to the bending direction)
//! - `h` = Depth of section (parallel to the bending direction)
//! - `cc` = Clear cover to the ties
//! - `d_b` = Main bar diameter
//! - `d_s` = Tie diameter
//! - `d_c` = Depth to the bar layer nearest the compression face
//! - `d_t` = Depth to the extreme tension bar layer
//!
//! ```text
//!     ┌─────────────────┐ ← extreme compression fiber
//!     │  ●     ●     ●  │ ← d_c
//!     │                 │
//!   h │  ●           ●  │
//!     │                 │
//!     │  ●     ●     ●  │ ← d_t
//!     └─────────────────┘
//!              b
//! ```

use std::f64::consts::PI;

/// Gross area of a rectangular section, Ag = b × h
///
/// # Example
/// ```rust
/// use calc_core::equations::section::rectangular_area;
///
/// assert_eq!(rectangular_area(300.0, 500.0), 150_000.0);
/// ```
#[inline]
pub fn rectangular_area(b: f64, h: f64) -> f64 {
    b * h
}

/// Total area of `count` round bars of diameter `d_b`
///
/// # Formula
/// As = n × π d_b² / 4
#[inline]
pub fn bar_group_area(d_b: f64, count: u32) -> f64 {
    count as f64 * PI * d_b.powi(2) / 4.0
}

/// Depth from the compression face to the centre of a face bar
///
/// # Formula
/// d_c = cc + d_s + d_b / 2
///
/// # Example
/// ```rust
/// use calc_core::equations::section::edge_bar_depth;
///
/// // 40 mm cover, 10 mm ties, 25 mm bars
/// assert_eq!(edge_bar_depth(40.0, 25.0, 10.0), 62.5);
/// ```
#[inline]
pub fn edge_bar_depth(clear_cover: f64, d_b: f64, d_s: f64) -> f64 {
    clear_cover + d_s + d_b / 2.0
}

/// Effective depths (d_c, d_t) for a section of depth `h`
///
/// # Formula
/// - d_c = cc + d_s + d_b / 2
/// - d_t = h − cc − d_s − d_b / 2
pub fn effective_depths(h: f64, clear_cover: f64, d_b: f64, d_s: f64) -> (f64, f64) {
    let d_c = edge_bar_depth(clear_cover, d_b, d_s);
    (d_c, h - d_c)
}

/// Clear spacing between `n` bars along one face of length `side`
///
/// # Formula
/// s = (side − 2 cc − 2 d_s − n d_b) / (n − 1)
///
/// Returns `None` for fewer than two bars (no gap to measure).
///
/// # Example
/// ```rust
/// use calc_core::equations::section::face_clear_spacing;
///
/// // 250 mm face, 40 mm cover, 10 mm ties, two 16 mm bars
/// let s = face_clear_spacing(250.0, 40.0, 16.0, 10.0, 2).unwrap();
/// assert!((s - 118.0).abs() < 1e-9);
/// ```
pub fn face_clear_spacing(side: f64, clear_cover: f64, d_b: f64, d_s: f64, n: u32) -> Option<f64> {
    if n < 2 {
        return None;
    }
    Some((side - 2.0 * clear_cover - 2.0 * d_s - n as f64 * d_b) / (n - 1) as f64)
}

/// Longitudinal reinforcement ratio ρ = As / Ag
#[inline]
pub fn steel_ratio(steel_area: f64, gross_area: f64) -> f64 {
    steel_area / gross_area
}

/// Total bar count for a perimeter layout with `n_b` bars on each
/// width face and `n_h` bars on each depth face (corners shared)
///
/// # Formula
/// n = 2 n_b + 2 (n_h − 2)
#[inline]
pub fn perimeter_bar_count(n_b: u32, n_h: u32) -> u32 {
    2 * n_b + 2 * n_h.saturating_sub(2)
}
