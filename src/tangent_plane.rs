//! # Tangent-plane geometry
//!
//! Planar helpers for the map rectangle and the gnomonic (TAN) projection that ties
//! the plane to the sphere. Offsets `(ξ, η)` are standard coordinates: ξ grows towards
//! increasing RA (east), η towards the north celestial pole, both in radians unless
//! stated otherwise.
use itertools::Itertools;

use crate::constants::{Radian, DPI};

/// Rotate a planar offset counter-clockwise by `rot` radians.
///
/// ```text
/// x' = x·cos(rot) − y·sin(rot)
/// y' = x·sin(rot) + y·cos(rot)
/// ```
pub fn rotate_offset(x: f64, y: f64, rot: Radian) -> (f64, f64) {
    let (sin_rot, cos_rot) = rot.sin_cos();
    (x * cos_rot - y * sin_rot, x * sin_rot + y * cos_rot)
}

/// Deproject standard coordinates onto the sphere (inverse gnomonic projection).
///
/// Arguments
/// -----------------
/// * `xi`, `eta`: standard coordinates, radians.
/// * `ra_zero`, `dec_zero`: tangent point, radians.
///
/// Return
/// ----------
/// * `(ra, dec)` in radians, RA normalised to [0, 2π).
pub fn tangent_plane_to_sky(xi: f64, eta: f64, ra_zero: Radian, dec_zero: Radian) -> (Radian, Radian) {
    let (sin_dz, cos_dz) = dec_zero.sin_cos();
    let denom = cos_dz - eta * sin_dz;

    let ra = (xi.atan2(denom) + ra_zero).rem_euclid(DPI);
    let dec = (sin_dz + eta * cos_dz).atan2(xi.hypot(denom));
    (ra, dec)
}

/// Project a sky position onto the plane tangent at `(ra_zero, dec_zero)`.
///
/// Return
/// ----------
/// * `Some((xi, eta))` in radians, or `None` when the position lies 90° or more
///   from the tangent point and has no gnomonic image.
pub fn sky_to_tangent_plane(
    ra: Radian,
    dec: Radian,
    ra_zero: Radian,
    dec_zero: Radian,
) -> Option<(f64, f64)> {
    let (sin_dz, cos_dz) = dec_zero.sin_cos();
    let (sin_d, cos_d) = dec.sin_cos();
    let (sin_dra, cos_dra) = (ra - ra_zero).sin_cos();

    let denom = sin_d * sin_dz + cos_d * cos_dz * cos_dra;
    if denom <= f64::EPSILON {
        return None;
    }

    let xi = cos_d * sin_dra / denom;
    let eta = (sin_d * cos_dz - cos_d * sin_dz * cos_dra) / denom;
    Some((xi, eta))
}

/// Area of a simple planar polygon (shoelace formula), vertices in order.
///
/// The result is unsigned and in the square of the input unit. Fewer than three
/// vertices give zero.
pub fn polygon_area(vertices: &[(f64, f64)]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let twice_area: f64 = vertices
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.0 * b.1 - b.0 * a.1)
        .sum();

    twice_area.abs() / 2.0
}
