//! # Astrometric reference-system kernels
//!
//! Rotation matrices and vector corrections used to express a base pointing in the
//! celestial frame requested by the tracking system:
//!
//! - [`prec`]: IAU 1976 precession, J2000 mean equator → mean equator of date,
//! - [`rnut80`]: IAU 1980 nutation, mean equator of date → true equator of date,
//! - [`earth_velocity`] and [`correct_aberration`]: annual aberration,
//! - [`galactic_to_equatorial`]: IAU Galactic → J2000 equatorial,
//! - [`apparent_place`]: the full J2000 mean → apparent geocentric chain.
//!
//! All time arguments are Modified Julian Dates in the TT scale.
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{
    ArcSec, Radian, ABERRATION_CONSTANT, DAYS_PER_JULIAN_CENTURY, DPI, MJD, RADEG, RADSEC, T2000,
    VLIGHT_AU,
};

/// Rotation from IAU 1958 Galactic axes to J2000 equatorial axes.
///
/// Rows are the Galactic unit vectors (centre, l = 90°, north pole) expressed in the
/// equatorial frame, so equatorial = Mᵀ · galactic.
#[allow(clippy::excessive_precision)]
const GALACTIC_AXES_J2000: [[f64; 3]; 3] = [
    [
        -0.054875560416215368492398900454,
        -0.873437090234885048760383168409,
        -0.483835015548713226831774175116,
    ],
    [
        0.494109427875583673525222371358,
        -0.444829629960011178146614061616,
        0.746982244497218890527388004556,
    ],
    [
        -0.867666149019004701181616534570,
        -0.198076373431201528180486091412,
        0.455983776175066922272100478348,
    ],
];

/// One periodic term of the IAU 1980 nutation series.
///
/// Multipliers of the fundamental arguments (D, M, M', F, Ω), then the
/// longitude (sine) and obliquity (cosine) amplitudes with their secular rates,
/// in units of 0.0001″ and 0.0001″ per Julian century.
struct NutationTerm {
    d: f64,
    m: f64,
    mp: f64,
    f: f64,
    om: f64,
    psi: f64,
    psi_t: f64,
    eps: f64,
    eps_t: f64,
}

#[allow(clippy::too_many_arguments)]
const fn term(
    d: f64,
    m: f64,
    mp: f64,
    f: f64,
    om: f64,
    psi: f64,
    psi_t: f64,
    eps: f64,
    eps_t: f64,
) -> NutationTerm {
    NutationTerm {
        d,
        m,
        mp,
        f,
        om,
        psi,
        psi_t,
        eps,
        eps_t,
    }
}

/// Terms of the IAU 1980 series down to 0.0005″.
///
/// The omitted tail stays below 0.01″ in both angles.
#[rustfmt::skip]
const NUTATION_TERMS: [NutationTerm; 49] = [
    term( 0.,  0.,  0.,  0., 1., -171996., -174.2, 92025.,  8.9),
    term(-2.,  0.,  0.,  2., 2.,  -13187.,   -1.6,  5736., -3.1),
    term( 0.,  0.,  0.,  2., 2.,   -2274.,   -0.2,   977., -0.5),
    term( 0.,  0.,  0.,  0., 2.,    2062.,    0.2,  -895.,  0.5),
    term( 0.,  1.,  0.,  0., 0.,    1426.,   -3.4,    54., -0.1),
    term( 0.,  0.,  1.,  0., 0.,     712.,    0.1,    -7.,  0.0),
    term(-2.,  1.,  0.,  2., 2.,    -517.,    1.2,   224., -0.6),
    term( 0.,  0.,  0.,  2., 1.,    -386.,   -0.4,   200.,  0.0),
    term( 0.,  0.,  1.,  2., 2.,    -301.,    0.0,   129., -0.1),
    term(-2., -1.,  0.,  2., 2.,     217.,   -0.5,   -95.,  0.3),
    term(-2.,  0.,  1.,  0., 0.,    -158.,    0.0,     0.,  0.0),
    term(-2.,  0.,  0.,  2., 1.,     129.,    0.1,   -70.,  0.0),
    term( 0.,  0., -1.,  2., 2.,     123.,    0.0,   -53.,  0.0),
    term( 2.,  0.,  0.,  0., 0.,      63.,    0.0,     0.,  0.0),
    term( 0.,  0.,  1.,  0., 1.,      63.,    0.1,   -33.,  0.0),
    term( 2.,  0., -1.,  2., 2.,     -59.,    0.0,    26.,  0.0),
    term( 0.,  0., -1.,  0., 1.,     -58.,   -0.1,    32.,  0.0),
    term( 0.,  0.,  1.,  2., 1.,     -51.,    0.0,    27.,  0.0),
    term(-2.,  0.,  2.,  0., 0.,      48.,    0.0,     0.,  0.0),
    term( 0.,  0., -2.,  2., 1.,      46.,    0.0,   -24.,  0.0),
    term( 2.,  0.,  0.,  2., 2.,     -38.,    0.0,    16.,  0.0),
    term( 0.,  0.,  2.,  2., 2.,     -31.,    0.0,    13.,  0.0),
    term( 0.,  0.,  2.,  0., 0.,      29.,    0.0,     0.,  0.0),
    term(-2.,  0.,  1.,  2., 2.,      29.,    0.0,   -12.,  0.0),
    term( 0.,  0.,  0.,  2., 0.,      26.,    0.0,     0.,  0.0),
    term(-2.,  0.,  0.,  2., 0.,     -22.,    0.0,     0.,  0.0),
    term( 0.,  0., -1.,  2., 1.,      21.,    0.0,   -10.,  0.0),
    term( 0.,  2.,  0.,  0., 0.,      17.,   -0.1,     0.,  0.0),
    term( 2.,  0., -1.,  0., 1.,      16.,    0.0,    -8.,  0.0),
    term(-2.,  2.,  0.,  2., 2.,     -16.,    0.1,     7.,  0.0),
    term( 0.,  1.,  0.,  0., 1.,     -15.,    0.0,     9.,  0.0),
    term(-2.,  0.,  1.,  0., 1.,     -13.,    0.0,     7.,  0.0),
    term( 0., -1.,  0.,  0., 1.,     -12.,    0.0,     6.,  0.0),
    term( 0.,  0.,  2., -2., 0.,      11.,    0.0,     0.,  0.0),
    term( 2.,  0., -1.,  2., 1.,     -10.,    0.0,     5.,  0.0),
    term( 2.,  0.,  1.,  2., 2.,      -8.,    0.0,     3.,  0.0),
    term( 0.,  1.,  0.,  2., 2.,       7.,    0.0,    -3.,  0.0),
    term(-2.,  1.,  1.,  0., 0.,      -7.,    0.0,     0.,  0.0),
    term( 0., -1.,  0.,  2., 2.,      -7.,    0.0,     3.,  0.0),
    term( 2.,  0.,  0.,  2., 1.,      -7.,    0.0,     3.,  0.0),
    term( 2.,  0.,  1.,  0., 0.,       6.,    0.0,     0.,  0.0),
    term(-2.,  0.,  2.,  2., 2.,       6.,    0.0,    -3.,  0.0),
    term(-2.,  0.,  1.,  2., 1.,       6.,    0.0,    -3.,  0.0),
    term( 2.,  0., -2.,  0., 1.,      -6.,    0.0,     3.,  0.0),
    term( 2.,  0.,  0.,  0., 1.,      -6.,    0.0,     3.,  0.0),
    term( 0., -1.,  1.,  0., 0.,       5.,    0.0,     0.,  0.0),
    term(-2., -1.,  0.,  2., 1.,      -5.,    0.0,     3.,  0.0),
    term(-2.,  0.,  0.,  0., 1.,      -5.,    0.0,     3.,  0.0),
    term( 0.,  0.,  2.,  2., 1.,      -5.,    0.0,     3.,  0.0),
];

/// Julian centuries elapsed since J2000.0.
fn centuries_since_j2000(tjm: MJD) -> f64 {
    (tjm - T2000) / DAYS_PER_JULIAN_CENTURY
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// The rotation is **active**: the returned `R` turns a vector by `alpha` in the
/// direct sense around the chosen axis, `x' = R · x`. A change of basis by `alpha`
/// is therefore `rotmt(-alpha, k)`.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians**.
/// * `k` - Axis index: `0` → X, `1` → Y, any other value → Z.
pub(crate) fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        _ => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Mean obliquity of the ecliptic (IAU 1976), in radians.
///
/// ```text
/// ε(T) = 23°26′21.448″ − 46.815″·T − 0.0006″·T² + 0.00181″·T³
/// ```
/// evaluated with Horner's scheme, `T` in Julian centuries from J2000.0.
pub(crate) fn obleq(tjm: MJD) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = centuries_since_j2000(tjm);

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Nutation in longitude and obliquity (IAU 1980 / Wahr), in arcseconds.
///
/// The fundamental arguments are the Delaunay variables of the Moon and the Sun:
/// mean elongation D, solar mean anomaly M, lunar mean anomaly M′, argument of
/// latitude F and longitude of the lunar node Ω. Each series term contributes
/// `(S + S′·T)·sin(arg)` to Δψ and `(C + C′·T)·cos(arg)` to Δε.
///
/// Returns
/// --------
/// * `(Δψ, Δε)` in arcseconds.
pub(crate) fn nutn80(tjm: MJD) -> (ArcSec, ArcSec) {
    let t = centuries_since_j2000(tjm);
    let t2 = t * t;
    let t3 = t2 * t;

    let mp = ((485866.733 + 1717915922.633 * t + 31.310 * t2 + 0.064 * t3) * RADSEC) % DPI;
    let m = ((1287099.804 + 129596581.224 * t - 0.577 * t2 - 0.012 * t3) * RADSEC) % DPI;
    let f = ((335778.877 + 1739527263.137 * t - 13.257 * t2 + 0.011 * t3) * RADSEC) % DPI;
    let d = ((1072261.307 + 1602961601.328 * t - 6.891 * t2 + 0.019 * t3) * RADSEC) % DPI;
    let om = ((450160.280 - 6962890.539 * t + 7.455 * t2 + 0.008 * t3) * RADSEC) % DPI;

    let (dpsi, deps) = NUTATION_TERMS
        .iter()
        .fold((0.0, 0.0), |(dpsi, deps), term| {
            let arg = term.d * d + term.m * m + term.mp * mp + term.f * f + term.om * om;
            let (sin_arg, cos_arg) = arg.sin_cos();
            (
                dpsi + (term.psi + term.psi_t * t) * sin_arg,
                deps + (term.eps + term.eps_t * t) * cos_arg,
            )
        });

    // 0.0001″ → ″
    (dpsi * 1e-4, deps * 1e-4)
}

/// Nutation matrix, mean equator and equinox of date → true equator and equinox of date.
///
/// Three frame rotations: about X by +ε (onto the ecliptic), about Z by −Δψ,
/// about X by −(ε + Δε) (back to the true equator).
///
/// Returns
/// --------
/// * `N` such that `x_true = N · x_mean`.
pub(crate) fn rnut80(tjm: MJD) -> Matrix3<f64> {
    let epsm = obleq(tjm);
    let (dpsi, deps) = nutn80(tjm);
    let epst = epsm + deps * RADSEC;

    rotmt(epst, 0) * rotmt(dpsi * RADSEC, 2) * rotmt(-epsm, 0)
}

/// Precession matrix (IAU 1976), J2000 mean equator → mean equator of date.
///
/// Built from the equatorial precession angles
///
/// ```text
/// ζ(T) = (0.6406161 + 0.0000839·T + 0.0000050·T²) · T  [deg]
/// θ(T) = (0.5567530 − 0.0001185·T − 0.0000116·T²) · T  [deg]
/// z(T) = (0.6406161 + 0.0003041·T + 0.0000051·T²) · T  [deg]
/// ```
/// as the frame rotation `R_z(−z) · R_y(θ) · R_z(−ζ)`.
///
/// Returns
/// --------
/// * `P` such that `x_date = P · x_J2000`.
pub(crate) fn prec(tjm: MJD) -> Matrix3<f64> {
    let t = centuries_since_j2000(tjm);

    let zeta = ((0.0000050 * t + 0.0000839) * t + 0.6406161) * t * RADEG;
    let z = ((0.0000051 * t + 0.0003041) * t + 0.6406161) * t * RADEG;
    let theta = ((-0.0000116 * t - 0.0001185) * t + 0.5567530) * t * RADEG;

    rotmt(z, 2) * rotmt(-theta, 1) * rotmt(zeta, 2)
}

/// Combined precession–nutation matrix, J2000 mean → true equator and equinox of date.
pub(crate) fn rotpn_j2000_to_true(tjm: MJD) -> Matrix3<f64> {
    rnut80(tjm) * prec(tjm)
}

/// Heliocentric velocity of the Earth, in AU/day, on the true equator of date.
///
/// Low-precision solar theory: the Earth moves perpendicular to the geocentric
/// direction of the Sun with speed κ·c, corrected by the eccentricity term along the
/// perihelion direction:
///
/// ```text
/// v_ecl = κ·c · ( sin ⊙ − e·sin ϖ, −cos ⊙ + e·cos ϖ, 0 )
/// ```
/// where ⊙ is the Sun's true longitude, `e` the orbital eccentricity and ϖ the
/// longitude of perihelion. The vector is then rotated from the ecliptic of date to
/// the true equator of date.
pub(crate) fn earth_velocity(tjm: MJD) -> Vector3<f64> {
    let t = centuries_since_j2000(tjm);
    let t2 = t * t;

    let mean_longitude = (280.46646 + 36000.76983 * t + 0.0003032 * t2) * RADEG;
    let mean_anomaly = (357.52911 + 35999.05029 * t - 0.0001537 * t2) * RADEG;
    let center = ((1.914602 - 0.004817 * t - 0.000014 * t2) * mean_anomaly.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000289 * (3.0 * mean_anomaly).sin())
        * RADEG;
    let sun_longitude = mean_longitude + center;

    let eccentricity = 0.016708634 - 0.000042037 * t - 0.0000001267 * t2;
    let perihelion = (102.93735 + 1.71946 * t + 0.00046 * t2) * RADEG;

    let speed = ABERRATION_CONSTANT * RADSEC * VLIGHT_AU;
    let v_ecl = Vector3::new(
        sun_longitude.sin() - eccentricity * perihelion.sin(),
        -sun_longitude.cos() + eccentricity * perihelion.cos(),
        0.0,
    ) * speed;

    let (_, deps) = nutn80(tjm);
    let true_obliquity = obleq(tjm) + deps * RADSEC;
    rotmt(true_obliquity, 0) * v_ecl
}

/// Apply stellar aberration correction to a relative position vector.
///
/// First-order (v ≪ c) light-time model:
/// ```text
/// x_corr = xrel − (‖xrel‖ / c) · vrel
/// ```
/// where `vrel` is the velocity of the target relative to the observer in AU/day and
/// `c` is [`VLIGHT_AU`]. For a fixed star seen from the Earth, `vrel` is minus the
/// Earth's velocity. The output is not normalised.
pub(crate) fn correct_aberration(xrel: Vector3<f64>, vrel: Vector3<f64>) -> Vector3<f64> {
    let norm_vector = xrel.norm();
    let dt = norm_vector / VLIGHT_AU;
    xrel - dt * vrel
}

/// Unit vector pointing at `(ra, dec)`, radians.
pub(crate) fn radec_to_cartesian(ra: Radian, dec: Radian) -> Vector3<f64> {
    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_ra, cos_ra) = ra.sin_cos();
    Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
}

/// Convert a Cartesian vector to right ascension, declination and norm.
///
/// Returns
/// --------
/// * `(α, δ, ρ)` with α in [0, 2π), δ in [−π/2, π/2]. A null vector gives
///   `(0, 0, 0)`; a vector along the pole gives α = 0.
pub(crate) fn cartesian_to_radec(cartesian_position: Vector3<f64>) -> (Radian, Radian, f64) {
    let pos_norm = cartesian_position.norm();
    if pos_norm == 0. {
        return (0.0, 0.0, pos_norm);
    }

    let delta = (cartesian_position.z / pos_norm).clamp(-1.0, 1.0).asin();

    let rho_xy = cartesian_position.x.hypot(cartesian_position.y);
    if rho_xy == 0.0 {
        return (0.0, delta, pos_norm);
    }

    let alpha = cartesian_position.y.atan2(cartesian_position.x);
    let alpha = if alpha < 0.0 { alpha + DPI } else { alpha };
    (alpha, delta, pos_norm)
}

/// Galactic longitude/latitude (radians) → J2000 equatorial RA/Dec (radians).
pub(crate) fn galactic_to_equatorial(l: Radian, b: Radian) -> (Radian, Radian) {
    // Mᵀ: column j holds the Galactic axis j
    let to_equatorial = Matrix3::from_fn(|i, j| GALACTIC_AXES_J2000[j][i]);
    let equatorial = to_equatorial * radec_to_cartesian(l, b);
    let (ra, dec, _) = cartesian_to_radec(equatorial);
    (ra, dec)
}

/// Apparent geocentric place of a J2000 mean position at a single epoch.
///
/// Chain: unit vector on the J2000 mean equator → precession and nutation to the true
/// equator of date → annual aberration from the Earth's velocity.
///
/// Arguments
/// ---------
/// * `ra`, `dec`: J2000 mean position, radians.
/// * `tjm`: epoch, MJD (TT).
///
/// Returns
/// --------
/// * Apparent `(α, δ)` on the true equator and equinox of date, radians.
pub(crate) fn apparent_place(ra: Radian, dec: Radian, tjm: MJD) -> (Radian, Radian) {
    let mean_j2000 = radec_to_cartesian(ra, dec);
    let true_of_date = rotpn_j2000_to_true(tjm) * mean_j2000;

    let apparent = correct_aberration(true_of_date, -earth_velocity(tjm));
    let (alpha, delta, _) = cartesian_to_radec(apparent);
    (alpha, delta)
}
