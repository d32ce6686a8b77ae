//! # Constants and type definitions
//!
//! Unit conversion factors, reference epochs and the angle type aliases shared by
//! every module of the crate.
//!
//! ## Overview
//!
//! - Angle conversions (degrees, arcseconds ↔ radians)
//! - Reference epochs in Modified Julian Date
//! - Speed of light, for the annual aberration correction
//! - Header keys read by the footprint calculator

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

/// Constant of annual aberration κ, in arcseconds
pub const ABERRATION_CONSTANT: ArcSec = 20.49552;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Modified Julian Date (days)
pub type MJD = f64;

// -------------------------------------------------------------------------------------------------
// Observation header keys
// -------------------------------------------------------------------------------------------------

/// First base pointing coordinate (RA or Galactic longitude), degrees
pub const KEY_BASEC1: &str = "BASEC1";
/// Second base pointing coordinate (Dec or Galactic latitude), degrees
pub const KEY_BASEC2: &str = "BASEC2";
/// Map centre offset along the rotated x axis, arcseconds
pub const KEY_MAP_X: &str = "MAP_X";
/// Map centre offset along the rotated y axis, arcseconds
pub const KEY_MAP_Y: &str = "MAP_Y";
/// Map position angle, degrees east of north
pub const KEY_MAP_PA: &str = "MAP_PA";
/// Map height, arcseconds
pub const KEY_MAP_HGHT: &str = "MAP_HGHT";
/// Map width, arcseconds
pub const KEY_MAP_WDTH: &str = "MAP_WDTH";
/// Tracking coordinate system
pub const KEY_TRACKSYS: &str = "TRACKSYS";
/// Observation start timestamp
pub const KEY_DATE_OBS: &str = "DATE-OBS";