//! # Coordinate conversion collaborator
//!
//! The footprint calculator needs the base pointing in radians, in the frame that
//! matches the tracking system. How that position is obtained is delegated to a
//! [`CoordinateConverter`]; [`Astrometry`] is the default implementation built on the
//! kernels of [`ref_system`](crate::ref_system).
//!
//! Every method takes degrees and returns `(ra, dec)` in radians.
use hifitime::Epoch;

use crate::{
    constants::{Degree, Radian, RADEG},
    footprint_errors::FootprintError,
    ref_system::{apparent_place, galactic_to_equatorial},
    time::epoch_to_mjd_tt,
};

/// Mean equatorial frames the base position can be expressed in without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquatorialFrame {
    /// FK5, mean equator and equinox J2000
    Fk5J2000,
    /// FK4, mean equator and equinox B1950
    Fk4B1950,
}

/// Resolves a base pointing into equatorial radians.
///
/// Implementors must be free of shared mutable state: one converter may serve
/// concurrent footprint computations.
pub trait CoordinateConverter {
    /// Mean RA/Dec in `frame`, returned in that same frame.
    fn resolve_equatorial(
        &self,
        ra: Degree,
        dec: Degree,
        frame: EquatorialFrame,
    ) -> Result<(Radian, Radian), FootprintError>;

    /// Galactic longitude/latitude converted to J2000 equatorial RA/Dec.
    fn resolve_galactic(&self, l: Degree, b: Degree) -> Result<(Radian, Radian), FootprintError>;

    /// J2000 mean RA/Dec converted to apparent geocentric place at `epoch`.
    fn resolve_apparent(
        &self,
        ra: Degree,
        dec: Degree,
        epoch: &Epoch,
    ) -> Result<(Radian, Radian), FootprintError>;
}

/// Default converter.
///
/// * FK5 and FK4 positions are converted to radians as they are: no precession
///   between B1950 and J2000 is applied.
/// * Galactic positions use the IAU Galactic rotation matrix.
/// * Apparent places are computed at a single epoch with IAU 1976 precession,
///   IAU 1980 nutation and annual aberration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Astrometry;

impl CoordinateConverter for Astrometry {
    fn resolve_equatorial(
        &self,
        ra: Degree,
        dec: Degree,
        _frame: EquatorialFrame,
    ) -> Result<(Radian, Radian), FootprintError> {
        Ok((ra * RADEG, dec * RADEG))
    }

    fn resolve_galactic(&self, l: Degree, b: Degree) -> Result<(Radian, Radian), FootprintError> {
        Ok(galactic_to_equatorial(l * RADEG, b * RADEG))
    }

    fn resolve_apparent(
        &self,
        ra: Degree,
        dec: Degree,
        epoch: &Epoch,
    ) -> Result<(Radian, Radian), FootprintError> {
        Ok(apparent_place(
            ra * RADEG,
            dec * RADEG,
            epoch_to_mjd_tt(epoch),
        ))
    }
}

#[cfg(test)]
mod coord_conversion_test {
    use super::*;
    use approx::assert_relative_eq;

    use crate::time::parse_date_obs;

    #[test]
    fn test_equatorial_is_direct() {
        let (ra, dec) = Astrometry
            .resolve_equatorial(83.63, 22.01, EquatorialFrame::Fk5J2000)
            .unwrap();
        assert_relative_eq!(ra, 83.63 * RADEG);
        assert_relative_eq!(dec, 22.01 * RADEG);

        let b1950 = Astrometry
            .resolve_equatorial(83.63, 22.01, EquatorialFrame::Fk4B1950)
            .unwrap();
        assert_eq!(b1950, (ra, dec));
    }

    #[test]
    fn test_galactic_crab() {
        let (ra, dec) = Astrometry.resolve_galactic(184.5575, -5.7843).unwrap();
        assert_relative_eq!(ra / RADEG, 83.633165, epsilon = 1e-5);
        assert_relative_eq!(dec / RADEG, 22.014491, epsilon = 1e-5);
    }

    #[test]
    fn test_apparent_meeus() {
        // JDE 2462088.69 = 2028-11-13T04:33:36 TT = 04:32:26.816 UTC
        let epoch = parse_date_obs("2028-11-13T04:32:26.816").unwrap();
        let (ra, dec) = Astrometry
            .resolve_apparent(41.054058, 49.227750, &epoch)
            .unwrap();
        assert!(((ra / RADEG - 41.5599583) * 3600.0 * dec.cos()).abs() < 0.05);
        assert!(((dec / RADEG - 49.3520694) * 3600.0).abs() < 0.05);
    }

    #[test]
    fn test_apparent_differs_from_mean() {
        let epoch = parse_date_obs("2019-03-14T09:23:45").unwrap();
        let (ra, dec) = Astrometry.resolve_apparent(83.63, 22.01, &epoch).unwrap();
        // ~19 years of precession is of order 0.27° in RA
        let shift = (ra / RADEG - 83.63).abs() + (dec / RADEG - 22.01).abs();
        assert!(shift > 0.1 && shift < 0.5);
    }
}
