//! # Map footprint on the sky
//!
//! This module turns the map description carried by an observation header into the
//! four sky positions bounding the observed area.
//!
//! ## Pipeline
//!
//! 1. [`MapGeometry::from_header`] reads and validates the seven mandatory fields,
//!    `TRACKSYS` (defaulting to J2000 with a warning) and, for apparent tracking,
//!    `DATE-OBS`.
//! 2. The base pointing is resolved to radians by a
//!    [`CoordinateConverter`](crate::coord_conversion::CoordinateConverter), in the
//!    frame matching the tracking system.
//! 3. The rectangle corners `(±w/2, ±h/2)` and the map centre offset are each rotated
//!    by `−MAP_PA` (header angles are east of north; the planar rotation is
//!    counter-clockwise from the x axis).
//! 4. Every corner, shifted by the rotated centre offset, is deprojected from the
//!    tangent plane at the base position.
//!
//! Corners always come out in the order `(+w/2, +h/2)`, `(+w/2, −h/2)`,
//! `(−w/2, −h/2)`, `(−w/2, +h/2)`, which walks the rectangle without crossing itself.
//!
//! ## Example
//!
//! ```rust
//! use footprint::footprint::FootprintCalculator;
//! use footprint::config::FootprintConfig;
//! use footprint::header::ObservationHeader;
//!
//! let header = ObservationHeader::new()
//!     .with("BASEC1", 83.63)
//!     .with("BASEC2", 22.01)
//!     .with("MAP_X", 0.0)
//!     .with("MAP_Y", 0.0)
//!     .with("MAP_PA", 0.0)
//!     .with("MAP_HGHT", 60.0)
//!     .with("MAP_WDTH", 60.0)
//!     .with("TRACKSYS", "J2000");
//!
//! let calculator = FootprintCalculator::new(FootprintConfig::default());
//! let result = calculator.compute(&header).unwrap();
//!
//! assert_eq!(result.equivalent_radius, 30.0);
//! assert_eq!(result.frame.system, "FK5");
//! ```
use hifitime::Epoch;
use log::{debug, warn};
use nalgebra::Vector3;

use crate::{
    config::{FootprintConfig, UnknownTrackingPolicy},
    constants::{
        ArcSec, Degree, Radian, KEY_BASEC1, KEY_BASEC2, KEY_DATE_OBS, KEY_MAP_HGHT, KEY_MAP_PA,
        KEY_MAP_WDTH, KEY_MAP_X, KEY_MAP_Y, KEY_TRACKSYS, RADEG, RADSEC,
    },
    coord_conversion::{Astrometry, CoordinateConverter, EquatorialFrame},
    footprint_errors::FootprintError,
    header::{get_header_value, HeaderSource},
    ref_system::{cartesian_to_radec, radec_to_cartesian},
    region::RegionBuilder,
    tangent_plane::{polygon_area, rotate_offset, sky_to_tangent_plane, tangent_plane_to_sky},
    time::parse_date_obs,
    tracking::{FrameLabel, TrackingSystem},
};

/// Signs of the unrotated corner offsets, in output order.
const CORNER_SIGNS: [(f64, f64); 4] = [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)];

/// A position on the celestial sphere, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPosition {
    pub ra: Radian,
    pub dec: Radian,
}

impl SkyPosition {
    pub fn new(ra: Radian, dec: Radian) -> Self {
        SkyPosition { ra, dec }
    }
}

/// Map description read from an observation header.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGeometry {
    /// First base coordinate (RA or Galactic longitude), degrees
    pub base_c1: Degree,
    /// Second base coordinate (Dec or Galactic latitude), degrees
    pub base_c2: Degree,
    /// Map centre offset in the rotated frame, arcseconds
    pub map_x: ArcSec,
    pub map_y: ArcSec,
    /// Position angle, degrees east of north
    pub map_pa: Degree,
    pub map_height: ArcSec,
    pub map_width: ArcSec,
    pub tracking: TrackingSystem,
    /// `DATE-OBS` as written in the header
    pub date_obs: Option<String>,
}

impl MapGeometry {
    /// Read and validate the map description.
    ///
    /// Every field goes through [`get_header_value`], so values held only by a subheader
    /// are found.
    ///
    /// Arguments
    /// -----------------
    /// * `header`: any [`HeaderSource`].
    ///
    /// Return
    /// ----------
    /// * The geometry, or
    ///   - [`FootprintError::MissingField`] naming the first absent mandatory field,
    ///   - [`FootprintError::InvalidFieldValue`] if a mandatory field is not a finite number,
    ///   - [`FootprintError::MissingEpoch`] if `TRACKSYS` is APP and `DATE-OBS` is absent.
    ///
    /// A missing `TRACKSYS` is not an error: J2000 is assumed and a warning is logged.
    pub fn from_header<H: HeaderSource>(header: &H) -> Result<Self, FootprintError> {
        let base_c1 = required_f64(header, KEY_BASEC1)?;
        let base_c2 = required_f64(header, KEY_BASEC2)?;
        let map_x = required_f64(header, KEY_MAP_X)?;
        let map_y = required_f64(header, KEY_MAP_Y)?;
        let map_pa = required_f64(header, KEY_MAP_PA)?;
        let map_height = required_f64(header, KEY_MAP_HGHT)?;
        let map_width = required_f64(header, KEY_MAP_WDTH)?;

        let tracking = match get_header_value(header, KEY_TRACKSYS).and_then(|v| v.as_text()) {
            Some(label) => TrackingSystem::parse(&label),
            None => {
                warn!("{KEY_TRACKSYS} is not defined in the header, assuming J2000");
                TrackingSystem::J2000
            }
        };

        let date_obs = get_header_value(header, KEY_DATE_OBS).and_then(|v| v.as_text());
        if tracking.is_time_dependent() && date_obs.is_none() {
            return Err(FootprintError::MissingEpoch);
        }

        Ok(MapGeometry {
            base_c1,
            base_c2,
            map_x,
            map_y,
            map_pa,
            map_height,
            map_width,
            tracking,
            date_obs,
        })
    }

    /// `sqrt(width × height) / 2`, arcseconds.
    pub fn equivalent_radius(&self) -> ArcSec {
        (self.map_width * self.map_height).sqrt() / 2.0
    }

    /// Planar rotation angle: the position angle negated, in radians.
    pub fn rotation(&self) -> Radian {
        -self.map_pa * RADEG
    }
}

/// Read a mandatory numeric field.
fn required_f64<H: HeaderSource>(header: &H, key: &str) -> Result<f64, FootprintError> {
    let value = get_header_value(header, key)
        .ok_or_else(|| FootprintError::MissingField(key.to_string()))?;

    value
        .as_f64()
        .filter(|x| x.is_finite())
        .ok_or_else(|| FootprintError::InvalidFieldValue {
            field: key.to_string(),
            value: value.to_string(),
        })
}

/// Rotated corner offsets of a `width × height` rectangle centred on the origin.
///
/// Arguments
/// -----------------
/// * `width`, `height`: rectangle size (any planar unit).
/// * `rot`: counter-clockwise rotation, radians.
///
/// Return
/// ----------
/// * The four corners in the fixed output order, same unit as the input.
pub fn corner_offsets(width: f64, height: f64, rot: Radian) -> [(f64, f64); 4] {
    CORNER_SIGNS.map(|(sx, sy)| rotate_offset(sx * width / 2.0, sy * height / 2.0, rot))
}

/// Outcome of one footprint computation.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintResult {
    /// Resolved base position, radians, in the frame matching the tracking system
    pub base_ra: Radian,
    pub base_dec: Radian,
    /// Map corners, in the fixed corner order
    pub corners: [SkyPosition; 4],
    /// Radius of the circle with the same area scale, arcseconds
    pub equivalent_radius: ArcSec,
    /// Frame to build the output region in
    pub frame: FrameLabel,
}

impl FootprintResult {
    pub fn corner_ra(&self) -> [Radian; 4] {
        self.corners.map(|c| c.ra)
    }

    pub fn corner_dec(&self) -> [Radian; 4] {
        self.corners.map(|c| c.dec)
    }

    /// Mean direction of the four corners.
    pub fn centroid(&self) -> SkyPosition {
        let sum: Vector3<f64> = self
            .corners
            .iter()
            .map(|c| radec_to_cartesian(c.ra, c.dec))
            .sum();
        let (ra, dec, _) = cartesian_to_radec(sum);
        SkyPosition::new(ra, dec)
    }

    /// Corners projected back onto the plane tangent at the base position, arcseconds.
    ///
    /// `None` if a corner lies 90° or more from the base.
    pub fn tangent_plane_offsets(&self) -> Option<[(ArcSec, ArcSec); 4]> {
        let mut offsets = [(0.0, 0.0); 4];
        for (offset, corner) in offsets.iter_mut().zip(&self.corners) {
            let (xi, eta) = sky_to_tangent_plane(corner.ra, corner.dec, self.base_ra, self.base_dec)?;
            *offset = (xi / RADSEC, eta / RADSEC);
        }
        Some(offsets)
    }

    /// Area enclosed by the corners on the tangent plane, square arcseconds.
    pub fn tangent_plane_area(&self) -> Option<f64> {
        self.tangent_plane_offsets()
            .map(|offsets| polygon_area(&offsets))
    }
}

/// Entry point of the crate: computes map footprints from observation headers.
///
/// The calculator holds only its configuration and its coordinate converter; it can be
/// shared between threads and reused for any number of headers.
#[derive(Debug, Clone)]
pub struct FootprintCalculator<C = Astrometry> {
    config: FootprintConfig,
    converter: C,
}

impl FootprintCalculator<Astrometry> {
    /// Calculator backed by the built-in [`Astrometry`] converter.
    pub fn new(config: FootprintConfig) -> Self {
        Self::with_converter(config, Astrometry)
    }
}

impl Default for FootprintCalculator<Astrometry> {
    fn default() -> Self {
        Self::new(FootprintConfig::default())
    }
}

impl<C: CoordinateConverter> FootprintCalculator<C> {
    /// Calculator using a caller-supplied coordinate converter.
    pub fn with_converter(config: FootprintConfig, converter: C) -> Self {
        FootprintCalculator { config, converter }
    }

    pub fn config(&self) -> &FootprintConfig {
        &self.config
    }

    /// Compute the map footprint described by `header`.
    ///
    /// Arguments
    /// -----------------
    /// * `header`: observation metadata, read through [`get_header_value`].
    ///
    /// Return
    /// ----------
    /// * The [`FootprintResult`], or the first validation / conversion error.
    ///
    /// See also
    /// ------------
    /// * [`MapGeometry::from_header`] – Field validation rules.
    /// * [`compute_geometry`](FootprintCalculator::compute_geometry) – Same computation from an already-built geometry.
    pub fn compute<H: HeaderSource>(&self, header: &H) -> Result<FootprintResult, FootprintError> {
        let geometry = MapGeometry::from_header(header)?;
        self.compute_geometry(&geometry)
    }

    /// Compute the footprint of an explicit [`MapGeometry`].
    pub fn compute_geometry(
        &self,
        geometry: &MapGeometry,
    ) -> Result<FootprintResult, FootprintError> {
        let tracking = self.effective_tracking(&geometry.tracking)?;
        let (base_ra, base_dec) = self.resolve_base(geometry, &tracking)?;

        let rot = geometry.rotation();
        let (rx, ry) = rotate_offset(geometry.map_x, geometry.map_y, rot);

        let corners = corner_offsets(geometry.map_width, geometry.map_height, rot).map(|(x, y)| {
            let (ra, dec) =
                tangent_plane_to_sky((x + rx) * RADSEC, (y + ry) * RADSEC, base_ra, base_dec);
            SkyPosition::new(ra, dec)
        });

        let frame = frame_label(&tracking, geometry.date_obs.as_deref());

        if self.config.verbose {
            debug!(
                "tracking {tracking}: base ({:.8}°, {:.8}°), rotation {rot:.6} rad, centre offset ({rx:.3}″, {ry:.3}″)",
                base_ra / RADEG,
                base_dec / RADEG
            );
            for (i, corner) in corners.iter().enumerate() {
                debug!(
                    "corner {i}: ({:.8}°, {:.8}°)",
                    corner.ra / RADEG,
                    corner.dec / RADEG
                );
            }
        }

        Ok(FootprintResult {
            base_ra,
            base_dec,
            corners,
            equivalent_radius: geometry.equivalent_radius(),
            frame,
        })
    }

    /// Circular summary of the footprint: `(base_ra, base_dec, equivalent_radius)`.
    ///
    /// Positions in radians, radius in arcseconds.
    pub fn radius<H: HeaderSource>(
        &self,
        header: &H,
    ) -> Result<(Radian, Radian, ArcSec), FootprintError> {
        let result = self.compute(header)?;
        Ok((result.base_ra, result.base_dec, result.equivalent_radius))
    }

    /// Build the footprint region with `builder`.
    ///
    /// Return
    /// ----------
    /// * `Ok(None)` when no header is supplied, otherwise the builder's polygon over the
    ///   four corners in the footprint frame.
    pub fn region<H: HeaderSource, B: RegionBuilder>(
        &self,
        header: Option<&H>,
        builder: &B,
    ) -> Result<Option<B::Region>, FootprintError> {
        let Some(header) = header else {
            return Ok(None);
        };

        let result = self.compute(header)?;
        builder
            .polygon(&result.frame, &result.corner_ra(), &result.corner_dec())
            .map(Some)
    }

    /// Apply the unknown-tracking policy.
    fn effective_tracking(
        &self,
        tracking: &TrackingSystem,
    ) -> Result<TrackingSystem, FootprintError> {
        match tracking {
            TrackingSystem::Unrecognised(label) => match self.config.unknown_tracking {
                UnknownTrackingPolicy::Reject => {
                    Err(FootprintError::UnknownTrackingSystem(label.clone()))
                }
                UnknownTrackingPolicy::AssumeJ2000 => {
                    warn!("Unrecognised {KEY_TRACKSYS} '{label}', reading base coordinates as J2000");
                    Ok(TrackingSystem::J2000)
                }
            },
            known => Ok(known.clone()),
        }
    }

    fn resolve_base(
        &self,
        geometry: &MapGeometry,
        tracking: &TrackingSystem,
    ) -> Result<(Radian, Radian), FootprintError> {
        let (c1, c2) = (geometry.base_c1, geometry.base_c2);
        match tracking {
            TrackingSystem::Gal => self.converter.resolve_galactic(c1, c2),
            TrackingSystem::App => {
                let epoch = observation_epoch(geometry.date_obs.as_deref())?;
                self.converter.resolve_apparent(c1, c2, &epoch)
            }
            TrackingSystem::B1950 => {
                self.converter
                    .resolve_equatorial(c1, c2, EquatorialFrame::Fk4B1950)
            }
            TrackingSystem::J2000 | TrackingSystem::Unrecognised(_) => {
                self.converter
                    .resolve_equatorial(c1, c2, EquatorialFrame::Fk5J2000)
            }
        }
    }
}

fn observation_epoch(date_obs: Option<&str>) -> Result<Epoch, FootprintError> {
    let date_obs = date_obs.ok_or(FootprintError::MissingEpoch)?;
    parse_date_obs(date_obs)
}

/// Frame descriptor for a resolved tracking system; the epoch is attached for APP only.
fn frame_label(tracking: &TrackingSystem, date_obs: Option<&str>) -> FrameLabel {
    let system = tracking.frame_system().unwrap_or("FK5");
    match (tracking.is_time_dependent(), date_obs) {
        (true, Some(epoch)) => FrameLabel::with_epoch(system, epoch),
        _ => FrameLabel::new(system),
    }
}

/// Compute a footprint with the default configuration and converter.
pub fn compute_footprint<H: HeaderSource>(header: &H) -> Result<FootprintResult, FootprintError> {
    FootprintCalculator::default().compute(header)
}

#[cfg(test)]
mod footprint_test {
    use super::*;
    use approx::assert_relative_eq;

    use crate::header::{HeaderValue, ObservationHeader};

    fn geometry(tracking: TrackingSystem) -> MapGeometry {
        MapGeometry {
            base_c1: 10.0,
            base_c2: -45.0,
            map_x: 0.0,
            map_y: 0.0,
            map_pa: 0.0,
            map_height: 200.0,
            map_width: 50.0,
            tracking,
            date_obs: None,
        }
    }

    fn full_header() -> ObservationHeader {
        ObservationHeader::new()
            .with("BASEC1", 10.0)
            .with("BASEC2", -45.0)
            .with("MAP_X", 0)
            .with("MAP_Y", 0)
            .with("MAP_PA", 0)
            .with("MAP_HGHT", 200)
            .with("MAP_WDTH", 50)
            .with("TRACKSYS", "J2000")
    }

    #[test]
    fn test_corner_offsets_unrotated() {
        let corners = corner_offsets(60.0, 40.0, 0.0);
        assert_eq!(
            corners,
            [(30.0, 20.0), (30.0, -20.0), (-30.0, -20.0), (-30.0, 20.0)]
        );
    }

    #[test]
    fn test_corner_offsets_position_angle_90() {
        // MAP_PA = 90 east of north → clockwise quarter turn in the plane
        let g = MapGeometry {
            map_pa: 90.0,
            ..geometry(TrackingSystem::J2000)
        };
        let corners = corner_offsets(60.0, 40.0, g.rotation());
        assert_relative_eq!(corners[0].0, 20.0, epsilon = 1e-12);
        assert_relative_eq!(corners[0].1, -30.0, epsilon = 1e-12);
        assert_relative_eq!(corners[2].0, -20.0, epsilon = 1e-12);
        assert_relative_eq!(corners[2].1, 30.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_header_reads_all_fields() {
        let g = MapGeometry::from_header(&full_header()).unwrap();
        assert_eq!(g, geometry(TrackingSystem::J2000));
    }

    #[test]
    fn test_from_header_invalid_value() {
        let header = full_header().with("MAP_PA", "sideways");
        assert_eq!(
            MapGeometry::from_header(&header),
            Err(FootprintError::InvalidFieldValue {
                field: "MAP_PA".into(),
                value: "sideways".into()
            })
        );

        let header = full_header().with("MAP_WDTH", true);
        assert_eq!(
            MapGeometry::from_header(&header).unwrap_err(),
            FootprintError::InvalidFieldValue {
                field: "MAP_WDTH".into(),
                value: "true".into()
            }
        );
    }

    #[test]
    fn test_from_header_null_is_missing() {
        let header = full_header().with("MAP_X", HeaderValue::Null);
        assert_eq!(
            MapGeometry::from_header(&header),
            Err(FootprintError::MissingField("MAP_X".into()))
        );
    }

    #[test]
    fn test_equivalent_radius() {
        assert_eq!(geometry(TrackingSystem::Gal).equivalent_radius(), 50.0);
    }

    #[test]
    fn test_compute_geometry_centre_offset() {
        let g = MapGeometry {
            map_x: 0.0,
            map_y: 100.0,
            ..geometry(TrackingSystem::J2000)
        };
        let result = FootprintCalculator::default().compute_geometry(&g).unwrap();
        let offsets = result.tangent_plane_offsets().unwrap();
        assert_relative_eq!(offsets[0].0, 25.0, epsilon = 1e-6);
        assert_relative_eq!(offsets[0].1, 200.0, epsilon = 1e-6);
        assert_relative_eq!(offsets[2].0, -25.0, epsilon = 1e-6);
        assert_relative_eq!(offsets[2].1, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_unknown_tracking_assume_j2000() {
        let g = geometry(TrackingSystem::Unrecognised("AZEL".into()));
        let lenient = FootprintCalculator::default().compute_geometry(&g).unwrap();
        let j2000 = FootprintCalculator::default()
            .compute_geometry(&geometry(TrackingSystem::J2000))
            .unwrap();
        assert_eq!(lenient, j2000);
    }

    #[test]
    fn test_unknown_tracking_reject() {
        let calculator = FootprintCalculator::new(
            FootprintConfig::default().with_unknown_tracking(UnknownTrackingPolicy::Reject),
        );
        let g = geometry(TrackingSystem::Unrecognised("AZEL".into()));
        assert_eq!(
            calculator.compute_geometry(&g),
            Err(FootprintError::UnknownTrackingSystem("AZEL".into()))
        );
    }

    #[test]
    fn test_app_geometry_without_date() {
        let g = geometry(TrackingSystem::App);
        assert_eq!(
            FootprintCalculator::default().compute_geometry(&g),
            Err(FootprintError::MissingEpoch)
        );
    }

    #[test]
    fn test_app_geometry_bad_date() {
        let g = MapGeometry {
            date_obs: Some("not a date".into()),
            ..geometry(TrackingSystem::App)
        };
        assert_eq!(
            FootprintCalculator::default().compute_geometry(&g),
            Err(FootprintError::InvalidDateObs(String::new()))
        );
    }

    #[test]
    fn test_frame_label() {
        assert_eq!(
            frame_label(&TrackingSystem::App, Some("2019-03-14T09:23:45")),
            FrameLabel::with_epoch("GAPPT", "2019-03-14T09:23:45")
        );
        assert_eq!(
            frame_label(&TrackingSystem::B1950, Some("2019-03-14T09:23:45")),
            FrameLabel::new("FK4")
        );
        assert_eq!(frame_label(&TrackingSystem::Gal, None), FrameLabel::new("GALACTIC"));
    }

    #[test]
    fn test_centroid_of_symmetric_map() {
        let result = FootprintCalculator::default()
            .compute_geometry(&geometry(TrackingSystem::J2000))
            .unwrap();
        let centre = result.centroid();
        assert_relative_eq!(centre.ra, result.base_ra, epsilon = 1e-12);
        assert_relative_eq!(centre.dec, result.base_dec, epsilon = 1e-12);
    }
}
