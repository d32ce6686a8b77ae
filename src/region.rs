//! # Sky regions
//!
//! The calculator does not own a region representation. It hands the frame label and
//! the corner coordinates to a [`RegionBuilder`], which turns them into whatever
//! polygon type the caller works with.
//!
//! [`SkyPolygonBuilder`] is the built-in builder: it validates its input and returns a
//! plain [`SkyPolygon`].
use crate::{constants::Radian, footprint::SkyPosition, footprint_errors::FootprintError, tracking::FrameLabel};

/// Capability to build a polygonal region from vertex coordinates.
pub trait RegionBuilder {
    type Region;

    /// Build a polygon in `frame` from parallel vertex slices (radians, in order).
    fn polygon(
        &self,
        frame: &FrameLabel,
        ra: &[Radian],
        dec: &[Radian],
    ) -> Result<Self::Region, FootprintError>;
}

/// Closed polygon on the sky, vertices in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyPolygon {
    pub frame: FrameLabel,
    pub vertices: Vec<SkyPosition>,
}

impl SkyPolygon {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SkyPolygonBuilder;

impl RegionBuilder for SkyPolygonBuilder {
    type Region = SkyPolygon;

    fn polygon(
        &self,
        frame: &FrameLabel,
        ra: &[Radian],
        dec: &[Radian],
    ) -> Result<SkyPolygon, FootprintError> {
        if ra.len() != dec.len() {
            return Err(FootprintError::InvalidPolygon(format!(
                "{} RA values for {} Dec values",
                ra.len(),
                dec.len()
            )));
        }
        if ra.len() < 3 {
            return Err(FootprintError::InvalidPolygon(format!(
                "a polygon needs at least 3 vertices, got {}",
                ra.len()
            )));
        }
        if let Some(i) = ra
            .iter()
            .zip(dec)
            .position(|(a, d)| !a.is_finite() || !d.is_finite())
        {
            return Err(FootprintError::InvalidPolygon(format!(
                "vertex {i} is not finite"
            )));
        }

        Ok(SkyPolygon {
            frame: frame.clone(),
            vertices: ra
                .iter()
                .zip(dec)
                .map(|(&ra, &dec)| SkyPosition::new(ra, dec))
                .collect(),
        })
    }
}
