//! # Tracking systems and output frame labels
//!
//! The `TRACKSYS` header value tells how the base pointing coordinates are to be read.
//! Four systems are known; anything else is kept verbatim as
//! [`TrackingSystem::Unrecognised`] so the caller can decide what to do with it
//! (see [`UnknownTrackingPolicy`](crate::config::UnknownTrackingPolicy)).
//!
//! | `TRACKSYS` | Base coordinates                         | Region frame |
//! |------------|------------------------------------------|--------------|
//! | `J2000`    | mean RA/Dec, FK5 J2000                   | `FK5`        |
//! | `B1950`    | mean RA/Dec, FK4 B1950                   | `FK4`        |
//! | `APP`      | RA/Dec turned into apparent place of date | `GAPPT` + epoch |
//! | `GAL`      | Galactic longitude/latitude              | `GALACTIC`   |
use std::fmt;
use std::str::FromStr;

/// Tracking coordinate system read from `TRACKSYS`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackingSystem {
    J2000,
    B1950,
    /// Apparent geocentric, date dependent
    App,
    /// Galactic
    Gal,
    /// Label outside the known set, stored upper-cased
    Unrecognised(String),
}

impl TrackingSystem {
    /// Parse a `TRACKSYS` label, case-insensitively.
    pub fn parse(label: &str) -> Self {
        let upper = label.trim().to_uppercase();
        match upper.as_str() {
            "J2000" => TrackingSystem::J2000,
            "B1950" => TrackingSystem::B1950,
            "APP" => TrackingSystem::App,
            "GAL" => TrackingSystem::Gal,
            _ => TrackingSystem::Unrecognised(upper),
        }
    }

    /// Celestial reference system used to build the output region.
    ///
    /// `None` for an unrecognised label.
    pub fn frame_system(&self) -> Option<&'static str> {
        match self {
            TrackingSystem::J2000 => Some("FK5"),
            TrackingSystem::B1950 => Some("FK4"),
            TrackingSystem::App => Some("GAPPT"),
            TrackingSystem::Gal => Some("GALACTIC"),
            TrackingSystem::Unrecognised(_) => None,
        }
    }

    /// Only the apparent system needs an observation epoch.
    pub fn is_time_dependent(&self) -> bool {
        matches!(self, TrackingSystem::App)
    }
}

impl FromStr for TrackingSystem {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TrackingSystem::parse(s))
    }
}

impl fmt::Display for TrackingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingSystem::J2000 => write!(f, "J2000"),
            TrackingSystem::B1950 => write!(f, "B1950"),
            TrackingSystem::App => write!(f, "APP"),
            TrackingSystem::Gal => write!(f, "GAL"),
            TrackingSystem::Unrecognised(s) => write!(f, "{s}"),
        }
    }
}

/// Frame descriptor handed to a [`RegionBuilder`](crate::region::RegionBuilder).
///
/// `epoch` is the observation timestamp as written in `DATE-OBS` and is only set for
/// time-dependent systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLabel {
    pub system: String,
    pub epoch: Option<String>,
}

impl FrameLabel {
    pub fn new(system: &str) -> Self {
        FrameLabel {
            system: system.to_string(),
            epoch: None,
        }
    }

    pub fn with_epoch(system: &str, epoch: &str) -> Self {
        FrameLabel {
            system: system.to_string(),
            epoch: Some(epoch.to_string()),
        }
    }
}

impl fmt::Display for FrameLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.epoch {
            Some(epoch) => write!(f, "System={}, Epoch={}", self.system, epoch),
            None => write!(f, "System={}", self.system),
        }
    }
}
