//! Sky footprint of rectangular telescope maps.
//!
//! Reads the map description of an observation header (base pointing, offset, position
//! angle, size, tracking system) and returns the four corners of the mapped area on the
//! celestial sphere, together with the frame they are expressed in. See
//! [`footprint::FootprintCalculator`] for the entry point.
pub mod config;
pub mod constants;
pub mod coord_conversion;
pub mod footprint;
pub mod footprint_errors;
pub mod header;
mod ref_system;
pub mod region;
pub mod tangent_plane;
pub mod time;
pub mod tracking;
