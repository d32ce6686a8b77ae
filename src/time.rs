use hifitime::Epoch;
use std::str::FromStr;

use crate::{constants::MJD, footprint_errors::FootprintError};

/// Parse a `DATE-OBS` header timestamp.
///
/// Argument
/// --------
/// * `date_obs`: ISO 8601 timestamp, e.g. `2019-03-14T09:23:45` or
///   `2019-03-14T09:23:45.120 TAI`. A trailing `Z` is accepted and, as for a timestamp
///   without explicit time scale, the value is read as UTC.
///
/// Return
/// ------
/// * The corresponding [`Epoch`], or [`FootprintError::InvalidDateObs`]
pub fn parse_date_obs(date_obs: &str) -> Result<Epoch, FootprintError> {
    let trimmed = date_obs.trim();
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);

    Epoch::from_str(trimmed)
        .map_err(|e| FootprintError::InvalidDateObs(format!("{date_obs}: {e}")))
}

/// Modified Julian Date of an epoch in the TT time scale.
///
/// Precession and nutation are polynomial in TT; this is the time argument fed to
/// [`ref_system`](crate::ref_system) kernels.
pub fn epoch_to_mjd_tt(epoch: &Epoch) -> MJD {
    epoch.to_mjd_tt_days()
}
