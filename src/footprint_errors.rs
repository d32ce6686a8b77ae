use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FootprintError {
    #[error("Missing required header field: {0}")]
    MissingField(String),

    #[error("TRACKSYS is APP but no DATE-OBS is available to fix the apparent epoch")]
    MissingEpoch,

    #[error("Unknown tracking system: {0}")]
    UnknownTrackingSystem(String),

    #[error("Invalid value for header field {field}: {value}")]
    InvalidFieldValue { field: String, value: String },

    #[error("Unable to parse DATE-OBS: {0}")]
    InvalidDateObs(String),

    #[error("Invalid header JSON: {0}")]
    InvalidHeaderJson(String),

    #[error("Invalid configuration JSON: {0}")]
    InvalidConfigJson(String),

    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),
}

impl PartialEq for FootprintError {
    fn eq(&self, other: &Self) -> bool {
        use FootprintError::*;
        match (self, other) {
            (MissingField(a), MissingField(b)) => a == b,
            (UnknownTrackingSystem(a), UnknownTrackingSystem(b)) => a == b,
            (
                InvalidFieldValue {
                    field: fa,
                    value: va,
                },
                InvalidFieldValue {
                    field: fb,
                    value: vb,
                },
            ) => fa == fb && va == vb,
            (InvalidPolygon(a), InvalidPolygon(b)) => a == b,

            // Parser messages come from upstream crates: equal if same variant
            (InvalidDateObs(_), InvalidDateObs(_)) => true,
            (InvalidHeaderJson(_), InvalidHeaderJson(_)) => true,
            (InvalidConfigJson(_), InvalidConfigJson(_)) => true,

            (MissingEpoch, MissingEpoch) => true,

            _ => false,
        }
    }
}
