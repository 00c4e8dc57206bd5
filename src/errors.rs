use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing a halftone image
#[derive(Error, Debug)]
pub enum HalftoneError {
    /// Error when a configuration value is out of range
    #[error("Invalid parameter: {field} - {message}")]
    InvalidParameter { field: &'static str, message: String },

    /// Error when a color string is not an RGB triple
    #[error("Invalid RGB color '{0}': expected (r,g,b) with channels in 0..=255")]
    InvalidColor(String),

    /// Error when the configuration file cannot be read or parsed
    #[error("Configuration file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    /// Error when the input image cannot be decoded
    #[error("Failed to read image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Error when the output image cannot be encoded
    #[error("Failed to write image {path}: {source}")]
    ImageEncode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Error when the input image has no pixels
    #[error("Image {0} has zero width or height")]
    EmptyImage(PathBuf),

    /// Opposite kernel edges are not parallel (vertex order is wrong)
    #[error("Kernel edges {pair} are not parallel: slopes {first} and {second}")]
    SkewedKernel {
        pair: &'static str,
        first: f64,
        second: f64,
    },

    /// A ribbon sample is thicker than the row budget
    #[error("Ribbon height {height} exceeds the row thickness {side}")]
    HeightOutOfRange { height: f64, side: f64 },

    /// A sample was added to a ribbon whose outline is already built
    #[error("Ribbon outline is already finalized")]
    RibbonFinalized,

    /// A transform was applied to a ribbon without an outline
    #[error("Ribbon outline has not been finalized")]
    RibbonNotFinalized,

    /// An outline was requested for a ribbon with no samples
    #[error("Ribbon has no samples")]
    EmptyRibbon,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with HalftoneError
pub type Result<T> = std::result::Result<T, HalftoneError>;

impl HalftoneError {
    /// Shorthand for [`HalftoneError::InvalidParameter`]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        HalftoneError::InvalidParameter {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = HalftoneError::invalid("side", "must be positive");
        assert_eq!(err.to_string(), "Invalid parameter: side - must be positive");
    }

    #[test]
    fn test_height_out_of_range_message() {
        let err = HalftoneError::HeightOutOfRange {
            height: 21.0,
            side: 20.0,
        };
        assert!(err.to_string().contains("21"));
    }
}
