//! Parameter types configuring the detector stages.
//!
//! [`DetectionParams`] is the plain, serde-friendly bag of knobs.
//! [`DetectionConfig`] is its validated, immutable form and the only thing
//! the stages accept; invalid values are rejected when it is constructed (or
//! deserialised) rather than deep inside an accumulator pass.
//!
//! Defaults suit dials drawn with thin strokes on a few hundred pixels. For
//! tuning, start with `center_threshold` (circle stage) and
//! `line_vote_threshold` (needle stage).

use crate::hough::CircleVoteParams;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;

/// Every tunable of the two-stage pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Inverse ratio of accumulator resolution to image resolution (circles).
    pub dp: f32,
    /// Minimum pixel distance between accepted circle centres.
    pub min_center_distance: f32,
    /// Canny high threshold for circle voting (low = half).
    pub edge_threshold: f32,
    /// Vote gate for circle centres and radius support.
    pub center_threshold: u32,
    /// Smallest circle radius searched.
    pub min_radius: u32,
    /// Largest circle radius searched; 0 = up to the larger image side.
    pub max_radius: u32,
    /// Gaussian kernel size (odd) applied before circle voting.
    pub blur_kernel_size: usize,
    /// Gaussian sigma before circle voting; 0 derives it from the size.
    pub blur_sigma: f32,
    /// Gaussian kernel size (odd) applied before needle edge extraction.
    pub line_blur_kernel_size: usize,
    /// Gaussian sigma before needle edge extraction; 0 derives it.
    pub line_blur_sigma: f32,
    /// Canny hysteresis thresholds for the needle stage.
    pub edge_low: f32,
    pub edge_high: f32,
    /// Sobel aperture for the needle stage (3, 5 or 7).
    pub edge_aperture: usize,
    /// ρ step of the line accumulator (pixels).
    pub rho_resolution: f32,
    /// θ step of the line accumulator (radians), in (0, π].
    pub theta_resolution: f32,
    /// Minimum votes for a line candidate.
    pub line_vote_threshold: u32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            dp: 1.0,
            min_center_distance: 50.0,
            edge_threshold: 300.0,
            center_threshold: 100,
            min_radius: 10,
            max_radius: 0,
            blur_kernel_size: 5,
            blur_sigma: 0.0,
            line_blur_kernel_size: 9,
            line_blur_sigma: 1.0,
            edge_low: 50.0,
            edge_high: 200.0,
            edge_aperture: 3,
            rho_resolution: 1.0,
            theta_resolution: PI / 180.0,
            line_vote_threshold: 60,
        }
    }
}

/// Why a parameter set was rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NotFinite {
        field: &'static str,
    },
    NotPositive {
        field: &'static str,
        value: f64,
    },
    Negative {
        field: &'static str,
        value: f64,
    },
    EvenKernel {
        field: &'static str,
        size: usize,
    },
    UnsupportedAperture {
        aperture: usize,
    },
    ThetaOutOfRange {
        value: f32,
    },
    InvertedThresholds {
        low: f32,
        high: f32,
    },
    InvertedRadiusRange {
        min: u32,
        max: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field } => write!(f, "{field} must be finite"),
            ConfigError::NotPositive { field, value } => {
                write!(f, "{field} must be strictly positive (got {value})")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            ConfigError::EvenKernel { field, size } => {
                write!(f, "{field} must be an odd size ≥ 1 (got {size})")
            }
            ConfigError::UnsupportedAperture { aperture } => {
                write!(f, "edge_aperture must be 3, 5 or 7 (got {aperture})")
            }
            ConfigError::ThetaOutOfRange { value } => {
                write!(f, "theta_resolution must lie in (0, π] (got {value})")
            }
            ConfigError::InvertedThresholds { low, high } => {
                write!(f, "edge_low ({low}) exceeds edge_high ({high})")
            }
            ConfigError::InvertedRadiusRange { min, max } => {
                write!(f, "max_radius ({max}) is below min_radius ({min})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NotPositive {
            field,
            value: value as f64,
        });
    }
    Ok(())
}

fn positive_count(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NotPositive { field, value: 0.0 });
    }
    Ok(())
}

fn sigma(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative {
            field,
            value: value as f64,
        });
    }
    Ok(())
}

fn odd_kernel(field: &'static str, size: usize) -> Result<(), ConfigError> {
    if size == 0 || size % 2 == 0 {
        return Err(ConfigError::EvenKernel { field, size });
    }
    Ok(())
}

impl DetectionParams {
    /// Check every invariant; the first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("dp", self.dp)?;
        positive("min_center_distance", self.min_center_distance)?;
        positive("edge_threshold", self.edge_threshold)?;
        positive_count("center_threshold", self.center_threshold)?;
        if self.max_radius != 0 && self.max_radius < self.min_radius {
            return Err(ConfigError::InvertedRadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        odd_kernel("blur_kernel_size", self.blur_kernel_size)?;
        sigma("blur_sigma", self.blur_sigma)?;
        odd_kernel("line_blur_kernel_size", self.line_blur_kernel_size)?;
        sigma("line_blur_sigma", self.line_blur_sigma)?;
        positive("edge_low", self.edge_low)?;
        positive("edge_high", self.edge_high)?;
        if self.edge_low > self.edge_high {
            return Err(ConfigError::InvertedThresholds {
                low: self.edge_low,
                high: self.edge_high,
            });
        }
        if !matches!(self.edge_aperture, 3 | 5 | 7) {
            return Err(ConfigError::UnsupportedAperture {
                aperture: self.edge_aperture,
            });
        }
        positive("rho_resolution", self.rho_resolution)?;
        if !self.theta_resolution.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "theta_resolution",
            });
        }
        if self.theta_resolution <= 0.0 || self.theta_resolution > PI {
            return Err(ConfigError::ThetaOutOfRange {
                value: self.theta_resolution,
            });
        }
        positive_count("line_vote_threshold", self.line_vote_threshold)?;
        Ok(())
    }
}

/// Validated, immutable detection configuration shared by every stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DetectionParams", into = "DetectionParams")]
pub struct DetectionConfig {
    params: DetectionParams,
}

impl DetectionConfig {
    pub fn new(params: DetectionParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Circle voting parameters derived from this config.
    pub fn circle_vote_params(&self) -> CircleVoteParams {
        let p = &self.params;
        CircleVoteParams {
            dp: p.dp,
            min_center_distance: p.min_center_distance,
            edge_threshold: p.edge_threshold,
            center_threshold: p.center_threshold,
            min_radius: p.min_radius,
            max_radius: p.max_radius,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            params: DetectionParams::default(),
        }
    }
}

impl TryFrom<DetectionParams> for DetectionConfig {
    type Error = ConfigError;

    fn try_from(params: DetectionParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<DetectionConfig> for DetectionParams {
    fn from(config: DetectionConfig) -> Self {
        config.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DetectionParams::default().validate().is_ok());
        assert_eq!(
            DetectionConfig::new(DetectionParams::default()).unwrap(),
            DetectionConfig::default()
        );
    }

    #[test]
    fn non_positive_resolutions_are_rejected() {
        let err = DetectionConfig::new(DetectionParams {
            rho_resolution: 0.0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "rho_resolution",
                ..
            }
        ));

        let err = DetectionConfig::new(DetectionParams {
            dp: -1.0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "dp", .. }));

        let err = DetectionConfig::new(DetectionParams {
            line_vote_threshold: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "line_vote_threshold",
                ..
            }
        ));
    }

    #[test]
    fn theta_resolution_must_be_in_half_open_range() {
        for bad in [0.0, -0.1, PI + 0.01] {
            let err = DetectionConfig::new(DetectionParams {
                theta_resolution: bad,
                ..Default::default()
            })
            .unwrap_err();
            assert!(matches!(err, ConfigError::ThetaOutOfRange { .. }), "{bad}");
        }
        assert!(DetectionConfig::new(DetectionParams {
            theta_resolution: PI,
            ..Default::default()
        })
        .is_ok());
    }

    #[test]
    fn kernels_must_be_odd() {
        for size in [0, 4] {
            let err = DetectionConfig::new(DetectionParams {
                blur_kernel_size: size,
                ..Default::default()
            })
            .unwrap_err();
            assert_eq!(
                err,
                ConfigError::EvenKernel {
                    field: "blur_kernel_size",
                    size
                }
            );
        }
    }

    #[test]
    fn edge_settings_are_checked() {
        let err = DetectionConfig::new(DetectionParams {
            edge_low: 250.0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvertedThresholds { .. }));

        let err = DetectionConfig::new(DetectionParams {
            edge_aperture: 4,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedAperture { aperture: 4 });

        let err = DetectionConfig::new(DetectionParams {
            blur_sigma: f32::NAN,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::NotFinite { field: "blur_sigma" });
    }

    #[test]
    fn json_deserialisation_validates() {
        let cfg: DetectionConfig =
            serde_json::from_str(r#"{ "center_threshold": 42 }"#).expect("valid partial config");
        assert_eq!(cfg.params().center_threshold, 42);
        assert_eq!(cfg.params().dp, 1.0);

        let bad = serde_json::from_str::<DetectionConfig>(r#"{ "dp": 0.0 }"#);
        assert!(bad.is_err());
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::NotPositive {
            field: "edge_high",
            value: 0.0,
        };
        assert!(err.to_string().contains("edge_high"));
    }
}
