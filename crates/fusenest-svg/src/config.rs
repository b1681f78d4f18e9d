use fusenest_core::{DEFAULT_SCALE_FACTOR, DEFAULT_TOLERANCE, FlattenOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("config value {field} = {value} is invalid: {reason}")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Sheet size in modeling units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSize {
    pub width: f64,
    pub height: f64,
}

impl Default for SheetSize {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 30.0,
        }
    }
}

impl SheetSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("sheet.width", self.width)?;
        positive("sheet.height", self.height)
    }
}

/// Which loops of a part's canonical profile end up in its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopSelection {
    #[default]
    All,
    OuterOnly,
}

/// Caller-owned settings for one encode or decode call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Document units per modeling unit.
    pub scale_factor: f64,
    /// Relative tolerance for stitching curve endpoints.
    pub tolerance: f64,
    pub flatten: FlattenOptions,
    pub sheet: SheetSize,
    pub loops: LoopSelection,
    /// Minimum gap between placed parts, modeling units.
    pub spacing: f64,
    /// Number of rotations the placement tool may try per part.
    pub rotations: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            tolerance: DEFAULT_TOLERANCE,
            flatten: FlattenOptions::default(),
            sheet: SheetSize::default(),
            loops: LoopSelection::default(),
            spacing: 0.0,
            rotations: 4,
        }
    }
}

impl CodecConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("scale_factor", self.scale_factor)?;
        positive("tolerance", self.tolerance)?;
        positive("flatten.max_angle_deg", self.flatten.max_angle_deg)?;
        if self.flatten.max_angle_deg > 180.0 {
            return Err(ConfigError::InvalidValue {
                field: "flatten.max_angle_deg",
                value: self.flatten.max_angle_deg,
                reason: "must not exceed 180",
            });
        }
        positive("flatten.min_length", self.flatten.min_length)?;
        if self.flatten.max_samples < 3 {
            return Err(ConfigError::InvalidValue {
                field: "flatten.max_samples",
                value: self.flatten.max_samples as f64,
                reason: "must be at least 3",
            });
        }
        self.sheet.validate()?;
        non_negative("spacing", self.spacing)?;
        if self.rotations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rotations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be positive and finite",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be non-negative and finite",
        })
    }
}
