use thiserror::Error;

/// Rejected conversion settings. The pipeline itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("target_width must be between 1 and 1000, got {0}")]
    TargetWidth(u32),
    #[error("border_size must be between 1 and 100, got {0}")]
    BorderSize(u32),
    #[error("min_threshold must be between 0.0 and 442.0, got {0}")]
    MinThreshold(f64),
    #[error("noise_multiplier must be between 0.0 and 10.0, got {0}")]
    NoiseMultiplier(f64),
    #[error("char_aspect must be between 0.1 and 2.0, got {0}")]
    CharAspect(f32),
    #[error("glyph ramp must contain at least one character")]
    EmptyRamp,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
