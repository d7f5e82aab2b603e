use thiserror::Error;

/// Rejected bridge parameters.
///
/// The geometry functions never raise these; hosts call
/// [`BridgeConfig::validate`](crate::config::BridgeConfig::validate) before
/// handing a config to the renderer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },

    #[error("`{field}` must be at least {min} (got {value})")]
    StepTooSmall {
        field: &'static str,
        value: f32,
        min: f32,
    },

    #[error("towers must taper upward: towerTopWidth ({top}) must be less than towerBottomWidth ({bottom})")]
    InvertedTaper { top: f32, bottom: f32 },
}
