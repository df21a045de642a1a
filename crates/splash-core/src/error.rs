use thiserror::Error;

/// Failures surfaced by the splash core.
///
/// Per-frame work never returns these; they come out of scheduling calls,
/// allocation attempts and the asset gate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplashError {
    #[error("tween duration must be finite and positive, got {0}")]
    InvalidDuration(f64),
    #[error("tween delay must be finite and non-negative, got {0}")]
    InvalidDelay(f64),
    #[error("could not allocate a {width}x{height} texture")]
    TextureAlloc { width: usize, height: usize },
    #[error("asset `{asset}` failed to load: {reason}")]
    AssetLoad { asset: String, reason: String },
    #[error("reveal already started")]
    RevealAlreadyStarted,
}

pub type Result<T> = std::result::Result<T, SplashError>;
