/// Errors returned by the line segment detector. All of them describe
/// malformed input and are raised before any work is done.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LsdError {
    #[error("image must be at least 2x2 pixels (got {width}x{height})")]
    ImageTooSmall { width: usize, height: usize },
    #[error("buffer holds {actual} samples, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("non-finite sample at ({x}, {y})")]
    NonFiniteSample { x: usize, y: usize },
    #[error("scale must be finite and positive (got {0})")]
    InvalidScale(f64),
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}
