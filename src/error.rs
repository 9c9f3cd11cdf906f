//! Error types for grid and rule operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: i32, height: i32 },

    #[error("grid of {width}x{height} cells cannot be allocated")]
    TooLarge { width: i32, height: i32 },

    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("rule value {0} is outside 0..=8")]
    InvalidRule(u32),

    #[error("cannot parse rule string {0:?}")]
    InvalidRuleString(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
