//! Error types for tile batch operations.

use std::fmt;

use crate::detail::{ColorFlag, DetailMode, LayoutFlag};

/// Result type alias for batch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse category of an [`Error`].
///
/// Debug sinks can filter on the code without matching payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidBatchDimensions,
    InvalidDetailMode,
    InvalidBatchLayout,
    InvalidTilePixelDimensions,
    InvalidViewportDimensions,
    InvalidMaxTileCount,
    TileOutOfBounds,
    BatchOverflow,
    InvalidBatchSetter,
    FieldOutOfRange,
    UnknownName,
    AllocationFailed,
}

/// Error type for detail mode and batch operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Batch tile dimensions must both be positive.
    InvalidDimensions { width: u32, height: u32 },
    /// Raw bits do not describe a valid detail mode.
    InvalidDetailMode(u32),
    /// The mode's layout does not match the requested batch kind.
    LayoutMismatch {
        mode: DetailMode,
        expected: LayoutFlag,
    },
    /// Glyph pixel dimensions of a free batch must both be positive.
    InvalidTilePixelDimensions { width: u32, height: u32 },
    /// Viewport pixel dimensions of a free batch must both be positive.
    InvalidViewportDimensions { width: u32, height: u32 },
    /// A free batch needs room for at least one tile.
    InvalidMaxTileCount(u32),
    /// Tile coordinate outside the batch grid.
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    /// No room left for another record.
    TileOverflow { max_tile_count: usize },
    /// Tile payload shape does not match the batch's color flag.
    ColorMismatch { mode: DetailMode, found: ColorFlag },
    /// A field value does not fit its encoded width.
    FieldOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
    /// String is not the name of a flag, mode or blend mode.
    UnknownName(String),
    /// Tile storage of this many bytes could not be allocated.
    AllocationFailed { bytes: usize },
}

impl Error {
    /// Category of this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidDimensions { .. } => ErrorCode::InvalidBatchDimensions,
            Self::InvalidDetailMode(_) => ErrorCode::InvalidDetailMode,
            Self::LayoutMismatch { .. } => ErrorCode::InvalidBatchLayout,
            Self::InvalidTilePixelDimensions { .. } => ErrorCode::InvalidTilePixelDimensions,
            Self::InvalidViewportDimensions { .. } => ErrorCode::InvalidViewportDimensions,
            Self::InvalidMaxTileCount(_) => ErrorCode::InvalidMaxTileCount,
            Self::OutOfBounds { .. } => ErrorCode::TileOutOfBounds,
            Self::TileOverflow { .. } => ErrorCode::BatchOverflow,
            Self::ColorMismatch { .. } => ErrorCode::InvalidBatchSetter,
            Self::FieldOutOfRange { .. } => ErrorCode::FieldOutOfRange,
            Self::UnknownName(_) => ErrorCode::UnknownName,
            Self::AllocationFailed { .. } => ErrorCode::AllocationFailed,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid batch dimensions: {width}x{height}")
            }
            Self::InvalidDetailMode(bits) => write!(f, "invalid detail mode: {bits:#x}"),
            Self::LayoutMismatch { mode, expected } => {
                write!(f, "detail mode {mode} does not use the {expected} layout")
            }
            Self::InvalidTilePixelDimensions { width, height } => {
                write!(f, "invalid tile pixel dimensions: {width}x{height}")
            }
            Self::InvalidViewportDimensions { width, height } => {
                write!(f, "invalid viewport pixel dimensions: {width}x{height}")
            }
            Self::InvalidMaxTileCount(count) => write!(f, "invalid max tile count: {count}"),
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "tile ({x}, {y}) out of bounds for {width}x{height} batch"
                )
            }
            Self::TileOverflow { max_tile_count } => {
                write!(f, "batch is full ({max_tile_count} tiles)")
            }
            Self::ColorMismatch { mode, found } => {
                write!(f, "{found} tile colors cannot be written to a {mode} batch")
            }
            Self::FieldOutOfRange { field, value, max } => {
                write!(f, "{field} value {value} exceeds encodable maximum {max}")
            }
            Self::UnknownName(name) => write!(f, "unknown name: {name:?}"),
            Self::AllocationFailed { bytes } => {
                write!(f, "failed to allocate {bytes} bytes of tile storage")
            }
        }
    }
}

impl std::error::Error for Error {}
