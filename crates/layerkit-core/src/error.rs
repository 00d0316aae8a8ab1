//! Error handling for LayerKit
//!
//! Provides error types for each part of the drawing surface:
//! - Layer errors (invalid references, degenerate geometry, unready resources)
//! - Resource errors (image loading and decoding)
//! - Scene errors (scene file parsing)
//!
//! Layer errors are recoverable by design of the canvas: operations that hit
//! them turn into no-ops or skipped draws and are only logged.

use crate::types::LayerId;
use thiserror::Error;

/// Layer error type
///
/// Raised by layer operations and by per-layer drawing. The canvas never
/// propagates these to its caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayerError {
    /// The layer is not tracked by the canvas
    #[error("Invalid layer reference: {id}")]
    InvalidLayerReference {
        /// The unknown layer id.
        id: LayerId,
    },

    /// The layer geometry has too few points for the operation
    #[error("Degenerate {kind} geometry with {points} point(s)")]
    DegenerateGeometry {
        /// The layer kind name.
        kind: &'static str,
        /// The number of points the layer holds.
        points: usize,
    },

    /// The image backing the layer has not finished loading
    #[error("Resource not ready: {source_id}")]
    ResourceNotReady {
        /// Identifier of the image source.
        source_id: String,
    },
}

/// Resource error type
///
/// Represents failures while loading image resources.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// The image source could not be read
    #[error("Failed to read image {source_id}: {reason}")]
    Io {
        /// Identifier of the image source.
        source_id: String,
        /// The underlying I/O failure.
        reason: String,
    },

    /// The image data could not be decoded
    #[error("Failed to decode image {source_id}: {reason}")]
    Decode {
        /// Identifier of the image source.
        source_id: String,
        /// The decoder failure.
        reason: String,
    },

    /// The image was requested before its load completed
    #[error("Image {source_id} is still loading")]
    Pending {
        /// Identifier of the image source.
        source_id: String,
    },
}

/// Scene error type
///
/// Represents errors while reading or building a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    /// I/O error while reading or writing a scene file
    #[error("Scene I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed scene JSON
    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported scene file version
    #[error("Unsupported scene version {found}, expected {expected}")]
    UnsupportedVersion {
        /// The version found in the file.
        found: String,
        /// The version this build reads.
        expected: String,
    },

    /// A layer entry could not be built
    #[error("Invalid layer #{index}: {reason}")]
    InvalidLayer {
        /// Position of the entry in the scene's layer list.
        index: usize,
        /// Why the entry was rejected.
        reason: String,
    },
}

/// Main error type for LayerKit
///
/// A unified error type that can represent any error from the library crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Layer error
    #[error(transparent)]
    Layer(#[from] LayerError),

    /// Resource error
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Result type alias using LayerKit's Error
pub type Result<T> = std::result::Result<T, Error>;
