//! Error types for generation (`SynthError`) and dataset I/O (`DatasetError`).
//!
//! Every `SynthError` variant is fatal to the current run. Nothing is persisted
//! before the whole bundle exists in memory, so callers can simply redraw with a
//! new seed.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::regions::Region;

#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    InvalidParams { reason: String },
    Triangulation { reason: String },
    /// A region the walk generator must sample from is empty.
    DegenerateRegion { region: Region },
    /// Two sampled waypoints lie in different connected components.
    NoPath { from: usize, to: usize },
    /// Consecutive path nodes that do not share an edge of the complex.
    NotAnEdge { from: usize, to: usize },
    /// Walk `walk` has `len` nodes but the hop window needs `required`.
    ShortWalk {
        walk: usize,
        len: usize,
        required: usize,
    },
}

impl SynthError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    pub(crate) fn triangulation(reason: impl Into<String>) -> Self {
        Self::Triangulation {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid params: {reason}"),
            Self::Triangulation { reason } => write!(f, "triangulation failed: {reason}"),
            Self::DegenerateRegion { region } => {
                write!(f, "region {region} is empty; increase the node count")
            }
            Self::NoPath { from, to } => write!(f, "no path between nodes {from} and {to}"),
            Self::NotAnEdge { from, to } => {
                write!(f, "step {from} -> {to} does not follow an edge")
            }
            Self::ShortWalk {
                walk,
                len,
                required,
            } => write!(
                f,
                "walk {walk} has {len} nodes, hop window needs at least {required}"
            ),
        }
    }
}

impl std::error::Error for SynthError {}

/// Failure while saving or loading a dataset directory.
#[derive(Debug)]
pub enum DatasetError {
    Io { path: PathBuf, source: io::Error },
    /// An `.npy` file could not be encoded or decoded.
    Npy { file: String, reason: String },
    /// Files decoded but disagree with the bundle layout.
    Format { file: String, reason: String },
}

impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            file: file.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Npy { file, reason } => write!(f, "{file}: npy: {reason}"),
            Self::Format { file, reason } => write!(f, "{file}: {reason}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
