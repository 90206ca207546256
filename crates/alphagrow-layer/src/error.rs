//! Error types for alphagrow-layer

use crate::types::{BufferId, ChannelId, FloatingId, LayerId, MaskId};
use thiserror::Error;

/// Errors reported by a raster substrate
#[derive(Debug, Error)]
pub enum LayerError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] alphagrow_core::Error),

    /// Filter error (tone curves)
    #[error("filter error: {0}")]
    Filter(#[from] alphagrow_filter::FilterError),

    /// No layer with this handle exists
    #[error("unknown {0}")]
    UnknownLayer(LayerId),

    /// No channel with this handle exists
    #[error("unknown {0}")]
    UnknownChannel(ChannelId),

    /// No mask with this handle exists
    #[error("unknown {0}")]
    UnknownMask(MaskId),

    /// No named buffer with this handle exists
    #[error("unknown {0}")]
    UnknownBuffer(BufferId),

    /// The floating selection handle is stale
    #[error("unknown {0}")]
    UnknownFloating(FloatingId),

    /// The layer exists but is not part of the layer stack
    #[error("{0} is not in the layer stack")]
    LayerNotInStack(LayerId),

    /// The layer is already part of the layer stack
    #[error("{0} is already in the layer stack")]
    LayerAlreadyInStack(LayerId),

    /// The channel is already part of the channel list
    #[error("{0} is already in the channel list")]
    ChannelAlreadyInserted(ChannelId),

    /// Merge requested with no visible layers
    #[error("no visible layers to merge")]
    NothingToMerge,

    /// A floating selection must be anchored first
    #[error("a floating selection is pending")]
    FloatingSelectionExists,

    /// The layer already carries a mask
    #[error("{0} already has a mask")]
    MaskAlreadyAttached(LayerId),

    /// The mask is already attached to a layer
    #[error("{0} is already attached")]
    MaskInUse(MaskId),

    /// Mask and layer sizes differ
    #[error("mask size {}x{} does not match layer size {}x{}", .mask.0, .mask.1, .layer.0, .layer.1)]
    MaskSizeMismatch { mask: (u32, u32), layer: (u32, u32) },

    /// A mask from the active channel was requested with none set
    #[error("no active channel")]
    NoActiveChannel,

    /// `end_group` / `abort_group` without a matching `begin_group`
    #[error("no undo group is open")]
    NoOpenGroup,

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for substrate operations
pub type LayerResult<T> = Result<T, LayerError>;
