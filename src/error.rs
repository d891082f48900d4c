use thiserror::Error;

/// Errors surfaced by the overlay core.
///
/// Almost everything here is a guarded no-op instead of a failure: pointer
/// input with no active tool, drags with no selection and out-of-range
/// coordinates are all ignored by construction. What remains is the one
/// user-facing rejection plus setup problems.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// A label was submitted with empty or whitespace-only content.
    #[error("label text is empty")]
    EmptyLabelText,

    /// The raster canvas could not load a usable font face.
    #[error("no usable font face: {0}")]
    FontUnavailable(String),
}
