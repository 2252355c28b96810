//! Error types for the view layer.
//!
//! Fetch failures never appear here: they are absorbed into each
//! component's own state. What remains are problems with the templates
//! themselves, which are programming or deployment errors.

/// Errors that can occur while rendering views.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// A template failed to load, compile, or render.
    #[error("template error: {0}")]
    Template(String),

    /// A template directory could not be read.
    #[error("template directory error: {0}")]
    TemplateDir(String),
}
