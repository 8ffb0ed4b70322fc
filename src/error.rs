//! Unified error handling.
//!
//! The routing pipeline itself never fails: malformed itineraries degrade to
//! empty or partial results. Errors only arise at the edges, when reference
//! tables or itinerary documents are loaded.

use thiserror::Error;

/// Errors raised while loading reference data or itinerary input.
#[derive(Debug, Error)]
pub enum VoyageError {
    /// A route pattern or barrier names a chokepoint the table does not define.
    #[error("{owner} references unknown chokepoint '{id}'")]
    UnknownChokepoint { owner: String, id: String },

    /// A route pattern names a region the table does not define.
    #[error("{owner} references unknown region '{name}'")]
    UnknownRegion { owner: String, name: String },

    /// Two regions share the same name.
    #[error("region '{name}' is defined more than once")]
    DuplicateRegion { name: String },

    /// A bounding box with min > max or non-finite edges.
    #[error("bounds of '{name}' are inverted or not finite")]
    InvalidBounds { name: String },

    /// A `RouteConfig` setting outside its accepted range.
    #[error("invalid config {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, VoyageError>;

/// Extension trait for turning table lookups into typed errors.
pub trait OptionExt<T> {
    fn ok_or_unknown_chokepoint(self, owner: &str, id: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_unknown_chokepoint(self, owner: &str, id: &str) -> Result<T> {
        self.ok_or_else(|| VoyageError::UnknownChokepoint {
            owner: owner.to_string(),
            id: id.to_string(),
        })
    }
}
