use crate::node::NodeId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when addressing nodes in a field.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested node ID does not exist in the field.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
}
