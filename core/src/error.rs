/// Errors surfaced by graph mutations and iterator construction.
///
/// Lookups never fail: a missing vertex or edge is reported as `None`/`false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("vertices are nil")]
    NilVertices,
    #[error("vertex does not exist")]
    VertexDoesNotExist,
    #[error("edge already exists")]
    EdgeAlreadyExists,
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(GraphError::NilVertices.to_string(), "vertices are nil");
        assert_eq!(GraphError::VertexDoesNotExist.to_string(), "vertex does not exist");
        assert_eq!(GraphError::EdgeAlreadyExists.to_string(), "edge already exists");
    }
}
