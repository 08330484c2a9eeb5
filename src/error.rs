use thiserror::Error;

/** errors reported by the k-MST library */
#[derive(Debug, Error)]
pub enum KmstError {
    /// the instance violates a precondition of the solver (bad k, bad node index, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// no connected component of the graph contains k nodes
    #[error("no feasible solution: no tree with {k} nodes exists")]
    NoFeasibleSolution {
        /// requested tree size
        k: usize,
    },

    /// instance or solution file could not be read/written
    #[error("unable to access {filename}: {source}")]
    Io {
        /// file involved
        filename: String,
        /// underlying error
        #[source]
        source: std::io::Error,
    },

    /// malformed text instance
    #[error("parse error: {0}")]
    Parse(String),

    /// malformed json instance
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
