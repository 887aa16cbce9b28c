use std::fmt;

/// Which end of an edge record failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors raised while building the registry, graph views or score tables.
///
/// None of these are retried. Each one reflects malformed input data or a
/// programming defect, and carries the offending identifier, index or label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge references an identifier that is not in the node table.
    #[error("edge row {row}: {endpoint} identifier {identifier:?} is not in the node table")]
    UnknownIdentifier {
        identifier: String,
        row: usize,
        endpoint: Endpoint,
    },

    /// Registry lookup of an identifier that was never registered.
    #[error("identifier {0:?} was never registered")]
    UnregisteredIdentifier(String),

    /// The node table lists the same identifier twice.
    #[error("identifier {identifier:?} appears in node rows {first_row} and {row}")]
    DuplicateIdentifier {
        identifier: String,
        first_row: usize,
        row: usize,
    },

    /// A resolved edge points outside `[0, node_count)`.
    #[error("edge {edge}: node index {index} is out of range for {node_count} nodes")]
    InvalidEdgeReference {
        edge: usize,
        index: usize,
        node_count: usize,
    },

    /// A centrality vector does not match the registry size.
    #[error("result {label:?} has {actual} scores but the registry holds {expected} nodes")]
    MisalignedResult {
        label: String,
        expected: usize,
        actual: usize,
    },

    /// Two centrality results were supplied under the same column label.
    #[error("score column {0:?} was supplied more than once")]
    DuplicateLabel(String),

    /// A required column is missing from a table header.
    #[error("{table} table has no {column:?} column")]
    MissingColumn { table: &'static str, column: String },

    /// A table row has a different number of fields than its header.
    #[error("{table} row {row} has {actual} fields, header has {expected}")]
    RaggedRow {
        table: &'static str,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// The worker pool for parallel traversal could not be created.
    #[error("failed to start traversal worker pool: {0}")]
    ThreadPool(String),
}

impl GraphError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownIdentifier { .. } | Self::UnregisteredIdentifier(_) => {
                ErrorCode::UnknownIdentifier
            }
            Self::DuplicateIdentifier { .. } => ErrorCode::DuplicateIdentifier,
            Self::InvalidEdgeReference { .. } => ErrorCode::InvalidEdgeReference,
            Self::MisalignedResult { .. } => ErrorCode::MisalignedResult,
            Self::DuplicateLabel(_) => ErrorCode::DuplicateLabel,
            Self::MissingColumn { .. } => ErrorCode::MissingColumn,
            Self::RaggedRow { .. } => ErrorCode::RaggedRow,
            Self::ThreadPool(_) => ErrorCode::ThreadPool,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for GraphError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(e.to_string())
    }
}

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    MissingColumn,
    RaggedRow,
    UnknownIdentifier,
    DuplicateIdentifier,
    DuplicateLabel,
    ThreadPool,
    InvalidEdgeReference,
    MisalignedResult,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::MissingColumn => "E1002",
            Self::RaggedRow => "E1003",
            Self::UnknownIdentifier => "E2001",
            Self::DuplicateIdentifier => "E2002",
            Self::DuplicateLabel => "E2003",
            Self::ThreadPool => "E5001",
            Self::InvalidEdgeReference => "E9001",
            Self::MisalignedResult => "E9002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::MissingColumn => "Required column missing",
            Self::RaggedRow => "Table row width mismatch",
            Self::UnknownIdentifier => "Unknown node identifier",
            Self::DuplicateIdentifier => "Duplicate node identifier",
            Self::DuplicateLabel => "Duplicate score column",
            Self::ThreadPool => "Worker pool unavailable",
            Self::InvalidEdgeReference => "Edge index out of range",
            Self::MisalignedResult => "Centrality result misaligned",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in power-broker.toml and retry."),
            Self::MissingColumn => {
                Some("Check the header row, or map column names under [columns] in the config.")
            }
            Self::RaggedRow => Some("Quote fields that contain the delimiter."),
            Self::UnknownIdentifier => {
                Some("Add the node to the node table or drop the edge before scoring.")
            }
            Self::DuplicateIdentifier => Some("Node identifiers must be unique; deduplicate rows."),
            Self::DuplicateLabel => Some("Give each view a distinct output column label."),
            Self::ThreadPool => Some("Retry with --sequential or a smaller --threads value."),
            Self::InvalidEdgeReference | Self::MisalignedResult => {
                Some("This is a bug; report it with the input tables attached.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
