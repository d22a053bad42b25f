use thiserror::Error;

/// Top-level error type for the boardsolid crate.
#[derive(Debug, Error)]
pub enum BoardsolidError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to topological lookups and structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wire is not closed")]
    WireNotClosed,
}

/// Errors related to modeling operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Unrecoverable conditions met while reading a board file.
///
/// Once one of these is recorded the parsed outline set is discarded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unsupported file type '{0}'")]
    UnsupportedFileType(String),

    #[error("only IDF version 3.0 is supported, not version '{0}'")]
    UnsupportedVersion(f64),

    #[error("units must be either 'MM' or 'THOU', not '{0}'")]
    InvalidUnits(String),

    #[error("'.END_HEADER' not record 4 of HEADER section")]
    MissingHeaderEnd,

    #[error("'{0}' section appears before the HEADER section")]
    MissingHeader(String),

    #[error("stream ended before '{0}'")]
    UnterminatedSection(String),

    #[error("failed to read board file: {0}")]
    Read(String),
}

/// Reasons a polyhedral solid could not be flattened into plain faces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error("face {face} has only {vertices} vertices")]
    TooFewVertices { face: usize, vertices: usize },

    #[error("face {face} has a broken boundary loop")]
    BrokenLoop { face: usize },
}

/// Errors raised by the STL serializer.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported geometry for STL export: {0}")]
    Unsupported(&'static str),
}

/// Convenience type alias for results using [`BoardsolidError`].
pub type Result<T> = std::result::Result<T, BoardsolidError>;
