use thiserror::Error;

/// Errors that can occur while loading a program snapshot into the engine.
#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("Failed to parse program snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Failed to access program snapshot '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Node '{node_id}' has an unsupported node type: '{type_name}'")]
    UnsupportedNodeType { node_id: String, type_name: String },

    #[error("Node '{0}' is defined more than once")]
    DuplicateNode(String),

    #[error("Connection '{0}' is defined more than once")]
    DuplicateConnection(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Errors that abort an evaluation pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Evaluation target '{0}' not found in the program")]
    NodeNotFound(String),

    #[error("Cycle detected between nodes: {}", .nodes.join(", "))]
    CycleDetected { nodes: Vec<String> },
}

/// Errors raised by a device stream channel.
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Device stream read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Device reader task ended abnormally: {0}")]
    Task(String),
}

/// Errors that can occur when converting a host snapshot format into a `ProgramDefinition`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Invalid snapshot data: {0}")]
    ValidationError(String),
}
