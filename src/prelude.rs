//! Prelude module for convenient imports
//!
//! Re-exports the types most programs need to load, tick and describe a dataflow program.

// Engine
pub use crate::engine::{Engine, EngineBuilder, EngineConfig, EvalContext, Evaluation, EvaluationWarning};

// Program model
pub use crate::program::{
    Connection, IntoProgram, Node, NodeDefinition, Program, ProgramDefinition, ProgramSnapshot,
    RecentValues, TickEntry, MAX_NODE_VALUES,
};

// Node contracts
pub use crate::nodes::{NodeEvaluator, NodeKind, NodeRegistry};

// Ports
pub use crate::port::{PortType, PortValue, PortValues};

// Rendering
pub use crate::formula::{Formula, FormulaRenderer};
pub use crate::graph::to_graph_description;

// Devices
pub use crate::device::{DeviceStream, LineFramer};

// Error types
pub use crate::error::{ConversionError, DeviceError, EngineError, ProgramError};
