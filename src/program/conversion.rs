use super::definition::ProgramDefinition;
use crate::error::ConversionError;

/// A trait for host snapshot formats that can be converted into a `ProgramDefinition`.
///
/// The engine only ever works on the canonical definition. Implement this on your own
/// document structs to load them without going through the bundled JSON snapshot.
///
/// # Example
///
/// ```rust,no_run
/// use tickflow::error::ConversionError;
/// use tickflow::program::{Connection, IntoProgram, NodeDefinition, ProgramDefinition};
///
/// struct Block { id: String, kind: String }
/// struct Sheet { blocks: Vec<Block>, wires: Vec<(String, String)> }
///
/// impl IntoProgram for Sheet {
///     fn into_program(self) -> Result<ProgramDefinition, ConversionError> {
///         let nodes = self
///             .blocks
///             .into_iter()
///             .map(|b| NodeDefinition::new(b.id, b.kind))
///             .collect();
///         let connections = self
///             .wires
///             .into_iter()
///             .enumerate()
///             .map(|(i, (from, to))| Connection::new(i.to_string(), from, "value", to, "num1"))
///             .collect();
///         Ok(ProgramDefinition { nodes, connections, ..Default::default() })
///     }
/// }
/// ```
pub trait IntoProgram {
    /// Consumes the object and converts it into the engine's canonical program model.
    fn into_program(self) -> Result<ProgramDefinition, ConversionError>;
}

impl IntoProgram for ProgramDefinition {
    fn into_program(self) -> Result<ProgramDefinition, ConversionError> {
        Ok(self)
    }
}
