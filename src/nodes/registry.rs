use super::NodeEvaluator;
use super::{ControlNode, GeneratorNode, LogicNode, MathNode, NumberNode, RelayNode, SensorNode, TimerNode, TransformNode};
use crate::port::PortMap;
use ahash::AHashMap;

/// Master macro to define the node kinds, their type names, and their evaluators.
macro_rules! define_node_kinds {
    ( $( ($variant:ident, $type_name:literal, $evaluator:ident) ),* $(,)? ) => {
        /// The closed set of node types the engine knows how to evaluate.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $( $variant, )*
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$variant, )* ];

            pub fn type_name(self) -> &'static str {
                match self {
                    $( NodeKind::$variant => $type_name, )*
                }
            }

            pub fn from_type_name(name: &str) -> Option<Self> {
                match name {
                    $( $type_name => Some(NodeKind::$variant), )*
                    _ => None,
                }
            }

            pub fn evaluator(self) -> &'static dyn NodeEvaluator {
                match self {
                    $( NodeKind::$variant => &$evaluator, )*
                }
            }
        }

        fn register_default_kinds(registry: &mut AHashMap<String, NodeKind>) {
            $( registry.insert($type_name.to_string(), NodeKind::$variant); )*
        }
    };
}

define_node_kinds! {
    // Sources
    (Number, "Number", NumberNode),
    (Generator, "Generator", GeneratorNode),
    (Timer, "Timer", TimerNode),
    (Sensor, "Sensor", SensorNode),

    // Operators
    (Math, "Math", MathNode),
    (Logic, "Logic", LogicNode),
    (Transform, "Transform", TransformNode),
    (Control, "Control", ControlNode),

    // Outputs
    (Relay, "Relay", RelayNode),
}

impl NodeKind {
    pub fn inputs(self) -> PortMap {
        self.evaluator().inputs()
    }

    pub fn outputs(self) -> PortMap {
        self.evaluator().outputs()
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Resolves snapshot type names to node kinds.
///
/// Starts with every built-in type under its own name; hosts that use other
/// names for the same contracts register aliases.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    kinds: AHashMap<String, NodeKind>,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        let mut kinds = AHashMap::new();
        register_default_kinds(&mut kinds);
        Self { kinds }
    }
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `alias` resolve to `kind`. Re-registering a name replaces it.
    pub fn register_alias(&mut self, alias: impl Into<String>, kind: NodeKind) {
        self.kinds.insert(alias.into(), kind);
    }

    pub fn resolve(&self, type_name: &str) -> Option<NodeKind> {
        self.kinds.get(type_name).copied()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }
}
