use super::definition::{Connection, NodeDefinition, Position, ProgramDefinition};
use super::history::{RecentValues, TickEntry};
use crate::error::ProgramError;
use crate::nodes::{NodeKind, NodeRegistry};
use crate::port::parse_number;
use ahash::AHashMap;
use std::collections::BTreeMap;

/// One computation unit in the graph, with its resolved type, configuration and tick history.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    /// The type name as it appears in the snapshot.
    pub type_name: String,
    /// The evaluator contract the type name resolved to at load time.
    pub kind: NodeKind,
    pub name: String,
    pub ordered_display_name: Option<String>,
    pub position: Position,
    pub data: NodeData,
}

/// Configuration plus the two universal history fields every node carries.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub tick_entries: BTreeMap<String, TickEntry>,
    pub recent_values: RecentValues,
    /// Value latched by a hold node while its gate is on.
    pub held_value: Option<f64>,
}

impl Node {
    /// The editor-assigned display name, falling back to the type's human name.
    pub fn display_name(&self) -> &str {
        self.ordered_display_name.as_deref().unwrap_or(&self.name)
    }

    /// `Type:DisplayName`, the label used in formulas and graph descriptions.
    pub fn label(&self) -> String {
        format!("{}:{}", self.type_name, self.display_name())
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.properties.get(key)
    }

    /// Reads a numeric property, accepting numbers and numeric strings.
    pub fn number_property(&self, key: &str) -> Option<f64> {
        match self.property(key)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => {
                let parsed = parse_number(s);
                (!parsed.is_nan()).then_some(parsed)
            }
            serde_json::Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn str_property(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(|v| v.as_str())
    }

    /// The formatted value recorded at `tick`, if any.
    pub fn value_at(&self, tick: &str) -> Option<&str> {
        self.data
            .tick_entries
            .get(tick)
            .and_then(|entry| entry.node_value.as_deref())
    }

    /// The most recent sample in the node's plot history.
    pub fn previous_value(&self) -> Option<f64> {
        self.data.recent_values.last()
    }
}

/// The connections attached to one named port of one node.
#[derive(Debug, Clone)]
pub struct Socket<'a> {
    pub node_id: &'a str,
    pub port: &'a str,
    pub connections: Vec<&'a Connection>,
}

/// A loaded dataflow program: ordered node and connection tables plus the tick log.
#[derive(Debug, Clone, Default)]
pub struct Program {
    id: Option<String>,
    nodes: Vec<Node>,
    node_index: AHashMap<String, usize>,
    connections: Vec<Connection>,
    connection_index: AHashMap<String, usize>,
    recent_ticks: Vec<String>,
}

impl Program {
    /// Builds a program from a definition, resolving every node type against `registry`.
    ///
    /// Unknown type names are rejected here, so evaluation never meets an unsupported node.
    pub fn load(
        definition: ProgramDefinition,
        registry: &NodeRegistry,
    ) -> Result<Self, ProgramError> {
        let mut program = Program {
            id: definition.id,
            recent_ticks: definition.recent_ticks,
            ..Default::default()
        };

        for node_def in definition.nodes {
            let kind = registry.resolve(&node_def.type_name).ok_or_else(|| {
                ProgramError::UnsupportedNodeType {
                    node_id: node_def.id.clone(),
                    type_name: node_def.type_name.clone(),
                }
            })?;
            if program.node_index.contains_key(&node_def.id) {
                return Err(ProgramError::DuplicateNode(node_def.id));
            }
            program
                .node_index
                .insert(node_def.id.clone(), program.nodes.len());
            program.nodes.push(Node {
                id: node_def.id,
                type_name: node_def.type_name,
                kind,
                name: node_def.name,
                ordered_display_name: node_def.ordered_display_name,
                position: node_def.position,
                data: NodeData {
                    properties: node_def.properties,
                    tick_entries: node_def.tick_entries,
                    recent_values: node_def.recent_values,
                    held_value: node_def.held_value,
                },
            });
        }

        for connection in definition.connections {
            if program.connection_index.contains_key(&connection.id) {
                return Err(ProgramError::DuplicateConnection(connection.id));
            }
            program
                .connection_index
                .insert(connection.id.clone(), program.connections.len());
            program.connections.push(connection);
        }

        Ok(program)
    }

    /// Converts the program back into its canonical definition, history included.
    pub fn to_definition(&self) -> ProgramDefinition {
        ProgramDefinition {
            id: self.id.clone(),
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeDefinition {
                    id: node.id.clone(),
                    type_name: node.type_name.clone(),
                    name: node.name.clone(),
                    ordered_display_name: node.ordered_display_name.clone(),
                    position: node.position,
                    properties: node.data.properties.clone(),
                    tick_entries: node.data.tick_entries.clone(),
                    recent_values: node.data.recent_values.clone(),
                    held_value: node.data.held_value,
                })
                .collect(),
            connections: self.connections.clone(),
            recent_ticks: self.recent_ticks.clone(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.node_index.get(id).map(|&i| &mut self.nodes[i])
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connection_index.get(id).map(|&i| &self.connections[i])
    }

    /// Connections that feed `node_id`, in connection-table order.
    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.target == node_id)
    }

    /// Connections that leave `node_id`, in connection-table order.
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.source == node_id)
    }

    /// Input sockets of a node, one per connected input port, in first-connection order.
    pub fn input_sockets<'a>(&'a self, node_id: &'a str) -> Vec<Socket<'a>> {
        group_sockets(node_id, self.incoming(node_id), |c| &c.target_input)
    }

    /// Output sockets of a node, one per connected output port, in first-connection order.
    pub fn output_sockets<'a>(&'a self, node_id: &'a str) -> Vec<Socket<'a>> {
        group_sockets(node_id, self.outgoing(node_id), |c| &c.source_output)
    }

    /// Connected input ports of a node and the existing node feeding each one.
    ///
    /// Ports appear in first-connection order; when several connections feed a port
    /// the last one with an existing source wins. Ports fed only by missing nodes are omitted.
    pub fn connected_inputs<'a>(&'a self, node_id: &'a str) -> Vec<(&'a str, &'a Node)> {
        self.input_sockets(node_id)
            .into_iter()
            .filter_map(|socket| {
                socket
                    .connections
                    .iter()
                    .rev()
                    .find_map(|c| self.node(&c.source))
                    .map(|source| (socket.port, source))
            })
            .collect()
    }

    pub fn recent_ticks(&self) -> &[String] {
        &self.recent_ticks
    }

    /// The most recently recorded tick.
    pub fn current_tick(&self) -> Option<&str> {
        self.recent_ticks.last().map(String::as_str)
    }

    /// A node's formatted value at the current tick.
    pub fn current_value(&self, node_id: &str) -> Option<&str> {
        let tick = self.current_tick()?;
        self.node(node_id)?.value_at(tick)
    }

    pub(crate) fn push_tick(&mut self, tick_id: &str) {
        self.recent_ticks.push(tick_id.to_string());
    }

    /// Drops all but the last `keep` ticks from the log and from every node's tick entries.
    pub(crate) fn retain_recent_ticks(&mut self, keep: usize) {
        if self.recent_ticks.len() <= keep {
            return;
        }
        let dropped: Vec<String> = self
            .recent_ticks
            .drain(..self.recent_ticks.len() - keep)
            .collect();
        for node in &mut self.nodes {
            for tick in &dropped {
                node.data.tick_entries.remove(tick);
            }
        }
    }
}

fn group_sockets<'a>(
    node_id: &'a str,
    connections: impl Iterator<Item = &'a Connection>,
    port_of: impl Fn(&'a Connection) -> &'a String,
) -> Vec<Socket<'a>> {
    let mut sockets: Vec<Socket<'a>> = Vec::new();
    for connection in connections {
        let port = port_of(connection).as_str();
        match sockets.iter_mut().find(|s| s.port == port) {
            Some(socket) => socket.connections.push(connection),
            None => sockets.push(Socket {
                node_id,
                port,
                connections: vec![connection],
            }),
        }
    }
    sockets
}
