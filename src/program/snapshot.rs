//! JSON program snapshots.
//!
//! Nodes and connections are stored as objects keyed by id, in insertion order.
//! Node configuration lives flat inside `data` next to `type`, `tickEntries` and
//! `recentValues`, so unknown host fields survive a load/save cycle untouched.

use super::conversion::IntoProgram;
use super::definition::{Connection, NodeDefinition, Position, ProgramDefinition};
use super::history::{RecentValues, TickEntry};
use super::model::Program;
use crate::error::{ConversionError, ProgramError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "flexible_id::option")]
    pub id: Option<String>,
    #[serde(default, with = "ordered_map")]
    pub nodes: Vec<(String, NodeSnapshot)>,
    #[serde(default, with = "ordered_map")]
    pub connections: Vec<(String, ConnectionSnapshot)>,
    #[serde(default)]
    pub recent_ticks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "flexible_id::option")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub data: NodeDataSnapshot,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDataSnapshot {
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_display_name: Option<String>,
    #[serde(flatten)]
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tick_entries: BTreeMap<String, TickEntry>,
    #[serde(default, skip_serializing_if = "RecentValues::is_empty")]
    pub recent_values: RecentValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub held_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "flexible_id::option")]
    pub id: Option<String>,
    #[serde(with = "flexible_id")]
    pub source: String,
    pub source_output: String,
    #[serde(with = "flexible_id")]
    pub target: String,
    pub target_input: String,
}

impl ProgramSnapshot {
    pub fn from_json(json: &str) -> Result<Self, ProgramError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProgramError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ProgramError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ProgramError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ProgramError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_pretty()?).map_err(|source| ProgramError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Captures the current state of a loaded program, history included.
    pub fn from_program(program: &Program) -> Self {
        program.to_definition().into()
    }
}

impl IntoProgram for ProgramSnapshot {
    fn into_program(self) -> Result<ProgramDefinition, ConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|(key, node)| {
                let id = node.id.unwrap_or_else(|| key.clone());
                if id != key {
                    return Err(ConversionError::ValidationError(format!(
                        "node keyed '{}' declares id '{}'",
                        key, id
                    )));
                }
                if node.data.type_name.is_empty() {
                    return Err(ConversionError::ValidationError(format!(
                        "node '{}' has no type",
                        id
                    )));
                }
                Ok(NodeDefinition {
                    id,
                    type_name: node.data.type_name,
                    name: node.name,
                    ordered_display_name: node.data.ordered_display_name,
                    position: Position {
                        x: node.x,
                        y: node.y,
                    },
                    properties: node.data.properties,
                    tick_entries: node.data.tick_entries,
                    recent_values: node.data.recent_values,
                    held_value: node.data.held_value,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let connections = self
            .connections
            .into_iter()
            .map(|(key, c)| Connection {
                id: c.id.unwrap_or(key),
                source: c.source,
                source_output: c.source_output,
                target: c.target,
                target_input: c.target_input,
            })
            .collect();

        Ok(ProgramDefinition {
            id: self.id,
            nodes,
            connections,
            recent_ticks: self.recent_ticks,
        })
    }
}

impl From<ProgramDefinition> for ProgramSnapshot {
    fn from(definition: ProgramDefinition) -> Self {
        ProgramSnapshot {
            id: definition.id,
            nodes: definition
                .nodes
                .into_iter()
                .map(|node| {
                    let snapshot = NodeSnapshot {
                        id: Some(node.id.clone()),
                        name: node.name,
                        x: node.position.x,
                        y: node.position.y,
                        data: NodeDataSnapshot {
                            type_name: node.type_name,
                            ordered_display_name: node.ordered_display_name,
                            properties: node.properties,
                            tick_entries: node.tick_entries,
                            recent_values: node.recent_values,
                            held_value: node.held_value,
                        },
                    };
                    (node.id, snapshot)
                })
                .collect(),
            connections: definition
                .connections
                .into_iter()
                .map(|c| {
                    let snapshot = ConnectionSnapshot {
                        id: Some(c.id.clone()),
                        source: c.source,
                        source_output: c.source_output,
                        target: c.target,
                        target_input: c.target_input,
                    };
                    (c.id, snapshot)
                })
                .collect(),
            recent_ticks: definition.recent_ticks,
        }
    }
}

/// An id-keyed JSON object read into, and written from, an ordered list of entries.
mod ordered_map {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;
    use std::marker::PhantomData;

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S, T>(entries: &Vec<(String, T)>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        deserializer.deserialize_any(EntriesVisitor(PhantomData))
    }

    struct EntriesVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
        type Value = Vec<(String, T)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object keyed by id")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, T>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }
}

/// Ids arrive as strings or bare numbers depending on the host; both are kept as text.
mod flexible_id {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        from_value(Value::deserialize(deserializer)?).map_err(D::Error::custom)
    }

    fn from_value(value: Value) -> Result<String, String> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(format!("expected a string or numeric id, found {}", other)),
        }
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            id: &Option<String>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match id {
                Some(id) => serializer.serialize_some(id),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<String>, D::Error> {
            match Value::deserialize(deserializer)? {
                Value::Null => Ok(None),
                other => from_value(other).map(Some).map_err(D::Error::custom),
            }
        }
    }
}
