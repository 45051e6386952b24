use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::VecDeque;
use std::fmt;

/// Number of recent samples kept per node for plotting.
pub const MAX_NODE_VALUES: usize = 16;

/// The value a node recorded at one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_value: Option<String>,
    /// Editor disclosure state, kept only so snapshots round-trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
}

impl TickEntry {
    pub fn new(node_value: impl Into<String>) -> Self {
        Self {
            node_value: Some(node_value.into()),
            open: None,
        }
    }
}

/// Fixed-capacity FIFO of a node's most recent numeric samples, most recent last.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentValues {
    capacity: usize,
    values: VecDeque<f64>,
}

impl Default for RecentValues {
    fn default() -> Self {
        Self::with_capacity(MAX_NODE_VALUES)
    }
}

impl RecentValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a sample, returning the evicted oldest sample once the buffer is full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.values.len() >= self.capacity {
            self.values.pop_front()
        } else {
            None
        };
        self.values.push_back(value);
        evicted
    }

    /// Changes the capacity, dropping the oldest samples that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Samples as `[index, value]` pairs for a charting collaborator.
    pub fn as_plot_points(&self) -> Vec<[f64; 2]> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| [i as f64, *v])
            .collect()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

// Collected buffers keep every sample; the engine trims them to its configured capacity on load.
impl FromIterator<f64> for RecentValues {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let values: VecDeque<f64> = iter.into_iter().collect();
        Self {
            capacity: values.len().max(MAX_NODE_VALUES),
            values,
        }
    }
}

// Non-finite samples are stored as `null`, which is how JSON hosts persist NaN.
impl Serialize for RecentValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
        for v in &self.values {
            if v.is_finite() {
                seq.serialize_element(&Some(*v))?;
            } else {
                seq.serialize_element(&None::<f64>)?;
            }
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RecentValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecentValuesVisitor)
    }
}

struct RecentValuesVisitor;

impl<'de> Visitor<'de> for RecentValuesVisitor {
    type Value = RecentValues;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of numbers, or a map with a `nodeValue` list")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RecentValues, A::Error> {
        let mut samples = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(v) = seq.next_element::<Option<f64>>()? {
            samples.push(v.unwrap_or(f64::NAN));
        }
        Ok(samples.into_iter().collect())
    }

    // Older snapshots keyed the samples by watched property.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RecentValues, A::Error> {
        let mut values = RecentValues::new();
        while let Some(key) = map.next_key::<String>()? {
            if key == "nodeValue" {
                let samples: Vec<Option<f64>> = map.next_value()?;
                values = samples
                    .into_iter()
                    .map(|v| v.unwrap_or(f64::NAN))
                    .collect();
            } else {
                map.next_value::<serde::de::IgnoredAny>()?;
            }
        }
        Ok(values)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<RecentValues, E> {
        Ok(RecentValues::new())
    }
}
