//! Nested output records and the dot-path writer.

use crate::cell::Scalar;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A value stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A normalized row value, encoded at serialization time.
    Scalar(Scalar),
    /// A constant taken verbatim from the configuration.
    Json(serde_json::Value),
    Object(Record),
}

/// A nested output object. Keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(IndexMap<String, Node>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, node: Node) {
        self.0.insert(key.into(), node);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.0.iter()
    }

    /// Writes `value` at a dot-separated `path`, creating intermediate objects.
    ///
    /// Intermediate keys holding a non-object value are overwritten with an
    /// empty object; the leaf is always overwritten. Sibling paths sharing a
    /// prefix reuse the same intermediate object.
    pub fn set_deep(&mut self, path: &str, value: Node) {
        let Some((head, rest)) = path.split_once('.') else {
            self.insert(path, value);
            return;
        };
        let slot = self
            .0
            .entry(head.to_string())
            .or_insert_with(|| Node::Object(Record::new()));
        match slot {
            Node::Object(obj) => obj.set_deep(rest, value),
            other => {
                let mut obj = Record::new();
                obj.set_deep(rest, value);
                *other = Node::Object(obj);
            }
        }
    }

    /// Merges `entries` into the object at `key`, keeping keys already there
    /// unless `entries` overwrites them. A non-object at `key` is replaced.
    pub fn merge_object(&mut self, key: &str, entries: Record) {
        let slot = self
            .0
            .entry(key.to_string())
            .or_insert_with(|| Node::Object(Record::new()));
        match slot {
            Node::Object(target) => target.0.extend(entries.0),
            other => *other = Node::Object(entries),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(s) => s.serialize(serializer),
            Node::Json(v) => v.serialize(serializer),
            Node::Object(obj) => obj.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
