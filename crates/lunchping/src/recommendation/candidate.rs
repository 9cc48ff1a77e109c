use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anything that can be offered as a random pick. Only identity matters to
/// the sampler; payloads are carried through untouched.
pub trait Candidate {
    fn candidate_id(&self) -> &str;
}

impl<C: Candidate + ?Sized> Candidate for &C {
    fn candidate_id(&self) -> &str {
        (**self).candidate_id()
    }
}

/// Wire-level candidate: a stable id plus whatever fields the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub id: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl PoolEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Display name when the payload carries one.
    pub fn name(&self) -> Option<&str> {
        self.payload.get("name").and_then(Value::as_str)
    }
}

impl Candidate for PoolEntry {
    fn candidate_id(&self) -> &str {
        &self.id
    }
}
