use serde::{
    Serialize,
    Deserialize
};

/// Only the `name` field of a configuration entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn new(name: String) -> NamedJsonObject {
        NamedJsonObject { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
