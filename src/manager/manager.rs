use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

use super::managererror::{ManagerError, parse_json_value};
use super::namedobject::NamedJsonObject;

/// Named objects built from JSON entries of the form `{"name": ..., ...}`.
pub struct Manager<V> {
    map: HashMap<String, V>,
    get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>
}

impl <V> Manager<V> where
    V: Clone {
    pub fn new(get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>) -> Manager<V> {
        Manager { map: HashMap::new(), get_obj_from_json }
    }

    pub fn get(&self, name: &str) -> Result<V, ManagerError> {
        self.map
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::NameNotFoundError(name.to_owned()))
    }

    pub fn insert(&mut self, name: String, v: V) -> Option<V> {
        self.map.insert(name, v)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn insert_obj_from_json(&mut self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let named_object: NamedJsonObject = parse_json_value(json_value.clone())?;
        let v = (self.get_obj_from_json)(json_value)?;
        info!("loaded '{}'", named_object.name());
        self.insert(named_object.name().to_owned(), v);
        Ok(())
    }

    pub fn insert_obj_from_json_vec(&mut self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for j in json_vec.iter() {
            self.insert_obj_from_json(j.clone())?;
        }
        Ok(())
    }

    /// Loads either a single JSON object or an array of them.
    pub fn from_reader(&mut self, file_path: impl AsRef<Path>) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = parse_json_value(json_value)?;
            self.insert_obj_from_json_vec(&json_array)
        } else {
            self.insert_obj_from_json(json_value)
        }
    }
}
