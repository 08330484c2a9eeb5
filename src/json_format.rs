/*
Implements:
 - procedures to read and write instances in the JSON format
 - conversion from a JSON instance to a k-MST instance
*/
use std::fs;

use serde::{Serialize, Deserialize};

use crate::error::KmstError;
use crate::kmst::{Edge, Instance};

/** data structure to represent a JSON instance (the tree size k is given separately) */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonInstance {
    /// number of nodes
    pub n: usize,
    /// edges of the graph
    pub edges: Vec<Edge>,
}

impl JsonInstance {
    /** reads a JSON instance from a file. */
    pub fn from_file(filename:&str) -> Result<Self, KmstError> {
        let str = fs::read_to_string(filename)
            .map_err(|source| KmstError::Io { filename: filename.to_string(), source })?;
        Self::from_str(&str)
    }

    /** reads a JSON instance from a string. */
    pub fn from_str(s:&str) -> Result<Self, KmstError> {
        Ok(serde_json::from_str(s)?)
    }

    /** writes the instance into a file */
    pub fn write_to_file(&self, filename:&str) -> Result<(), KmstError> {
        let s = serde_json::to_string(self)?;
        fs::write(filename, s)
            .map_err(|source| KmstError::Io { filename: filename.to_string(), source })
    }

    /** converts to a k-MST instance (checks the instance). */
    pub fn to_kmst_instance(&self, k:usize) -> Result<Instance, KmstError> {
        Instance::new(self.n, k, self.edges.clone())
    }
}
