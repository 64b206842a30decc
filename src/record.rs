//! JSON persistence for a named list of numbers
//!
//! Backs the `record` command, which writes a record to disk and reads it back.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A name with an ordered list of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRecord {
    pub name: String,
    pub items: Vec<u32>,
}

impl NamedRecord {
    pub fn new(name: impl Into<String>, items: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Build a record of `count` distinct values drawn from `0..upper`
    pub fn sample(name: impl Into<String>, count: usize, upper: u32) -> Result<Self> {
        if count > upper as usize {
            anyhow::bail!("Cannot draw {} distinct values from 0..{}", count, upper);
        }
        let mut rng = rand::thread_rng();
        let items = rand::seq::index::sample(&mut rng, upper as usize, count)
            .into_iter()
            .map(|i| i as u32)
            .collect();
        Ok(Self::new(name, items))
    }

    /// One-line summary for display
    pub fn describe(&self) -> String {
        format!("name is {}, items are {:?}", self.name, self.items)
    }

    /// Write the record as pretty-printed JSON
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize record")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write record file {}", path.display()))?;
        Ok(())
    }

    /// Read a record written by [`save_json`](Self::save_json)
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse record file {}", path.display()))
    }
}
