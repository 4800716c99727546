//! Distance matrix construction and access.
//!
//! Locations are interned to dense indices once, in configured order; the
//! costs live in a row-major `Vec` so the relaxation loop does plain
//! indexed reads instead of repeated map lookups. Building the matrix
//! checks the table up front, which keeps every later access infallible.

use std::collections::HashMap;
use thiserror::Error;

/// Path cost between two locations. Additions saturate so a large
/// "no known path" sentinel cannot wrap.
pub type Cost = i64;

/// A malformed location list or distance table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("duplicate location {name:?} in the location list")]
    DuplicateLocation { name: String },

    #[error("distance table references unknown location {name:?}")]
    UnknownLocation { name: String },

    #[error("missing distance entry for {from:?} -> {to:?}")]
    MissingDistance { from: String, to: String },

    #[error("self-distance for {name:?} must be 0, found {found}")]
    NonZeroSelfDistance { name: String, found: Cost },
}

/// All-pairs distance table over interned locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    locations: Vec<String>,
    index: HashMap<String, usize>,
    costs: Vec<Cost>,
}

impl DistanceMatrix {
    /// Build a matrix from an ordered location list and a per-source
    /// distance table. Every ordered pair must have an entry and every
    /// location must map to itself at cost 0. Negative costs are
    /// accepted; negative cycles are not detected.
    pub fn from_table(
        locations: &[String],
        distances: &HashMap<String, HashMap<String, Cost>>,
    ) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(locations.len());
        for (i, name) in locations.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(GraphError::DuplicateLocation { name: name.clone() });
            }
        }

        // Reject rows or columns naming locations outside the list. Keys
        // are sorted so the reported location is deterministic.
        let mut row_names: Vec<&String> = distances.keys().collect();
        row_names.sort();
        for row in row_names {
            if !index.contains_key(row) {
                return Err(GraphError::UnknownLocation { name: row.clone() });
            }
            let mut col_names: Vec<&String> = distances[row].keys().collect();
            col_names.sort();
            for col in col_names {
                if !index.contains_key(col) {
                    return Err(GraphError::UnknownLocation { name: col.clone() });
                }
            }
        }

        let n = locations.len();
        let mut costs = vec![0; n * n];
        for (i, from) in locations.iter().enumerate() {
            let row = distances.get(from);
            for (j, to) in locations.iter().enumerate() {
                let cost = row.and_then(|r| r.get(to)).copied().ok_or_else(|| {
                    GraphError::MissingDistance {
                        from: from.clone(),
                        to: to.clone(),
                    }
                })?;
                if i == j && cost != 0 {
                    return Err(GraphError::NonZeroSelfDistance {
                        name: from.clone(),
                        found: cost,
                    });
                }
                costs[i * n + j] = cost;
            }
        }

        Ok(Self {
            locations: locations.to_vec(),
            index,
            costs,
        })
    }

    /// Number of locations
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Location names in iteration order
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Name of the location at a dense index
    pub fn location(&self, idx: usize) -> &str {
        &self.locations[idx]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Current best-known cost from one location to another
    pub fn get(&self, from: usize, to: usize) -> Cost {
        self.costs[from * self.locations.len() + to]
    }

    pub fn set(&mut self, from: usize, to: usize, cost: Cost) {
        let n = self.locations.len();
        self.costs[from * n + to] = cost;
    }

    /// Lookup by name, for display and tests
    pub fn get_by_name(&self, from: &str, to: &str) -> Option<Cost> {
        Some(self.get(self.index_of(from)?, self.index_of(to)?))
    }

    /// Render the table with aligned columns, for diagnostics
    pub fn render(&self) -> String {
        let width = self
            .costs
            .iter()
            .map(|c| c.to_string().len())
            .chain(self.locations.iter().map(|name| name.len()))
            .max()
            .unwrap_or(1)
            + 2;

        let mut out = String::new();
        out.push_str(&" ".repeat(width));
        for name in &self.locations {
            out.push_str(&format!("{:>width$}", name));
        }
        out.push('\n');

        for (i, name) in self.locations.iter().enumerate() {
            out.push_str(&format!("{:<width$}", name));
            for j in 0..self.locations.len() {
                out.push_str(&format!("{:>width$}", self.get(i, j)));
            }
            out.push('\n');
        }

        out
    }
}

// ============================================
// TESTS
// ============================================
