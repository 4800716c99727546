//! Runtime configuration for Wayfinder.
//!
//! The graph (ordered location list plus the distance table) and the run
//! settings load from a TOML file, from environment variables, or fall
//! back to the built-in sample graph.

use eyre::Result;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::graph::Cost;

// ============================================
// MAIN CONFIGURATION
// ============================================

/// Main configuration for a Wayfinder run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ordered location names; fixes the k/i/j iteration order
    pub locations: Vec<String>,

    /// Append every relaxation to a JSON-lines event log
    #[serde(default)]
    pub event_log: bool,

    /// Path of the event log file
    #[serde(default = "default_event_log_path")]
    pub event_log_path: String,

    /// Distance table: for every source location, the cost to every
    /// location (itself included, at cost 0). "No known path" entries
    /// carry a large sentinel cost rather than being omitted.
    pub distances: HashMap<String, HashMap<String, Cost>>,
}

fn default_event_log_path() -> String {
    "./logs/relaxations.log".to_string()
}

lazy_static! {
    /// The built-in five-location demonstration graph. A cost of 100 is
    /// the sentinel for "no known direct path" at this scale.
    static ref SAMPLE: Config = {
        let rows: [(&str, &[(&str, Cost)]); 5] = [
            ("a", &[("a", 0), ("b", 3), ("c", 1), ("d", 10), ("e", 100)]),
            ("b", &[("b", 0), ("a", 3), ("c", 2), ("d", 3), ("e", 100)]),
            ("c", &[("c", 0), ("a", 1), ("b", 2), ("d", 4), ("e", 1)]),
            ("d", &[("d", 0), ("a", 10), ("b", 3), ("c", 4), ("e", 1)]),
            ("e", &[("e", 0), ("a", 100), ("b", 100), ("c", 1), ("d", 1)]),
        ];

        let mut distances = HashMap::new();
        for (from, costs) in rows {
            distances.insert(
                from.to_string(),
                costs.iter().map(|(to, c)| (to.to_string(), *c)).collect(),
            );
        }

        Config {
            locations: rows.iter().map(|(name, _)| name.to_string()).collect(),
            event_log: false,
            event_log_path: default_event_log_path(),
            distances,
        }
    };
}

impl Config {
    /// The built-in sample graph
    pub fn sample() -> Self {
        SAMPLE.clone()
    }

    /// Load configuration from environment variables and .env file.
    ///
    /// `WAYFINDER_GRAPH` names a TOML graph file; unset means the
    /// built-in sample graph.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match env::var("WAYFINDER_GRAPH") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::sample(),
        };

        if let Ok(flag) = env::var("WAYFINDER_EVENT_LOG") {
            config.event_log = flag.parse().unwrap_or(config.event_log);
        }
        if let Ok(path) = env::var("WAYFINDER_EVENT_LOG_PATH") {
            config.event_log_path = path;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate the run settings. Table consistency (every pair present,
    /// zero self-distances) is checked when the distance matrix is built.
    pub fn validate(&self) -> Result<()> {
        if self.locations.is_empty() {
            return Err(eyre::eyre!("graph has no locations"));
        }
        if self.event_log && self.event_log_path.is_empty() {
            return Err(eyre::eyre!(
                "event_log is enabled but event_log_path is empty"
            ));
        }
        Ok(())
    }

    /// Print a configuration summary to stderr
    pub fn print_summary(&self) {
        let rule = "═".repeat(46);
        eprintln!("╔{}╗", rule);
        eprintln!("║ {:^44} ║", "WAYFINDER - CONFIGURATION");
        eprintln!("╠{}╣", rule);
        eprintln!("║ {:<14}{:>30} ║", "Locations:", self.locations.len());
        eprintln!(
            "║ {:<14}{:>30} ║",
            "Pairs:",
            self.locations.len() * self.locations.len()
        );
        eprintln!(
            "║ {:<14}{:>30} ║",
            "Event Log:",
            if self.event_log {
                "✓ Enabled"
            } else {
                "✗ Disabled"
            }
        );
        eprintln!("╚{}╝", rule);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::sample()
    }
}

// ============================================
// RELAXATION LOG
// ============================================

use chrono::{DateTime, Utc};
use std::io::Write;

/// One relaxation step, as appended to the JSON-lines event log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaxationLog {
    pub timestamp: DateTime<Utc>,
    pub from: String,
    pub to: String,
    pub via: String,
    pub new_cost: Cost,
    pub old_cost: Cost,
}

impl RelaxationLog {
    /// Append this record to a file
    pub fn append_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        let json = serde_json::to_string(self)?;
        writeln!(file, "{}", json)?;

        Ok(())
    }
}

// ============================================
// TESTS
// ============================================
