//! Cassette data structures for recording and replaying interactions.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (currently always `"llm"`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Model the narration service was asked to use while recording.
    pub model: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Read and parse a YAML cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_parses_hand_written_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narration.cassette.yaml");
        std::fs::write(
            &path,
            r##"name: hand-written
recorded_at: 2025-03-15T14:30:00Z
model: llama-3.2-1b-preview
interactions:
  - seq: 0
    port: llm
    method: complete
    input: {}
    output:
      ok:
        text: "# Module overview"
"##,
        )
        .unwrap();

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "hand-written");
        assert_eq!(cassette.model, "llama-3.2-1b-preview");
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].output["ok"]["text"], "# Module overview");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Cassette::load(Path::new("/nonexistent/none.yaml")).unwrap_err();
        assert!(err.contains("Failed to read cassette file"));
    }
}
