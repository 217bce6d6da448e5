//! Label enumeration configuration.
//!
//! The zone, actor, and event vocabularies are external data supplied as a
//! JSON document (`labels.json` by default), never hard-coded here. The
//! token builder validates every selection field against these sets.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The three label vocabularies used to build annotation tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    pub zones: Vec<String>,
    pub actors: Vec<String>,
    pub events: Vec<String>,
}

impl LabelConfig {
    /// Parse a label configuration from a JSON document.
    ///
    /// The document must have `zones`, `actors`, and `events` arrays, and
    /// none of them may be empty.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: LabelConfig = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("invalid label config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every vocabulary is non-empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, set) in [
            ("zones", &self.zones),
            ("actors", &self.actors),
            ("events", &self.events),
        ] {
            if set.is_empty() {
                return Err(CoreError::Validation(format!(
                    "label config has no {name}"
                )));
            }
        }
        Ok(())
    }

    pub fn has_zone(&self, zone: &str) -> bool {
        self.zones.iter().any(|z| z == zone)
    }

    pub fn has_actor(&self, actor: &str) -> bool {
        self.actors.iter().any(|a| a == actor)
    }

    pub fn has_event(&self, event: &str) -> bool {
        self.events.iter().any(|e| e == event)
    }
}
