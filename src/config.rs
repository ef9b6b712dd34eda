//! Drawing constants, overridable from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{cad::Point, error::ConfigError};

/// Names of the symbol definitions the drawing template provides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolNames {
    pub junction_termination: String,
    pub junction_termination_7_wire: String,
    pub field_device_termination: String,
    pub field_device_termination_7_wire: String,
    pub terminal: String,
    pub instrument: String,
}

impl Default for SymbolNames {
    fn default() -> Self {
        Self {
            junction_termination: "Junction Termination".to_owned(),
            junction_termination_7_wire: "Junction Termination (7 Wire)".to_owned(),
            field_device_termination: "Field Device Termination".to_owned(),
            field_device_termination_7_wire: "Field Device Termination (7 Wire)".to_owned(),
            terminal: "TBWIREMINI".to_owned(),
            instrument: "INST SYMBOL".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Insertion point of the first cable on the first table.
    pub origin: Point,
    /// Vertical distance between two terminal rows.
    pub terminal_pitch: f64,
    /// Horizontal distance from a junction termination to its field device termination.
    pub field_device_offset: f64,
    /// `Distance1` stretch applied to field device terminations.
    pub field_device_distance: f64,
    /// Horizontal distance from the first to the second terminal strip.
    pub second_table_offset: f64,
    /// Horizontal distance between boxes when every junction is built at once.
    pub box_spacing: f64,
    pub wire_layer: String,
    pub device_layer: String,
    pub symbols: SymbolNames,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(50.0, 0.0),
            terminal_pitch: 0.25,
            field_device_offset: 9.0,
            field_device_distance: 3.0,
            second_table_offset: 24.0,
            box_spacing: 100.0,
            wire_layer: "SKID WIRE DC".to_owned(),
            device_layer: "ELECTRICAL - LIGHT".to_owned(),
            symbols: SymbolNames::default(),
        }
    }
}

impl DrawingConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        Self::from_json_str(&json)
    }

    /// Whether `name` is one of the four termination symbols.
    pub fn is_termination(&self, name: &str) -> bool {
        self.is_junction_termination(name)
            || name == self.symbols.field_device_termination
            || name == self.symbols.field_device_termination_7_wire
    }

    pub fn is_junction_termination(&self, name: &str) -> bool {
        name == self.symbols.junction_termination
            || name == self.symbols.junction_termination_7_wire
    }

    pub fn is_seven_wire(&self, name: &str) -> bool {
        name == self.symbols.junction_termination_7_wire
            || name == self.symbols.field_device_termination_7_wire
    }
}
