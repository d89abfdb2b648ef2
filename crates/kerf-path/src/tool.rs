//! Cutting tool definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cutting tool shape descriptor.
///
/// Dimensions are in mm. The simulator models every tool as a solid of
/// revolution positioned with its tip at the motion segment's interpolated
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Tool {
    /// Flat end mill: a straight cylinder.
    Cylindrical {
        /// Tool radius in mm.
        radius: f64,
        /// Cutting length in mm.
        length: f64,
    },
    /// Conical cutter tapering to a point at the tip.
    Conical {
        /// Radius at the top of the taper in mm.
        radius: f64,
        /// Cutting length in mm.
        length: f64,
    },
    /// Ball end mill: hemispherical tip under a cylindrical shaft.
    Ballnose {
        /// Tool radius in mm.
        radius: f64,
        /// Shaft length in mm.
        length: f64,
    },
    /// Spheroid cutter: a sphere or axially stretched ellipsoid.
    Spheroid {
        /// Equatorial radius in mm.
        radius: f64,
        /// Axial length in mm; equal to the diameter for a true sphere.
        length: f64,
    },
    /// Snub-nose cutter: a frustum with a flat tip narrower than the top.
    Snubnose {
        /// Radius at the top of the frustum in mm.
        radius: f64,
        /// Radius of the flat tip in mm.
        snub_radius: f64,
        /// Cutting length in mm.
        length: f64,
    },
}

impl Tool {
    /// The tool's nominal (widest) cutting radius.
    pub fn radius(&self) -> f64 {
        match self {
            Tool::Cylindrical { radius, .. }
            | Tool::Conical { radius, .. }
            | Tool::Ballnose { radius, .. }
            | Tool::Spheroid { radius, .. }
            | Tool::Snubnose { radius, .. } => *radius,
        }
    }

    /// The tool's cutting length along its axis.
    pub fn length(&self) -> f64 {
        match self {
            Tool::Cylindrical { length, .. }
            | Tool::Conical { length, .. }
            | Tool::Ballnose { length, .. }
            | Tool::Spheroid { length, .. }
            | Tool::Snubnose { length, .. } => *length,
        }
    }
}

/// A numbered table of the tools a tool path refers to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolTable {
    tools: BTreeMap<u32, Tool>,
}

impl ToolTable {
    /// Create an empty tool table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the tool with the given number.
    pub fn set(&mut self, number: u32, tool: Tool) {
        self.tools.insert(number, tool);
    }

    /// Look up a tool by number.
    pub fn get(&self, number: u32) -> Option<&Tool> {
        self.tools.get(&number)
    }

    /// Number of tools in the table.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// True if the table holds no tools.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_accessors() {
        let tool = Tool::Snubnose {
            radius: 3.0,
            snub_radius: 1.0,
            length: 15.0,
        };
        assert!((tool.radius() - 3.0).abs() < 1e-12);
        assert!((tool.length() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_tool_serialization() {
        let tool = Tool::Ballnose {
            radius: 3.0,
            length: 20.0,
        };
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("Ballnose"));
        let parsed: Tool = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tool);
    }

    #[test]
    fn test_tool_table_lookup() {
        let mut table = ToolTable::new();
        table.set(1, Tool::Cylindrical { radius: 3.0, length: 20.0 });
        table.set(2, Tool::Conical { radius: 3.0, length: 10.0 });
        assert_eq!(table.len(), 2);
        assert!(table.get(1).is_some());
        assert!(table.get(99).is_none());
    }

    #[test]
    fn test_tool_table_serialization() {
        let mut table = ToolTable::new();
        table.set(5, Tool::Spheroid { radius: 2.0, length: 4.0 });
        let json = serde_json::to_string(&table).unwrap();
        let parsed: ToolTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get(5), table.get(5));
    }
}
