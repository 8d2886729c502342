//! Caller-owned class definitions and the lookup table built from them.

use std::collections::HashMap;

use heliobox_raster::Color;
use serde::{Deserialize, Serialize};

/// A class a box can be labelled with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Unique key, also shown in the box label
    pub name: String,
    /// Stroke and label color
    pub color: Color,
}

impl ClassDefinition {
    pub fn new(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }
}

/// Read-only name -> definition map, built once and handed to the renderer.
///
/// Iteration follows the order the definitions were supplied in.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    definitions: Vec<ClassDefinition>,
    index: HashMap<String, usize>,
}

impl ClassTable {
    /// Build a table; a repeated name keeps its first definition.
    pub fn new(definitions: impl IntoIterator<Item = ClassDefinition>) -> Self {
        let mut table = Self::default();
        for def in definitions {
            if table.index.contains_key(&def.name) {
                log::warn!("Duplicate class '{}' ignored", def.name);
                continue;
            }
            table.index.insert(def.name.clone(), table.definitions.len());
            table.definitions.push(def);
        }
        table
    }

    /// McIntosh sunspot group classes used by the detection model.
    pub fn sunspot_default() -> Self {
        Self::new([
            ClassDefinition::new("A", Color::rgb(34, 197, 94)),
            ClassDefinition::new("B", Color::rgb(59, 130, 246)),
            ClassDefinition::new("C", Color::rgb(234, 179, 8)),
            ClassDefinition::new("D", Color::rgb(249, 115, 22)),
            ClassDefinition::new("E", Color::rgb(239, 68, 68)),
            ClassDefinition::new("F", Color::rgb(168, 85, 247)),
            ClassDefinition::new("H", Color::rgb(6, 182, 212)),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&ClassDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Color for `name`, or `fallback` when the class is not defined.
    pub fn color_or(&self, name: &str, fallback: Color) -> Color {
        self.get(name).map_or(fallback, |def| def.color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
