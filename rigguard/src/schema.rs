//! Build model: component categories, component records and the build map.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Component slot in a build. A build holds at most one component per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Case,
    Motherboard,
    Processor,
    Memory,
    GraphicsCard,
    PowerSupply,
    Cooler,
    SolidStateDrive,
    HardDiskDrive,
    Monitor,
    Keyboard,
    Mouse,
    Headset,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Case,
        Category::Motherboard,
        Category::Processor,
        Category::Memory,
        Category::GraphicsCard,
        Category::PowerSupply,
        Category::Cooler,
        Category::SolidStateDrive,
        Category::HardDiskDrive,
        Category::Monitor,
        Category::Keyboard,
        Category::Mouse,
        Category::Headset,
    ];

    /// Human-readable name. Rule messages refer to categories by this name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Case => "Case",
            Category::Motherboard => "Motherboard",
            Category::Processor => "Processor",
            Category::Memory => "Memory",
            Category::GraphicsCard => "Graphics Card",
            Category::PowerSupply => "Power Supply",
            Category::Cooler => "Cooler",
            Category::SolidStateDrive => "SSD",
            Category::HardDiskDrive => "HDD",
            Category::Monitor => "Monitor",
            Category::Keyboard => "Keyboard",
            Category::Mouse => "Mouse",
            Category::Headset => "Headset",
        }
    }

    /// Kebab-case key used in build files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Case => "case",
            Category::Motherboard => "motherboard",
            Category::Processor => "processor",
            Category::Memory => "memory",
            Category::GraphicsCard => "graphics-card",
            Category::PowerSupply => "power-supply",
            Category::Cooler => "cooler",
            Category::SolidStateDrive => "solid-state-drive",
            Category::HardDiskDrive => "hard-disk-drive",
            Category::Monitor => "monitor",
            Category::Keyboard => "keyboard",
            Category::Mouse => "mouse",
            Category::Headset => "headset",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.key() == wanted || c.display_name().to_lowercase() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A catalog part as materialized by the caller.
///
/// Only compatibility-relevant attributes are modeled; every attribute is
/// optional and a rule only fires when both sides of a comparison are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    /// CPU / motherboard socket, e.g. `AM5`, `LGA1700`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    /// Memory / motherboard memory generation, e.g. `DDR5`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<String>,
    /// Motherboard or case form factor, e.g. `Micro-ATX`, `ATX Mid Tower`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    /// Graphics card length.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub length_mm: Option<f64>,
    /// Case clearance for graphics cards.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max_gpu_length_mm: Option<f64>,
    /// Case clearance for CPU coolers.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max_cooler_height_mm: Option<f64>,
    /// Cooler height.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub height_mm: Option<f64>,
    /// Power supply rated output.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub wattage: Option<u32>,
    /// Thermal design power (processor, graphics card).
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tdp: Option<u32>,
}

/// Accept any JSON value for an optional attribute. Values of the wrong type
/// (`"650W"` for a wattage, `220.5` for a TDP) become unspecified so the rules
/// that need them are skipped instead of the whole build being rejected.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::warn!("Ignoring malformed component attribute {}: {}", value, e);
            Ok(None)
        }
    }
}

impl Component {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.socket = Some(socket.into());
        self
    }

    pub fn with_memory_type(mut self, memory_type: impl Into<String>) -> Self {
        self.memory_type = Some(memory_type.into());
        self
    }

    pub fn with_form_factor(mut self, form_factor: impl Into<String>) -> Self {
        self.form_factor = Some(form_factor.into());
        self
    }

    pub fn with_length_mm(mut self, length: f64) -> Self {
        self.length_mm = Some(length);
        self
    }

    pub fn with_max_gpu_length_mm(mut self, length: f64) -> Self {
        self.max_gpu_length_mm = Some(length);
        self
    }

    pub fn with_max_cooler_height_mm(mut self, height: f64) -> Self {
        self.max_cooler_height_mm = Some(height);
        self
    }

    pub fn with_height_mm(mut self, height: f64) -> Self {
        self.height_mm = Some(height);
        self
    }

    pub fn with_wattage(mut self, wattage: u32) -> Self {
        self.wattage = Some(wattage);
        self
    }

    pub fn with_tdp(mut self, tdp: u32) -> Self {
        self.tdp = Some(tdp);
        self
    }
}

/// The shopper's current selection: at most one component per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Build {
    parts: BTreeMap<Category, Component>,
}

impl Build {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<&Component> {
        self.parts.get(&category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.parts.contains_key(&category)
    }

    /// Select `component` for `category`, returning the previous selection.
    pub fn insert(&mut self, category: Category, component: Component) -> Option<Component> {
        self.parts.insert(category, component)
    }

    pub fn remove(&mut self, category: Category) -> Option<Component> {
        self.parts.remove(&category)
    }

    /// Builder-style [`Build::insert`].
    pub fn with(mut self, category: Category, component: Component) -> Self {
        self.parts.insert(category, component);
        self
    }

    /// Copy of this build with `candidate` in `category`. `self` is left untouched.
    pub fn overlay(&self, category: Category, candidate: &Component) -> Build {
        let mut derived = self.clone();
        derived.parts.insert(category, candidate.clone());
        derived
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &Component)> {
        self.parts.iter().map(|(c, p)| (*c, p))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl FromIterator<(Category, Component)> for Build {
    fn from_iter<I: IntoIterator<Item = (Category, Component)>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}
