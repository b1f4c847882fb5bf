//! Built-in EQ Presets
//!
//! Presets map band-id strings to gains. They may be authored against a
//! different (often denser) grid than the active layout; see `resolver`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Id of the all-zero preset, also reported after a reset
pub const FLAT_PRESET_ID: &str = "flat";

/// Grid the built-in presets are authored against
const GRID: [&str; 10] = [
    "band-32", "band-64", "band-125", "band-250", "band-500", "band-1k", "band-2k", "band-4k",
    "band-8k", "band-16k",
];

/// (id, name, category, gains on `GRID`)
type BuiltinPreset = (&'static str, &'static str, PresetCategory, [f32; 10]);

const BUILTIN: &[BuiltinPreset] = &[
    ("pop", "Pop", PresetCategory::Genre, [3.0, 2.5, 1.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 4.0]),
    ("vocal-boost", "Vocal Boost", PresetCategory::Voice, [-2.0, -2.0, -1.0, 0.0, 1.0, 3.0, 4.0, 3.0, 1.0, 0.0]),
    ("bass-boost", "Bass Boost", PresetCategory::Custom, [6.0, 5.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("treble-boost", "Treble Boost", PresetCategory::Custom, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 4.0, 6.0, 6.0]),
    ("loudness", "Loudness", PresetCategory::Custom, [6.0, 6.0, 4.0, 1.0, -2.0, -3.0, -2.0, 4.0, 5.0, 5.0]),
    ("rock", "Rock", PresetCategory::Genre, [5.0, 4.5, 3.0, -1.0, -2.0, -1.0, 2.0, 3.5, 4.0, 4.5]),
    ("jazz", "Jazz", PresetCategory::Genre, [3.0, 2.0, 0.0, -2.0, -1.0, 1.0, 3.0, 3.0, 2.0, 1.0]),
    ("electronic", "Electronic", PresetCategory::Genre, [7.0, 6.0, 4.0, 0.0, -2.0, 0.0, 2.0, 4.0, 5.0, 6.0]),
    ("classical", "Classical", PresetCategory::Genre, [0.0, 0.0, 0.0, -1.0, -1.0, 0.0, 1.0, 2.0, 3.0, 2.0]),
    ("vocal-male", "Male Vocal", PresetCategory::Voice, [-3.0, -2.0, 2.0, 3.0, 1.0, 0.0, 2.0, 3.0, 2.0, 0.0]),
    ("vocal-female", "Female Vocal", PresetCategory::Voice, [-4.0, -3.0, -1.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0]),
    ("podcast", "Podcast", PresetCategory::Voice, [-6.0, -4.0, 0.0, 2.0, 3.0, 2.0, 3.0, 4.0, 2.0, -2.0]),
    ("acoustic-guitar", "Acoustic Guitar", PresetCategory::Instrument, [-4.0, -2.0, 1.0, 2.0, 1.0, 0.0, 2.0, 3.0, 4.0, 3.0]),
    ("piano", "Piano", PresetCategory::Instrument, [0.0, 1.0, 1.0, 0.0, -1.0, 1.0, 2.0, 3.0, 2.0, 1.0]),
    ("small-room", "Small Room", PresetCategory::Custom, [-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 1.0, 2.0, 2.0, 1.0]),
    ("headphones", "Headphones", PresetCategory::Custom, [2.0, 1.0, 0.0, -1.0, -1.0, 0.0, 1.0, 2.0, 3.0, 2.0]),
];

/// Grouping shown in preset pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Music,
    Voice,
    Instrument,
    Custom,
    Genre,
}

/// Named gain map
///
/// `bands` keeps authoring order; the resolver relies on it to break
/// equidistant-frequency ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub category: PresetCategory,
    #[serde(default)]
    pub bands: IndexMap<String, f32>,
}

impl Preset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: PresetCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            bands: IndexMap::new(),
        }
    }

    /// Builder-style gain entry
    pub fn with_gain(mut self, key: impl Into<String>, gain: f32) -> Self {
        self.bands.insert(key.into(), gain);
        self
    }

    /// The all-zero preset. Empty map: every band resolves to 0 dB.
    pub fn flat() -> Self {
        Self::new(FLAT_PRESET_ID, "Flat", PresetCategory::Music)
    }
}

/// Lowercase and collapse whitespace runs into `-`
///
/// Native engines report preset names ("Bass Boost"); this maps them onto
/// the same shape as catalog ids ("bass-boost").
pub fn normalize_preset_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Ordered, id-unique collection of presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetCatalog {
    /// Catalog with no presets
    pub fn empty() -> Self {
        Self { presets: Vec::new() }
    }

    /// The presets shipped with the equaliser
    pub fn builtin() -> Self {
        let mut presets: Vec<Preset> = BUILTIN
            .iter()
            .map(|&(id, name, category, gains)| {
                // Rust pattern: zip the static grid with the gain row to build the map
                let bands = GRID
                    .iter()
                    .zip(gains)
                    .map(|(key, gain)| (key.to_string(), gain))
                    .collect();
                Preset {
                    id: id.to_string(),
                    name: name.to_string(),
                    category,
                    bands,
                }
            })
            .collect();

        // Flat sits after the genre/boost group, matching the product's picker order
        presets.insert(5, Preset::flat());
        Self { presets }
    }

    /// Look up a preset by id
    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Look up a preset whose normalized name matches `name`
    pub fn find_by_name(&self, name: &str) -> Option<&Preset> {
        let wanted = normalize_preset_name(name);
        self.presets
            .iter()
            .find(|p| normalize_preset_name(&p.name) == wanted)
    }

    /// Add a preset, replacing any existing preset with the same id in place
    pub fn insert(&mut self, preset: Preset) {
        match self.presets.iter_mut().find(|p| p.id == preset.id) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    /// Remove a preset by id, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<Preset> {
        let pos = self.presets.iter().position(|p| p.id == id)?;
        Some(self.presets.remove(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
