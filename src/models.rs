//! Core data models for name lookups.
//!
//! A [`NameRecord`] is the merged result of the gender, age and nationality
//! services for one normalized name. The derived display attributes (colors,
//! capitalized labels, country names, flag URLs) are plain functions of the
//! stored fields so any front-end can use them.

use serde::{Deserialize, Serialize};

use crate::country;
use crate::normalize::capitalize_first;

/// Merged lookup result for one name. Identity key is [`name`](Self::name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    pub name: String,
    #[serde(default)]
    pub age: i64,
    #[serde(default)]
    pub gender: Option<GenderInfo>,
    #[serde(default)]
    pub nationality: Vec<CountryProbability>,
}

impl NameRecord {
    /// The record shown before anything has been looked up.
    pub fn placeholder() -> Self {
        Self {
            name: "Name".to_string(),
            age: 50,
            gender: Some(GenderInfo {
                label: "male".to_string(),
                probability: 50.0,
            }),
            nationality: Vec::new(),
        }
    }
}

/// Gender estimate. `probability` is a percentage in `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderInfo {
    #[serde(rename = "gender")]
    pub label: String,
    pub probability: f32,
}

/// 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

pub const MALE_COLOR: Rgb = Rgb(0x21, 0x96, 0xF3);
pub const FEMALE_COLOR: Rgb = Rgb(0xE9, 0x1E, 0x63);

impl GenderInfo {
    /// Accent color for the label; `None` for anything but male/female.
    pub fn display_color(&self) -> Option<Rgb> {
        match self.label.as_str() {
            "male" => Some(MALE_COLOR),
            "female" => Some(FEMALE_COLOR),
            _ => None,
        }
    }

    /// The opposite accent, used as the background of the probability ring.
    pub fn inverse_color(&self) -> Option<Rgb> {
        match self.label.as_str() {
            "male" => Some(FEMALE_COLOR),
            "female" => Some(MALE_COLOR),
            _ => None,
        }
    }

    pub fn capitalized_label(&self) -> String {
        capitalize_first(&self.label)
    }
}

/// One entry of the nationality estimate. `probability` is in `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProbability {
    #[serde(rename = "country_id")]
    pub country_code: String,
    #[serde(default)]
    pub probability: f32,
}

impl CountryProbability {
    /// English short name of the country, or the code itself if unknown.
    pub fn display_name(&self) -> String {
        country::display_name(&self.country_code)
            .map(str::to_string)
            .unwrap_or_else(|| self.country_code.clone())
    }

    /// Flag image URL under `base` (e.g. `https://flagcdn.com/w80`).
    pub fn flag_url(&self, base: &str) -> String {
        format!(
            "{}/{}.png",
            base.trim_end_matches('/'),
            self.country_code.to_ascii_lowercase()
        )
    }

    /// Probability as a rounded whole percentage.
    pub fn percent(&self) -> u32 {
        (self.probability * 100.0).round().max(0.0) as u32
    }
}
