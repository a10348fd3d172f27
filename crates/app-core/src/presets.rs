//! Canned transformation instructions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preset identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetId {
    /// Warm film look
    Vintage,
    /// Neon colours
    Cyberpunk,
    /// Soft painting
    Watercolor,
    /// High-contrast black and white
    Noir,
}

/// A named canned instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Identifier
    pub id: PresetId,
    /// Label shown on the button
    pub name: &'static str,
    /// Instruction text written into the prompt
    pub prompt: &'static str,
}

/// All presets in display order
pub const PRESETS: [Preset; 4] = [
    Preset {
        id: PresetId::Vintage,
        name: "Vintage",
        prompt: "Make this image look vintage with warm colors and film grain",
    },
    Preset {
        id: PresetId::Cyberpunk,
        name: "Cyberpunk",
        prompt: "Transform this into a cyberpunk style with neon colors",
    },
    Preset {
        id: PresetId::Watercolor,
        name: "Watercolor",
        prompt: "Convert this image into a delicate watercolor painting",
    },
    Preset {
        id: PresetId::Noir,
        name: "Film Noir",
        prompt: "Make this a black and white film noir style image with high contrast",
    },
];

impl PresetId {
    /// Look up the preset definition
    pub fn preset(&self) -> &'static Preset {
        match self {
            PresetId::Vintage => &PRESETS[0],
            PresetId::Cyberpunk => &PRESETS[1],
            PresetId::Watercolor => &PRESETS[2],
            PresetId::Noir => &PRESETS[3],
        }
    }

    /// Stable string id
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetId::Vintage => "vintage",
            PresetId::Cyberpunk => "cyberpunk",
            PresetId::Watercolor => "watercolor",
            PresetId::Noir => "noir",
        }
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRESETS
            .iter()
            .find(|p| p.id.as_str() == s)
            .map(|p| p.id)
            .ok_or_else(|| format!("unknown preset '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_matches_table() {
        for preset in &PRESETS {
            assert_eq!(preset.id.preset(), preset);
        }
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("noir".parse::<PresetId>(), Ok(PresetId::Noir));
        assert_eq!("cyberpunk".parse::<PresetId>(), Ok(PresetId::Cyberpunk));
        assert!("sepia".parse::<PresetId>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(PresetId::Noir.preset().name, "Film Noir");
        assert_eq!(PresetId::Watercolor.to_string(), "watercolor");
    }
}
