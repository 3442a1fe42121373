use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;

use crate::foundation::error::{DocmarkError, DocmarkResult};
use crate::watermark::preset::Density;

/// Text stamped when the user gives none.
pub const DEFAULT_TEXT: &str = "仅供办理业务使用，他用无效";

/// Watermark text as entered by a user.
///
/// Deserialized values go through [`WatermarkText::from_input`], so a blank config entry falls
/// back to [`DEFAULT_TEXT`] the same way a blank flag does.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub struct WatermarkText(String);

impl WatermarkText {
    /// Trim `input`; blank input falls back to [`DEFAULT_TEXT`].
    pub fn from_input(input: &str) -> Self {
        let t = input.trim();
        if t.is_empty() {
            Self::default()
        } else {
            Self(t.to_owned())
        }
    }

    /// Text exactly as given, including an empty string.
    pub fn verbatim(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WatermarkText {
    fn default() -> Self {
        Self(DEFAULT_TEXT.to_owned())
    }
}

impl From<String> for WatermarkText {
    fn from(input: String) -> Self {
        Self::from_input(&input)
    }
}

impl From<WatermarkText> for String {
    fn from(text: WatermarkText) -> Self {
        text.0
    }
}

impl std::fmt::Display for WatermarkText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Photo rotation in quarter turns, clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QuarterTurn {
    /// Upright.
    #[default]
    R0,
    /// 90° clockwise.
    R90,
    /// Upside down.
    R180,
    /// 270° clockwise.
    R270,
}

impl QuarterTurn {
    /// Next turn, wrapping 270° back to 0°.
    pub fn next(self) -> Self {
        match self {
            QuarterTurn::R0 => QuarterTurn::R90,
            QuarterTurn::R90 => QuarterTurn::R180,
            QuarterTurn::R180 => QuarterTurn::R270,
            QuarterTurn::R270 => QuarterTurn::R0,
        }
    }

    /// Angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            QuarterTurn::R0 => 0,
            QuarterTurn::R90 => 90,
            QuarterTurn::R180 => 180,
            QuarterTurn::R270 => 270,
        }
    }

    /// Angle in radians.
    pub fn radians(self) -> f64 {
        match self {
            QuarterTurn::R0 => 0.0,
            QuarterTurn::R90 => FRAC_PI_2,
            QuarterTurn::R180 => PI,
            QuarterTurn::R270 => 3.0 * FRAC_PI_2,
        }
    }

    /// `true` for 90° and 270°, where the output canvas exchanges width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, QuarterTurn::R90 | QuarterTurn::R270)
    }

    /// Parse a multiple of 90 degrees, normalizing negatives and full turns.
    pub fn from_degrees(deg: i64) -> DocmarkResult<Self> {
        if deg % 90 != 0 {
            return Err(DocmarkError::validation(format!(
                "rotation must be a multiple of 90 degrees, got {deg}"
            )));
        }
        Ok(match deg.rem_euclid(360) {
            0 => QuarterTurn::R0,
            90 => QuarterTurn::R90,
            180 => QuarterTurn::R180,
            _ => QuarterTurn::R270,
        })
    }
}

impl std::str::FromStr for QuarterTurn {
    type Err = DocmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let deg = s
            .trim()
            .parse::<i64>()
            .map_err(|_| DocmarkError::validation(format!("invalid rotation \"{s}\"")))?;
        Self::from_degrees(deg)
    }
}

impl serde::Serialize for QuarterTurn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.degrees())
    }
}

impl<'de> serde::Deserialize<'de> for QuarterTurn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let deg = i64::deserialize(deserializer)?;
        QuarterTurn::from_degrees(deg).map_err(serde::de::Error::custom)
    }
}

/// Caller-owned watermark settings, passed explicitly into every render.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatermarkConfig {
    /// Text to tile.
    pub text: WatermarkText,
    /// Density preset.
    pub density: Density,
    /// Rotation applied to the photo on export.
    pub rotation: QuarterTurn,
}

impl WatermarkConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> DocmarkResult<Self> {
        serde_json::from_str(s).map_err(|e| DocmarkError::serde(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> DocmarkResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            DocmarkError::config(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/watermark/config.rs"]
mod tests;
