use std::str::FromStr;

use crate::foundation::core::Rgb8;
use crate::foundation::error::DocmarkError;

/// Named bundle of row gap, opacity and color controlling watermark intensity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DensityPreset {
    /// Base spacing between tile rows in pixels (before resolution scaling).
    pub gap: f64,
    /// Fill opacity in `(0, 1]`.
    pub alpha: f32,
    /// Fill color.
    pub color: Rgb8,
}

const GRAY: Rgb8 = Rgb8::new(0x80, 0x80, 0x80);

const SPARSE: DensityPreset = DensityPreset {
    gap: 300.0,
    alpha: 0.25,
    color: GRAY,
};

const NORMAL: DensityPreset = DensityPreset {
    gap: 200.0,
    alpha: 0.20,
    color: GRAY,
};

const DENSE: DensityPreset = DensityPreset {
    gap: 120.0,
    alpha: 0.15,
    color: GRAY,
};

/// Selector for one of the fixed [`DensityPreset`]s.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// Wide rows, darkest fill.
    Sparse,
    /// The default.
    #[default]
    Normal,
    /// Tight rows, lightest fill.
    Dense,
}

impl Density {
    /// Every density, sparse to dense.
    pub const ALL: [Density; 3] = [Density::Sparse, Density::Normal, Density::Dense];

    /// The immutable preset this density selects.
    pub fn preset(self) -> &'static DensityPreset {
        match self {
            Density::Sparse => &SPARSE,
            Density::Normal => &NORMAL,
            Density::Dense => &DENSE,
        }
    }

    /// Lowercase name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Density::Sparse => "sparse",
            Density::Normal => "normal",
            Density::Dense => "dense",
        }
    }
}

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Density {
    type Err = DocmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Density::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                DocmarkError::validation(format!(
                    "unknown density \"{s}\" (expected sparse, normal or dense)"
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/watermark/preset.rs"]
mod tests;
