use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::aggregate::PieKind;
use crate::data::model::LaunchOutcome;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

pub const FAILURE_COLOR: Color32 = Color32::from_rgb(231, 76, 60);
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(46, 204, 113);

// ---------------------------------------------------------------------------
// Slice colours: pie label → Color32
// ---------------------------------------------------------------------------

/// Colours for pie slices. Sites get palette hues in catalog order so a
/// site keeps its colour; outcomes use fixed colours.
#[derive(Debug, Clone)]
pub struct SliceColors {
    sites: BTreeMap<String, Color32>,
    failure: Color32,
    success: Color32,
    default_color: Color32,
}

impl SliceColors {
    pub fn new<'a>(site_names: impl ExactSizeIterator<Item = &'a str>) -> Self {
        let palette = generate_palette(site_names.len());
        let sites: BTreeMap<String, Color32> = site_names
            .zip(palette)
            .map(|(name, c)| (name.to_string(), c))
            .collect();

        SliceColors {
            sites,
            failure: FAILURE_COLOR,
            success: SUCCESS_COLOR,
            default_color: Color32::GRAY,
        }
    }

    /// Colour of a slice labelled `label` in a pie of the given kind.
    pub fn color_for(&self, kind: PieKind, label: &str) -> Color32 {
        let color = match kind {
            PieKind::Sites => self.sites.get(label).copied(),
            PieKind::Outcomes if label == LaunchOutcome::Failure.label() => Some(self.failure),
            PieKind::Outcomes if label == LaunchOutcome::Success.label() => Some(self.success),
            PieKind::Outcomes => None,
        };
        color.unwrap_or(self.default_color)
    }
}
