use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Rgb – a plain colour stored in the figure model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Good matches (seaborn "Set2" first entry).
    pub const GOOD: Rgb = Rgb(0x66, 0xc2, 0xa5);
    /// Bad matches (seaborn "Set2" second entry).
    pub const BAD: Rgb = Rgb(0xfc, 0x8d, 0x62);

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.0, self.1, self.2)
    }

    fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
        Rgb(
            (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
            (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
            (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from deep blue like a gist_ncar cycle.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| {
            let hue = 240.0 - (i as f32 / n as f32) * 360.0;
            Rgb::from_hsl(hue.rem_euclid(360.0), 0.75, 0.45)
        })
        .collect()
}

/// Softer variant of [`generate_palette`] used to fill violins.
pub fn muted_palette(n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n.max(1) as f32) * 360.0;
            Rgb::from_hsl(hue.rem_euclid(360.0), 0.45, 0.6)
        })
        .collect()
}

/// Colour of position `t` in [0, 1] on a dark-blue → yellow ramp.
pub fn gradient(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0) as f32;
    Rgb::from_hsl(250.0 - 190.0 * t, 0.8, 0.25 + 0.4 * t)
}
