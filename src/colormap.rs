//! Color maps and value normalization.
//!
//! Each map is a short list of control colors spread evenly over `[0, 1]`;
//! values in between are linearly interpolated.

use clap::ValueEnum;

/// An RGB triple.
pub type Rgb = (u8, u8, u8);

/// Named sequential color maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Colormap {
    /// Perceptually uniform blue-green-yellow.
    #[default]
    Viridis,
    Plasma,
    Magma,
    Inferno,
    Cividis,
    /// White to black.
    Greys,
}

const VIRIDIS: &[Rgb] = &[
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const PLASMA: &[Rgb] = &[
    (13, 8, 135),
    (126, 3, 168),
    (204, 71, 120),
    (248, 149, 64),
    (240, 249, 33),
];

const MAGMA: &[Rgb] = &[
    (0, 0, 4),
    (81, 18, 124),
    (183, 55, 121),
    (252, 137, 97),
    (252, 253, 191),
];

const INFERNO: &[Rgb] = &[
    (0, 0, 4),
    (87, 16, 110),
    (188, 55, 84),
    (249, 142, 9),
    (252, 255, 164),
];

const CIVIDIS: &[Rgb] = &[
    (0, 34, 78),
    (62, 76, 108),
    (124, 123, 120),
    (186, 173, 111),
    (253, 231, 55),
];

const GREYS: &[Rgb] = &[(255, 255, 255), (0, 0, 0)];

impl Colormap {
    pub fn name(self) -> &'static str {
        match self {
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Magma => "magma",
            Colormap::Inferno => "inferno",
            Colormap::Cividis => "cividis",
            Colormap::Greys => "greys",
        }
    }

    fn stops(self) -> &'static [Rgb] {
        match self {
            Colormap::Viridis => VIRIDIS,
            Colormap::Plasma => PLASMA,
            Colormap::Magma => MAGMA,
            Colormap::Inferno => INFERNO,
            Colormap::Cividis => CIVIDIS,
            Colormap::Greys => GREYS,
        }
    }

    /// Maps `t` (clamped to `[0, 1]`) to a color.
    pub fn sample(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let segment_count = stops.len() - 1;
        let scaled = t * segment_count as f64;
        let segment = (scaled.floor() as usize).min(segment_count - 1);
        let local_t = scaled - segment as f64;

        lerp(stops[segment], stops[segment + 1], local_t)
    }

    /// The control colors as `#rrggbb` strings, lowest value first.
    pub fn stops_hex(self) -> Vec<String> {
        self.stops()
            .iter()
            .map(|&(r, g, b)| format!("#{:02x}{:02x}{:02x}", r, g, b))
            .collect()
    }
}

fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    (channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}

/// Linear normalization of color values onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    /// Uses the smallest and largest of `values` as the domain.
    /// An empty slice gives the degenerate domain `[0, 0]`.
    pub fn from_values(values: &[i64]) -> Self {
        let vmin = values.iter().copied().min().unwrap_or(0) as f64;
        let vmax = values.iter().copied().max().unwrap_or(0) as f64;
        Self { vmin, vmax }
    }

    /// Maps a value to `[0, 1]`. A degenerate domain maps everything to 0.
    pub fn apply(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.vmin) / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_the_first_and_last_stop() {
        assert_eq!(Colormap::Viridis.sample(0.0), (68, 1, 84));
        assert_eq!(Colormap::Viridis.sample(1.0), (253, 231, 37));
        assert_eq!(Colormap::Greys.sample(0.0), (255, 255, 255));
        assert_eq!(Colormap::Greys.sample(1.0), (0, 0, 0));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(Colormap::Magma.sample(-3.0), Colormap::Magma.sample(0.0));
        assert_eq!(Colormap::Magma.sample(7.0), Colormap::Magma.sample(1.0));
        assert_eq!(Colormap::Magma.sample(f64::NAN), Colormap::Magma.sample(0.0));
    }

    #[test]
    fn midpoints_are_interpolated() {
        assert_eq!(Colormap::Greys.sample(0.5), (128, 128, 128));
        // Exactly on the middle stop of a five-stop map.
        assert_eq!(Colormap::Viridis.sample(0.5), (33, 145, 140));
    }

    #[test]
    fn hex_stops_are_formatted() {
        let hex = Colormap::Viridis.stops_hex();
        assert_eq!(hex.first().map(String::as_str), Some("#440154"));
        assert_eq!(hex.last().map(String::as_str), Some("#fde725"));
        assert_eq!(Colormap::Greys.stops_hex(), vec!["#ffffff", "#000000"]);
    }

    #[test]
    fn names_match_cli_values() {
        for map in Colormap::value_variants() {
            let value = map.to_possible_value().unwrap();
            assert_eq!(value.get_name(), map.name());
        }
    }

    #[test]
    fn normalize_uses_data_extent() {
        let norm = Normalize::from_values(&[10, 55, 100]);
        assert_eq!(norm.vmin, 10.0);
        assert_eq!(norm.vmax, 100.0);
        assert_eq!(norm.apply(10.0), 0.0);
        assert_eq!(norm.apply(55.0), 0.5);
        assert_eq!(norm.apply(100.0), 1.0);
    }

    #[test]
    fn degenerate_domain_maps_to_zero() {
        assert_eq!(Normalize::from_values(&[]).apply(3.0), 0.0);
        assert_eq!(Normalize::from_values(&[42, 42]).apply(42.0), 0.0);
    }
}
