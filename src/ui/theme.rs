use ratatui::style::Color;

use crate::config::ColorsConfig;

#[derive(Debug, Clone)]
pub struct HeatOverrides {
    pub low: String,
    pub mid: String,
    pub high: String,
}

impl HeatOverrides {
    pub fn from_config(colors: &ColorsConfig) -> Self {
        Self {
            low: colors.heat_low.clone(),
            mid: colors.heat_mid.clone(),
            high: colors.heat_high.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub overlay_border: Color,
    pub surface_bg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub gauge_unfilled: Color,
    pub sparkline_color: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub status_ok: Color,
    pub status_paused: Color,
    pub heat_low: Color,
    pub heat_mid: Color,
    pub heat_high: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str, heat: &HeatOverrides) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        };
        if let Some(color) = parse_hex_color(&heat.low) {
            theme.heat_low = color;
        }
        if let Some(color) = parse_hex_color(&heat.mid) {
            theme.heat_mid = color;
        }
        if let Some(color) = parse_hex_color(&heat.high) {
            theme.heat_high = color;
        }
        theme
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            overlay_border: Color::Rgb(71, 85, 105),
            surface_bg: Color::Rgb(15, 18, 25),
            text_primary: Color::Rgb(226, 232, 240),
            text_secondary: Color::Rgb(148, 163, 184),
            header_accent_bg: Color::Rgb(103, 232, 249),
            header_accent_fg: Color::Rgb(15, 18, 25),
            gauge_unfilled: Color::Rgb(35, 40, 51),
            sparkline_color: Color::Rgb(251, 146, 60),
            pill_key_bg: Color::Rgb(51, 65, 85),
            pill_key_fg: Color::Rgb(226, 232, 240),
            pill_desc_fg: Color::Rgb(148, 163, 184),
            status_ok: Color::Rgb(16, 185, 129),
            status_paused: Color::Rgb(249, 115, 22),
            heat_low: Color::Rgb(45, 90, 39),
            heat_mid: Color::Rgb(181, 137, 10),
            heat_high: Color::Rgb(161, 46, 46),
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            overlay_border: Color::Rgb(148, 163, 184),
            surface_bg: Color::Rgb(241, 245, 249),
            text_primary: Color::Rgb(30, 41, 59),
            text_secondary: Color::Rgb(100, 116, 139),
            header_accent_bg: Color::Rgb(14, 116, 144),
            header_accent_fg: Color::Rgb(241, 245, 249),
            gauge_unfilled: Color::Rgb(203, 213, 225),
            sparkline_color: Color::Rgb(194, 65, 12),
            pill_key_bg: Color::Rgb(203, 213, 225),
            pill_key_fg: Color::Rgb(30, 41, 59),
            pill_desc_fg: Color::Rgb(100, 116, 139),
            status_ok: Color::Rgb(5, 150, 105),
            status_paused: Color::Rgb(194, 65, 12),
            heat_low: Color::Rgb(45, 90, 39),
            heat_mid: Color::Rgb(181, 137, 10),
            heat_high: Color::Rgb(161, 46, 46),
        }
    }

    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Heat color for a percentage gauge: low below 50, mid below 80,
    /// high at or above 80.
    pub fn heat_color(&self, percent: f64) -> Color {
        if percent < 50.0 {
            self.heat_low
        } else if percent < 80.0 {
            self.heat_mid
        } else {
            self.heat_high
        }
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
