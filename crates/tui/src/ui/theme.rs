use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub surface_bright: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            surface: Color::Rgb(20, 26, 32),
            surface_bright: Color::Rgb(26, 33, 41),
            border: Color::Rgb(55, 65, 81),
            border_focused: Color::Rgb(59, 130, 246),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(156, 163, 175),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(59, 130, 246),
            positive: Color::Rgb(16, 185, 129),
            negative: Color::Rgb(239, 68, 68),
            warning: Color::Rgb(245, 158, 11),
            error: Color::Rgb(200, 80, 80),
        }
    }
}

/// Converts a `#rrggbb` string into a terminal color.
///
/// Anything else falls back to the muted gray used for unknown categories.
pub fn hex_color(hex: &str) -> Color {
    let parse = |s: &str| {
        let digits = s.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    };
    parse(hex).unwrap_or(Color::Rgb(0x9c, 0xa3, 0xaf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_color("#3b82f6"), Color::Rgb(0x3b, 0x82, 0xf6));
        assert_eq!(hex_color("#FFFFFF"), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn malformed_hex_falls_back_to_gray() {
        let gray = Color::Rgb(0x9c, 0xa3, 0xaf);
        assert_eq!(hex_color("3b82f6"), gray);
        assert_eq!(hex_color("#3b82"), gray);
        assert_eq!(hex_color("#zzzzzz"), gray);
        assert_eq!(hex_color("#ééé"), gray);
    }
}
