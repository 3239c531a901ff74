use ratatui::style::Color;
use term_color_support::ColorSupport;

/// Campbell (Windows Terminal) samples for the ANSI colors the launcher uses.
/// Format: (color, (R, G, B), ANSI_256_Index)
const CAMPBELL: [(Color, (u8, u8, u8), u8); 9] = [
    (Color::Black, (12, 12, 12), 232),
    (Color::Red, (197, 15, 31), 160),
    (Color::Green, (19, 161, 14), 28),
    (Color::Yellow, (193, 156, 0), 178),
    (Color::Gray, (204, 204, 204), 250),
    (Color::DarkGray, (118, 118, 118), 243),
    (Color::LightRed, (231, 72, 86), 203),
    (Color::LightBlue, (59, 120, 255), 63),
    (Color::White, (242, 242, 242), 255),
];

/// Pick the closest representation of an ANSI color for the detected terminal depth
fn campbell(color: Color, has_16m: bool, has_256: bool) -> Color {
    match CAMPBELL.iter().find(|(c, _, _)| *c == color) {
        Some((_, (r, g, b), _)) if has_16m => Color::Rgb(*r, *g, *b),
        Some((_, _, index256)) if has_256 => Color::Indexed(*index256),
        _ => color,
    }
}

/// Colors for every role in the launcher, resolved once at startup
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub label: Color,
    pub focus_bg: Color,
    pub focus_fg: Color,
    pub field_bg: Color,
    pub key_fg: Color,
    pub error_fg: Color,
    pub warn_bg: Color,
    pub button_bg: Color,
    pub button_focus_bg: Color,
    pub slider_fill: Color,
    pub slider_track: Color,
}

impl Palette {
    pub fn detect() -> Self {
        let support = ColorSupport::stdout();
        let (has_16m, has_256) = (support.has_16m, support.has_256);
        let c = |color| campbell(color, has_16m, has_256);
        Palette {
            label: c(Color::Gray),
            focus_bg: c(Color::LightBlue),
            focus_fg: c(Color::Black),
            field_bg: c(Color::DarkGray),
            key_fg: c(Color::Yellow),
            error_fg: c(Color::LightRed),
            warn_bg: c(Color::Red),
            button_bg: c(Color::Gray),
            button_focus_bg: c(Color::Green),
            slider_fill: c(Color::Yellow),
            slider_track: c(Color::DarkGray),
        }
    }
}
