use super::palette::Palette;
use ratatui::style::Color;

pub const OCEAN: Palette = Palette {
    base: Color::Rgb(43, 48, 59),
    mantle: Color::Rgb(37, 42, 52),
    crust: Color::Rgb(31, 35, 44),
    text: Color::Rgb(192, 197, 206),
    subtext: Color::Rgb(167, 173, 186),
    surface0: Color::Rgb(52, 61, 70),
    surface1: Color::Rgb(65, 77, 91),
    surface2: Color::Rgb(79, 91, 102),
    overlay: Color::Rgb(101, 115, 126),
    blue: Color::Rgb(139, 190, 232),
    teal: Color::Rgb(95, 179, 179),
    green: Color::Rgb(163, 190, 140),
    yellow: Color::Rgb(235, 203, 139),
    peach: Color::Rgb(208, 135, 112),
    red: Color::Rgb(191, 97, 106),
    mauve: Color::Rgb(180, 142, 173),
};
