use super::palette::Palette;
use ratatui::style::Color;

pub const MONOKAI: Palette = Palette {
    base: Color::Rgb(39, 40, 34),
    mantle: Color::Rgb(34, 35, 29),
    crust: Color::Rgb(29, 30, 25),
    text: Color::Rgb(248, 248, 242),
    subtext: Color::Rgb(204, 204, 197),
    surface0: Color::Rgb(62, 61, 50),
    surface1: Color::Rgb(73, 72, 62),
    surface2: Color::Rgb(90, 89, 76),
    overlay: Color::Rgb(117, 113, 94),
    blue: Color::Rgb(102, 217, 239),
    teal: Color::Rgb(161, 239, 228),
    green: Color::Rgb(166, 226, 46),
    yellow: Color::Rgb(230, 219, 116),
    peach: Color::Rgb(253, 151, 31),
    red: Color::Rgb(249, 38, 114),
    mauve: Color::Rgb(174, 129, 255),
};
