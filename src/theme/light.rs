use super::palette::Palette;
use ratatui::style::Color;

pub const LIGHT: Palette = Palette {
    base: Color::Rgb(239, 241, 245),
    mantle: Color::Rgb(230, 233, 239),
    crust: Color::Rgb(220, 224, 232),
    text: Color::Rgb(76, 79, 105),
    subtext: Color::Rgb(108, 111, 133),
    surface0: Color::Rgb(204, 208, 218),
    surface1: Color::Rgb(188, 192, 204),
    surface2: Color::Rgb(172, 176, 190),
    overlay: Color::Rgb(140, 143, 161),
    blue: Color::Rgb(30, 102, 245),
    teal: Color::Rgb(23, 146, 153),
    green: Color::Rgb(64, 160, 43),
    yellow: Color::Rgb(223, 142, 29),
    peach: Color::Rgb(254, 100, 11),
    red: Color::Rgb(210, 15, 57),
    mauve: Color::Rgb(136, 57, 239),
};
