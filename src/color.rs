//! Color handling: hex parsing for settings and the rank color palette
//!
//! Rank colors are stored as tag strings (e.g. `"bg-green-600 text-white"`).
//! Only the first whitespace-separated token selects the fill color.

use tracing::debug;

use crate::constants::raster::UNRANKED_COLOR;

/// Opaque RGB color parsed from `#RRGGBB` (or `RRGGBB`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn from_rgb(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        }
    }

    /// Parse a 6-digit hex color; optional '#' prefix
    pub fn parse(input: &str) -> Option<Self> {
        let hex = input.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One selectable color in the rank editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption {
    pub name: &'static str,
    pub color_tag: &'static str,
    pub selected_color_tag: &'static str,
    pub rgb: [u8; 3],
}

pub const COLOR_OPTIONS: [ColorOption; 8] = [
    ColorOption {
        name: "Red",
        color_tag: "bg-red-600",
        selected_color_tag: "bg-red-600/30 ring-2 ring-red-500",
        rgb: [0xDC, 0x26, 0x26],
    },
    ColorOption {
        name: "Orange",
        color_tag: "bg-orange-500",
        selected_color_tag: "bg-orange-500/30 ring-2 ring-orange-400",
        rgb: [0xF9, 0x73, 0x16],
    },
    ColorOption {
        name: "Amber",
        color_tag: "bg-amber-400",
        selected_color_tag: "bg-amber-400/30 ring-2 ring-amber-300",
        rgb: [0xFB, 0xBF, 0x24],
    },
    ColorOption {
        name: "Yellow",
        color_tag: "bg-yellow-300",
        selected_color_tag: "bg-yellow-300/30 ring-2 ring-yellow-200",
        rgb: [0xFD, 0xE0, 0x47],
    },
    ColorOption {
        name: "Lime",
        color_tag: "bg-lime-400",
        selected_color_tag: "bg-lime-400/30 ring-2 ring-lime-300",
        rgb: [0xA3, 0xE6, 0x35],
    },
    ColorOption {
        name: "Green",
        color_tag: "bg-green-600",
        selected_color_tag: "bg-green-600/30 ring-2 ring-green-500",
        rgb: [0x16, 0xA3, 0x4A],
    },
    ColorOption {
        name: "Sky",
        color_tag: "bg-sky-500",
        selected_color_tag: "bg-sky-500/30 ring-2 ring-sky-400",
        rgb: [0x0E, 0xA5, 0xE9],
    },
    ColorOption {
        name: "Purple",
        color_tag: "bg-purple-600",
        selected_color_tag: "bg-purple-600/30 ring-2 ring-purple-500",
        rgb: [0x93, 0x33, 0xEA],
    },
];

/// Palette entry whose primary tag matches, if any
pub fn option_for_tag(tag: &str) -> Option<&'static ColorOption> {
    let primary = tag.split_whitespace().next()?;
    COLOR_OPTIONS.iter().find(|option| option.color_tag == primary)
}

/// Fill color for a tag
///
/// Accepts palette tags and bare hex colors (`#RRGGBB`) so hand-edited
/// imports still render. Anything else falls back to the unranked color.
pub fn rgb_for_tag(tag: &str) -> [u8; 3] {
    if let Some(option) = option_for_tag(tag) {
        return option.rgb;
    }
    if let Some(hex) = tag.split_whitespace().next().and_then(HexColor::parse) {
        return hex.rgb();
    }
    debug!(tag = %tag, "Unknown color tag, using unranked color");
    UNRANKED_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_with_and_without_prefix() {
        assert_eq!(HexColor::parse("#1f2937"), Some(HexColor::from_rgb([0x1f, 0x29, 0x37])));
        assert_eq!(HexColor::parse("FF0000"), Some(HexColor::from_rgb([0xFF, 0, 0])));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert_eq!(HexColor::parse("#12345"), None);
        assert_eq!(HexColor::parse("zzzzzz"), None);
        assert_eq!(HexColor::parse(""), None);
    }

    #[test]
    fn test_hex_string_round_trip() {
        let color = HexColor::from_rgb([0x1f, 0x29, 0x37]);
        assert_eq!(HexColor::parse(&color.to_hex_string()), Some(color));
    }

    #[test]
    fn test_rgb_for_tag_uses_first_token() {
        assert_eq!(rgb_for_tag("bg-green-600 text-white"), COLOR_OPTIONS[5].rgb);
        assert_eq!(rgb_for_tag("#102030 ignored"), [0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_rgb_for_unknown_tag_is_unranked() {
        assert_eq!(rgb_for_tag("bg-made-up"), UNRANKED_COLOR);
        assert_eq!(rgb_for_tag(""), UNRANKED_COLOR);
    }

    #[test]
    fn test_new_rank_default_is_green() {
        let option = &COLOR_OPTIONS[crate::constants::ranks::NEW_RANK_COLOR_INDEX];
        assert_eq!(option.name, "Green");
    }
}
