use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("empty color value")]
    Empty,
    #[error("hex color has {0} digits (expected 3, 4, 6, or 8)")]
    HexLength(usize),
    #[error("invalid hex digit in `{0}`")]
    HexDigit(String),
    #[error("unrecognized color name `{0}`")]
    UnknownName(String),
}

/// A validated CSS color literal.
///
/// The source text is kept verbatim so a loaded configuration re-serializes
/// byte for byte. Accepted forms: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
/// hex, any CSS named color, and the `transparent` / `currentcolor`
/// keywords. Keyword matching is case-insensitive, per CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    text: String,
    kind: ColorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorKind {
    /// `#RGB`, `#RGBA`, `#RRGGBB`, or `#RRGGBBAA`.
    Hex,
    /// A CSS named color with fixed channel values.
    Named,
    /// `transparent` or `currentcolor`.
    Keyword,
}

/// Resolved color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> ColorKind {
        self.kind
    }

    /// Resolved channel values, where the literal defines them.
    ///
    /// `currentcolor` has no fixed channels and yields `None`;
    /// `transparent` resolves to fully transparent black.
    pub fn rgba(&self) -> Option<Rgba> {
        match self.kind {
            ColorKind::Hex => decode_hex(&self.text[1..]),
            ColorKind::Named => {
                let lower = self.text.to_ascii_lowercase();
                NAMED
                    .binary_search_by(|probe| probe.0.cmp(lower.as_str()))
                    .ok()
                    .map(|i| {
                        let [r, g, b] = NAMED[i].1;
                        Rgba { r, g, b, a: 255 }
                    })
            }
            ColorKind::Keyword => {
                if self.text.eq_ignore_ascii_case("transparent") {
                    Some(Rgba {
                        r: 0,
                        g: 0,
                        b: 0,
                        a: 0,
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Opaque channel values, ignoring any alpha component.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        self.rgba().map(|c| (c.r, c.g, c.b))
    }

    /// Constructor for hex literals known to be valid at compile time,
    /// used by the built-in palette.
    pub(crate) fn hex_literal(text: &str) -> Self {
        debug_assert!(
            text.strip_prefix('#')
                .is_some_and(|d| matches!(d.len(), 3 | 4 | 6 | 8)
                    && d.bytes().all(|b| b.is_ascii_hexdigit()))
        );
        Color {
            text: text.to_owned(),
            kind: ColorKind::Hex,
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, ColorError> {
        if s.is_empty() {
            return Err(ColorError::Empty);
        }
        if let Some(digits) = s.strip_prefix('#') {
            if !matches!(digits.len(), 3 | 4 | 6 | 8) {
                return Err(ColorError::HexLength(digits.len()));
            }
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ColorError::HexDigit(s.to_owned()));
            }
            return Ok(Color {
                text: s.to_owned(),
                kind: ColorKind::Hex,
            });
        }
        let lower = s.to_ascii_lowercase();
        if lower == "transparent" || lower == "currentcolor" {
            return Ok(Color {
                text: s.to_owned(),
                kind: ColorKind::Keyword,
            });
        }
        if NAMED
            .binary_search_by(|probe| probe.0.cmp(lower.as_str()))
            .is_ok()
        {
            return Ok(Color {
                text: s.to_owned(),
                kind: ColorKind::Named,
            });
        }
        Err(ColorError::UnknownName(s.to_owned()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

fn decode_hex(digits: &str) -> Option<Rgba> {
    fn nib(c: u8) -> Option<u8> {
        char::from(c).to_digit(16).map(|d| d as u8)
    }

    let bytes = digits.as_bytes();
    match bytes.len() {
        // Shorthand: each digit doubles (#abc == #aabbcc).
        3 | 4 => {
            let mut ch = [0u8, 0, 0, 255];
            for (i, &c) in bytes.iter().enumerate() {
                let n = nib(c)?;
                ch[i] = n << 4 | n;
            }
            Some(Rgba {
                r: ch[0],
                g: ch[1],
                b: ch[2],
                a: ch[3],
            })
        }
        6 | 8 => {
            let mut ch = [0u8, 0, 0, 255];
            for i in 0..bytes.len() / 2 {
                ch[i] = nib(bytes[2 * i])? << 4 | nib(bytes[2 * i + 1])?;
            }
            Some(Rgba {
                r: ch[0],
                g: ch[1],
                b: ch[2],
                a: ch[3],
            })
        }
        _ => None,
    }
}

/// CSS named colors (the full keyword set), sorted for binary search.
const NAMED: &[(&str, [u8; 3])] = &[
    ("aliceblue", [0xf0, 0xf8, 0xff]),
    ("antiquewhite", [0xfa, 0xeb, 0xd7]),
    ("aqua", [0x00, 0xff, 0xff]),
    ("aquamarine", [0x7f, 0xff, 0xd4]),
    ("azure", [0xf0, 0xff, 0xff]),
    ("beige", [0xf5, 0xf5, 0xdc]),
    ("bisque", [0xff, 0xe4, 0xc4]),
    ("black", [0x00, 0x00, 0x00]),
    ("blanchedalmond", [0xff, 0xeb, 0xcd]),
    ("blue", [0x00, 0x00, 0xff]),
    ("blueviolet", [0x8a, 0x2b, 0xe2]),
    ("brown", [0xa5, 0x2a, 0x2a]),
    ("burlywood", [0xde, 0xb8, 0x87]),
    ("cadetblue", [0x5f, 0x9e, 0xa0]),
    ("chartreuse", [0x7f, 0xff, 0x00]),
    ("chocolate", [0xd2, 0x69, 0x1e]),
    ("coral", [0xff, 0x7f, 0x50]),
    ("cornflowerblue", [0x64, 0x95, 0xed]),
    ("cornsilk", [0xff, 0xf8, 0xdc]),
    ("crimson", [0xdc, 0x14, 0x3c]),
    ("cyan", [0x00, 0xff, 0xff]),
    ("darkblue", [0x00, 0x00, 0x8b]),
    ("darkcyan", [0x00, 0x8b, 0x8b]),
    ("darkgoldenrod", [0xb8, 0x86, 0x0b]),
    ("darkgray", [0xa9, 0xa9, 0xa9]),
    ("darkgreen", [0x00, 0x64, 0x00]),
    ("darkgrey", [0xa9, 0xa9, 0xa9]),
    ("darkkhaki", [0xbd, 0xb7, 0x6b]),
    ("darkmagenta", [0x8b, 0x00, 0x8b]),
    ("darkolivegreen", [0x55, 0x6b, 0x2f]),
    ("darkorange", [0xff, 0x8c, 0x00]),
    ("darkorchid", [0x99, 0x32, 0xcc]),
    ("darkred", [0x8b, 0x00, 0x00]),
    ("darksalmon", [0xe9, 0x96, 0x7a]),
    ("darkseagreen", [0x8f, 0xbc, 0x8f]),
    ("darkslateblue", [0x48, 0x3d, 0x8b]),
    ("darkslategray", [0x2f, 0x4f, 0x4f]),
    ("darkslategrey", [0x2f, 0x4f, 0x4f]),
    ("darkturquoise", [0x00, 0xce, 0xd1]),
    ("darkviolet", [0x94, 0x00, 0xd3]),
    ("deeppink", [0xff, 0x14, 0x93]),
    ("deepskyblue", [0x00, 0xbf, 0xff]),
    ("dimgray", [0x69, 0x69, 0x69]),
    ("dimgrey", [0x69, 0x69, 0x69]),
    ("dodgerblue", [0x1e, 0x90, 0xff]),
    ("firebrick", [0xb2, 0x22, 0x22]),
    ("floralwhite", [0xff, 0xfa, 0xf0]),
    ("forestgreen", [0x22, 0x8b, 0x22]),
    ("fuchsia", [0xff, 0x00, 0xff]),
    ("gainsboro", [0xdc, 0xdc, 0xdc]),
    ("ghostwhite", [0xf8, 0xf8, 0xff]),
    ("gold", [0xff, 0xd7, 0x00]),
    ("goldenrod", [0xda, 0xa5, 0x20]),
    ("gray", [0x80, 0x80, 0x80]),
    ("green", [0x00, 0x80, 0x00]),
    ("greenyellow", [0xad, 0xff, 0x2f]),
    ("grey", [0x80, 0x80, 0x80]),
    ("honeydew", [0xf0, 0xff, 0xf0]),
    ("hotpink", [0xff, 0x69, 0xb4]),
    ("indianred", [0xcd, 0x5c, 0x5c]),
    ("indigo", [0x4b, 0x00, 0x82]),
    ("ivory", [0xff, 0xff, 0xf0]),
    ("khaki", [0xf0, 0xe6, 0x8c]),
    ("lavender", [0xe6, 0xe6, 0xfa]),
    ("lavenderblush", [0xff, 0xf0, 0xf5]),
    ("lawngreen", [0x7c, 0xfc, 0x00]),
    ("lemonchiffon", [0xff, 0xfa, 0xcd]),
    ("lightblue", [0xad, 0xd8, 0xe6]),
    ("lightcoral", [0xf0, 0x80, 0x80]),
    ("lightcyan", [0xe0, 0xff, 0xff]),
    ("lightgoldenrodyellow", [0xfa, 0xfa, 0xd2]),
    ("lightgray", [0xd3, 0xd3, 0xd3]),
    ("lightgreen", [0x90, 0xee, 0x90]),
    ("lightgrey", [0xd3, 0xd3, 0xd3]),
    ("lightpink", [0xff, 0xb6, 0xc1]),
    ("lightsalmon", [0xff, 0xa0, 0x7a]),
    ("lightseagreen", [0x20, 0xb2, 0xaa]),
    ("lightskyblue", [0x87, 0xce, 0xfa]),
    ("lightslategray", [0x77, 0x88, 0x99]),
    ("lightslategrey", [0x77, 0x88, 0x99]),
    ("lightsteelblue", [0xb0, 0xc4, 0xde]),
    ("lightyellow", [0xff, 0xff, 0xe0]),
    ("lime", [0x00, 0xff, 0x00]),
    ("limegreen", [0x32, 0xcd, 0x32]),
    ("linen", [0xfa, 0xf0, 0xe6]),
    ("magenta", [0xff, 0x00, 0xff]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("mediumaquamarine", [0x66, 0xcd, 0xaa]),
    ("mediumblue", [0x00, 0x00, 0xcd]),
    ("mediumorchid", [0xba, 0x55, 0xd3]),
    ("mediumpurple", [0x93, 0x70, 0xdb]),
    ("mediumseagreen", [0x3c, 0xb3, 0x71]),
    ("mediumslateblue", [0x7b, 0x68, 0xee]),
    ("mediumspringgreen", [0x00, 0xfa, 0x9a]),
    ("mediumturquoise", [0x48, 0xd1, 0xcc]),
    ("mediumvioletred", [0xc7, 0x15, 0x85]),
    ("midnightblue", [0x19, 0x19, 0x70]),
    ("mintcream", [0xf5, 0xff, 0xfa]),
    ("mistyrose", [0xff, 0xe4, 0xe1]),
    ("moccasin", [0xff, 0xe4, 0xb5]),
    ("navajowhite", [0xff, 0xde, 0xad]),
    ("navy", [0x00, 0x00, 0x80]),
    ("oldlace", [0xfd, 0xf5, 0xe6]),
    ("olive", [0x80, 0x80, 0x00]),
    ("olivedrab", [0x6b, 0x8e, 0x23]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("orangered", [0xff, 0x45, 0x00]),
    ("orchid", [0xda, 0x70, 0xd6]),
    ("palegoldenrod", [0xee, 0xe8, 0xaa]),
    ("palegreen", [0x98, 0xfb, 0x98]),
    ("paleturquoise", [0xaf, 0xee, 0xee]),
    ("palevioletred", [0xdb, 0x70, 0x93]),
    ("papayawhip", [0xff, 0xef, 0xd5]),
    ("peachpuff", [0xff, 0xda, 0xb9]),
    ("peru", [0xcd, 0x85, 0x3f]),
    ("pink", [0xff, 0xc0, 0xcb]),
    ("plum", [0xdd, 0xa0, 0xdd]),
    ("powderblue", [0xb0, 0xe0, 0xe6]),
    ("purple", [0x80, 0x00, 0x80]),
    ("rebeccapurple", [0x66, 0x33, 0x99]),
    ("red", [0xff, 0x00, 0x00]),
    ("rosybrown", [0xbc, 0x8f, 0x8f]),
    ("royalblue", [0x41, 0x69, 0xe1]),
    ("saddlebrown", [0x8b, 0x45, 0x13]),
    ("salmon", [0xfa, 0x80, 0x72]),
    ("sandybrown", [0xf4, 0xa4, 0x60]),
    ("seagreen", [0x2e, 0x8b, 0x57]),
    ("seashell", [0xff, 0xf5, 0xee]),
    ("sienna", [0xa0, 0x52, 0x2d]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("skyblue", [0x87, 0xce, 0xeb]),
    ("slateblue", [0x6a, 0x5a, 0xcd]),
    ("slategray", [0x70, 0x80, 0x90]),
    ("slategrey", [0x70, 0x80, 0x90]),
    ("snow", [0xff, 0xfa, 0xfa]),
    ("springgreen", [0x00, 0xff, 0x7f]),
    ("steelblue", [0x46, 0x82, 0xb4]),
    ("tan", [0xd2, 0xb4, 0x8c]),
    ("teal", [0x00, 0x80, 0x80]),
    ("thistle", [0xd8, 0xbf, 0xd8]),
    ("tomato", [0xff, 0x63, 0x47]),
    ("turquoise", [0x40, 0xe0, 0xd0]),
    ("violet", [0xee, 0x82, 0xee]),
    ("wheat", [0xf5, 0xde, 0xb3]),
    ("white", [0xff, 0xff, 0xff]),
    ("whitesmoke", [0xf5, 0xf5, 0xf5]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("yellowgreen", [0x9a, 0xcd, 0x32]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_table_is_sorted() {
        assert!(NAMED.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn hex_sextet() {
        let c: Color = "#7AAC2B".parse().unwrap();
        assert_eq!(c.kind(), ColorKind::Hex);
        assert_eq!(c.rgb(), Some((0x7a, 0xac, 0x2b)));
        // Source text survives verbatim, including case.
        assert_eq!(c.as_str(), "#7AAC2B");
    }

    #[test]
    fn hex_shorthand_doubles_digits() {
        let c: Color = "#fff".parse().unwrap();
        assert_eq!(c.rgba(), Some(Rgba { r: 255, g: 255, b: 255, a: 255 }));

        let c: Color = "#a3f8".parse().unwrap();
        assert_eq!(c.rgba(), Some(Rgba { r: 0xaa, g: 0x33, b: 0xff, a: 0x88 }));
    }

    #[test]
    fn hex_with_alpha() {
        let c: Color = "#d32f2f80".parse().unwrap();
        assert_eq!(c.rgba(), Some(Rgba { r: 0xd3, g: 0x2f, b: 0x2f, a: 0x80 }));
    }

    #[test]
    fn hex_bad_length() {
        assert_eq!("#12345".parse::<Color>(), Err(ColorError::HexLength(5)));
        assert_eq!("#".parse::<Color>(), Err(ColorError::HexLength(0)));
    }

    #[test]
    fn hex_bad_digit() {
        assert_eq!(
            "#12g45f".parse::<Color>(),
            Err(ColorError::HexDigit("#12g45f".into()))
        );
    }

    #[test]
    fn named_colors() {
        let c: Color = "rebeccapurple".parse().unwrap();
        assert_eq!(c.kind(), ColorKind::Named);
        assert_eq!(c.rgb(), Some((0x66, 0x33, 0x99)));
    }

    #[test]
    fn named_colors_are_case_insensitive() {
        let c: Color = "RebeccaPurple".parse().unwrap();
        assert_eq!(c.rgb(), Some((0x66, 0x33, 0x99)));
        assert_eq!(c.as_str(), "RebeccaPurple");
    }

    #[test]
    fn keywords() {
        let transparent: Color = "transparent".parse().unwrap();
        assert_eq!(transparent.kind(), ColorKind::Keyword);
        assert_eq!(transparent.rgba(), Some(Rgba { r: 0, g: 0, b: 0, a: 0 }));

        let current: Color = "currentcolor".parse().unwrap();
        assert_eq!(current.kind(), ColorKind::Keyword);
        assert_eq!(current.rgba(), None);
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            "not-a-color".parse::<Color>(),
            Err(ColorError::UnknownName("not-a-color".into()))
        );
        assert_eq!("".parse::<Color>(), Err(ColorError::Empty));
    }

    #[test]
    fn serializes_as_source_text() {
        let c: Color = "#1E1E1E".parse().unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#1E1E1E\"");
        assert_eq!(format!("{c}"), "#1E1E1E");
    }
}
