// File: crates/diagram-core/src/color.rs
// Summary: CSS-style color parsing used as the host color validity check.

use std::fmt;
use std::str::FromStr;

/// 8-bit straight-alpha RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS color: hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`),
    /// `rgb()`/`rgba()`, `hsl()`/`hsla()`, or a named color.
    pub fn parse(input: &str) -> Result<Self, String> {
        let s = input.trim();
        if s.is_empty() {
            return Err("empty color".to_owned());
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = function_args(&lower, "rgba").or_else(|| function_args(&lower, "rgb")) {
            return parse_rgb_args(args);
        }
        if let Some(args) = function_args(&lower, "hsla").or_else(|| function_args(&lower, "hsl")) {
            return parse_hsl_args(args);
        }
        named(&lower).ok_or_else(|| format!("unknown color name \"{s}\""))
    }

    /// True when `input` would be accepted by [`Color::parse`].
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Alpha as a 0..1 fraction.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// `#rrggbb` when opaque, otherwise `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?.trim_start().strip_prefix('(')?.strip_suffix(')')
}

fn parse_hex(hex: &str) -> Result<Color, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }
    fn byte(pair: &[u8]) -> Result<u8, String> {
        Ok(nibble(pair[0])? * 16 + nibble(pair[1])?)
    }

    let b = hex.as_bytes();
    match b.len() {
        3 | 4 => {
            let r = nibble(b[0])? * 17;
            let g = nibble(b[1])? * 17;
            let bl = nibble(b[2])? * 17;
            let a = if b.len() == 4 { nibble(b[3])? * 17 } else { 255 };
            Ok(Color::rgba(r, g, bl, a))
        }
        6 | 8 => {
            let r = byte(&b[0..2])?;
            let g = byte(&b[2..4])?;
            let bl = byte(&b[4..6])?;
            let a = if b.len() == 8 { byte(&b[6..8])? } else { 255 };
            Ok(Color::rgba(r, g, bl, a))
        }
        _ => Err("hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA".to_owned()),
    }
}

fn split_args(args: &str) -> Vec<&str> {
    // Accept both `1, 2, 3` and `1 2 3 / 0.5`.
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_alpha(part: Option<&&str>) -> Result<u8, String> {
    let Some(part) = part else { return Ok(255) };
    let a = if let Some(pct) = part.strip_suffix('%') {
        parse_number(pct)? / 100.0
    } else {
        parse_number(part)?
    };
    Ok((a.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn parse_number(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("invalid number \"{s}\""))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("invalid number \"{s}\""))
    }
}

fn parse_rgb_args(args: &str) -> Result<Color, String> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err("rgb() takes 3 or 4 arguments".to_owned());
    }
    let channel = |s: &str| -> Result<u8, String> {
        let v = if let Some(pct) = s.strip_suffix('%') {
            parse_number(pct)? * 2.55
        } else {
            parse_number(s)?
        };
        Ok(v.clamp(0.0, 255.0).round() as u8)
    };
    Ok(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        parse_alpha(parts.get(3))?,
    ))
}

fn parse_hsl_args(args: &str) -> Result<Color, String> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err("hsl() takes 3 or 4 arguments".to_owned());
    }
    let h = parse_number(parts[0].trim_end_matches("deg"))?;
    let pct = |s: &str| -> Result<f64, String> {
        let v = s.strip_suffix('%').ok_or_else(|| format!("expected percentage, got \"{s}\""))?;
        Ok((parse_number(v)? / 100.0).clamp(0.0, 1.0))
    };
    let (r, g, b) = hsl_to_rgb(h, pct(parts[1])?, pct(parts[2])?);
    let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    Ok(Color::rgba(to_u8(r), to_u8(g), to_u8(b), parse_alpha(parts.get(3))?))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    if s == 0.0 {
        return (l, l, l);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn named(name: &str) -> Option<Color> {
    if name == "transparent" {
        return Some(Color::TRANSPARENT);
    }
    NAMED_COLORS
        .binary_search_by(|(n, _)| n.cmp(&name))
        .ok()
        .map(|i| {
            let v = NAMED_COLORS[i].1;
            Color::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
        })
}

// CSS named colors, sorted by name.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff), ("antiquewhite", 0xfaebd7), ("aqua", 0x00ffff), ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff), ("beige", 0xf5f5dc), ("bisque", 0xffe4c4), ("black", 0x000000),
    ("blanchedalmond", 0xffebcd), ("blue", 0x0000ff), ("blueviolet", 0x8a2be2), ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887), ("cadetblue", 0x5f9ea0), ("chartreuse", 0x7fff00), ("chocolate", 0xd2691e),
    ("coral", 0xff7f50), ("cornflowerblue", 0x6495ed), ("cornsilk", 0xfff8dc), ("crimson", 0xdc143c),
    ("cyan", 0x00ffff), ("darkblue", 0x00008b), ("darkcyan", 0x008b8b), ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9), ("darkgreen", 0x006400), ("darkgrey", 0xa9a9a9), ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b), ("darkolivegreen", 0x556b2f), ("darkorange", 0xff8c00), ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000), ("darksalmon", 0xe9967a), ("darkseagreen", 0x8fbc8f), ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f), ("darkslategrey", 0x2f4f4f), ("darkturquoise", 0x00ced1), ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493), ("deepskyblue", 0x00bfff), ("dimgray", 0x696969), ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff), ("firebrick", 0xb22222), ("floralwhite", 0xfffaf0), ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff), ("gainsboro", 0xdcdcdc), ("ghostwhite", 0xf8f8ff), ("gold", 0xffd700),
    ("goldenrod", 0xdaa520), ("gray", 0x808080), ("green", 0x008000), ("greenyellow", 0xadff2f),
    ("grey", 0x808080), ("honeydew", 0xf0fff0), ("hotpink", 0xff69b4), ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082), ("ivory", 0xfffff0), ("khaki", 0xf0e68c), ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5), ("lawngreen", 0x7cfc00), ("lemonchiffon", 0xfffacd), ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080), ("lightcyan", 0xe0ffff), ("lightgoldenrodyellow", 0xfafad2), ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90), ("lightgrey", 0xd3d3d3), ("lightpink", 0xffb6c1), ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa), ("lightskyblue", 0x87cefa), ("lightslategray", 0x778899), ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de), ("lightyellow", 0xffffe0), ("lime", 0x00ff00), ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6), ("magenta", 0xff00ff), ("maroon", 0x800000), ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd), ("mediumorchid", 0xba55d3), ("mediumpurple", 0x9370db), ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee), ("mediumspringgreen", 0x00fa9a), ("mediumturquoise", 0x48d1cc), ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970), ("mintcream", 0xf5fffa), ("mistyrose", 0xffe4e1), ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead), ("navy", 0x000080), ("oldlace", 0xfdf5e6), ("olive", 0x808000),
    ("olivedrab", 0x6b8e23), ("orange", 0xffa500), ("orangered", 0xff4500), ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa), ("palegreen", 0x98fb98), ("paleturquoise", 0xafeeee), ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5), ("peachpuff", 0xffdab9), ("peru", 0xcd853f), ("pink", 0xffc0cb),
    ("plum", 0xdda0dd), ("powderblue", 0xb0e0e6), ("purple", 0x800080), ("rebeccapurple", 0x663399),
    ("red", 0xff0000), ("rosybrown", 0xbc8f8f), ("royalblue", 0x4169e1), ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072), ("sandybrown", 0xf4a460), ("seagreen", 0x2e8b57), ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d), ("silver", 0xc0c0c0), ("skyblue", 0x87ceeb), ("slateblue", 0x6a5acd),
    ("slategray", 0x708090), ("slategrey", 0x708090), ("snow", 0xfffafa), ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4), ("tan", 0xd2b48c), ("teal", 0x008080), ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347), ("turquoise", 0x40e0d0), ("violet", 0xee82ee), ("wheat", 0xf5deb3),
    ("white", 0xffffff), ("whitesmoke", 0xf5f5f5), ("yellow", 0xffff00), ("yellowgreen", 0x9acd32),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#ff0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("#0f0").unwrap(), Color::rgb(0, 255, 0));
        assert_eq!(Color::parse("#0000ff80").unwrap(), Color::rgba(0, 0, 255, 128));
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#gg0000").is_err());
    }

    #[test]
    fn parses_functional_forms() {
        assert_eq!(Color::parse("rgb(10, 20, 30)").unwrap(), Color::rgb(10, 20, 30));
        assert_eq!(Color::parse("rgba(10,20,30,0.5)").unwrap(), Color::rgba(10, 20, 30, 128));
        assert_eq!(Color::parse("hsl(0, 100%, 50%)").unwrap(), Color::rgb(255, 0, 0));
        assert!(Color::parse("rgb(1,2)").is_err());
        assert!(Color::parse("hsl(0, 1, 0.5)").is_err());
    }

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!(Color::parse("Red").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("rebeccapurple").unwrap(), Color::rgb(0x66, 0x33, 0x99));
        assert_eq!(Color::parse("transparent").unwrap(), Color::TRANSPARENT);
        assert!(!Color::is_valid("notacolor"));
        assert!(!Color::is_valid(""));
    }

    #[test]
    fn named_table_is_sorted_for_binary_search() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn hex_output_round_trips_alpha() {
        assert_eq!(Color::rgb(1, 2, 3).to_hex(), "#010203");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    }
}
