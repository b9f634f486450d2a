// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or parsed from a CSS hex string, and handed back to the canvas as rgba()

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLOSSOM_PINK: Color = Color {
        r: 0xff,
        g: 0xc0,
        b: 0xcb,
        a: 0xff,
    };

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = (num >> 0) as u8;

        Color { r, g, b, a }
    }

    // Accepts #rgb, #rrggbb and #rrggbbaa
    pub fn from_hex(hex: &str) -> Result<Color, String> {
        let digits = hex
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| format!("color `{}` must start with '#'", hex))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("color `{}` contains non-hex digits", hex));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| vec![c, c]).chain("ff".chars()).collect(),
            6 => format!("{}ff", digits),
            8 => digits.to_owned(),
            n => return Err(format!("color `{}` has {} digits, expected 3, 6 or 8", hex, n)),
        };

        u32::from_str_radix(&expanded, 16)
            .map(Color::from_u32)
            .map_err(|e| format!("color `{}`: {}", hex, e))
    }

    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLOSSOM_PINK
    }
}
