use std::str::FromStr;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// RGBA color with components in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0., 0., 0., 1.);
    pub const WHITE: Self = Self::new(1., 1., 1., 1.);
    pub const TRANSPARENT: Self = Self::new(0., 0., 0., 0.);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(
            f32::from(r) / 255.,
            f32::from(g) / 255.,
            f32::from(b) / 255.,
            f32::from(a) / 255.,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let conv = |x: f32| (x.clamp(0., 1.) * 255.).round() as u8;
        [conv(self.r), conv(self.g), conv(self.b), conv(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => (),
        }

        let Some(hex) = s.strip_prefix('#') else {
            bail!("unknown color name: {s:?}");
        };
        if !hex.is_ascii() {
            bail!("invalid hex color: {s:?}");
        }

        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..=i], 16).with_context(|| format!("invalid hex color: {s:?}"))
        };
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .with_context(|| format!("invalid hex color: {s:?}"))
        };

        let rgba = match hex.len() {
            3 | 4 => {
                let mut rgba = [255; 4];
                for (i, c) in rgba.iter_mut().enumerate().take(hex.len()) {
                    *c = nibble(i)? * 17;
                }
                rgba
            }
            6 | 8 => {
                let mut rgba = [255; 4];
                for (i, c) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
                    *c = byte(i * 2)?;
                }
                rgba
            }
            _ => bail!("hex color must have 3, 4, 6 or 8 digits: {s:?}"),
        };

        Ok(Self::from_rgba8(rgba))
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        let [r, g, b, a] = color.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn rgba8(s: &str) -> [u8; 4] {
        s.parse::<Color>().unwrap().to_rgba8()
    }

    #[test]
    fn parse_names() {
        assert_eq!(rgba8("black"), [0, 0, 0, 255]);
        assert_eq!(rgba8("White"), [255, 255, 255, 255]);
        assert_eq!(rgba8("transparent"), [0, 0, 0, 0]);
    }

    #[test]
    fn parse_hex() {
        assert_eq!(rgba8("#f00"), [255, 0, 0, 255]);
        assert_eq!(rgba8("#f008"), [255, 0, 0, 136]);
        assert_eq!(rgba8("#102030"), [16, 32, 48, 255]);
        assert_eq!(rgba8("#10203040"), [16, 32, 48, 64]);
    }

    #[test]
    fn parse_errors() {
        assert_snapshot!("chartreuse".parse::<Color>().unwrap_err(), @r#"unknown color name: "chartreuse""#);
        assert_snapshot!("#12345".parse::<Color>().unwrap_err(), @r##"hex color must have 3, 4, 6 or 8 digits: "#12345""##);
        assert!("#zzz".parse::<Color>().is_err());
    }

    #[test]
    fn string_round_trip() {
        assert_eq!(String::from(Color::BLACK), "#000000ff");
    }
}
