use crate::error::StyleError;
use crate::types::{AttributeSet, Color};
use tracing::debug;

/// Parse a `#RRGGBB` or `#RRGGBBAA` color.
///
/// Anything else yields the default (transparent black) color.
pub fn parse_color(s: &str) -> Color {
    parse_color_strict(s).unwrap_or_else(|e| {
        debug!("{}, using transparent black", e);
        Color::default()
    })
}

/// Like [`parse_color`] but reports malformed input instead of falling back.
pub fn parse_color_strict(s: &str) -> Result<Color, StyleError> {
    let malformed = || StyleError::MalformedColor(s.to_string());

    let hex = s.strip_prefix('#').ok_or_else(malformed)?;
    if (hex.len() != 6 && hex.len() != 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    // All bytes are ASCII hex digits here, so every two-byte slice is a valid channel
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| malformed());

    let mut color = Color::rgb(channel(0)?, channel(2)?, channel(4)?);
    if hex.len() == 8 {
        color.a = channel(6)?;
    }
    Ok(color)
}

/// Merge a `key:value;key:value` style string into `attrib`.
///
/// Only the fields mentioned in `style` are overwritten; everything else keeps
/// its inherited value. Entries that are not exactly one `key:value` pair are
/// dropped. Keys other than `fill`, `stroke` and `stroke-width` land in
/// `attrib.unknown`.
pub fn parse_style(attrib: &mut AttributeSet, style: &str) {
    for entry in style.split(';') {
        if entry.trim().is_empty() {
            continue;
        }

        let mut kv = entry.split(':');
        let (Some(key), Some(value), None) = (kv.next(), kv.next(), kv.next()) else {
            debug!("Dropping malformed style entry {:?}", entry);
            continue;
        };

        let key = key.trim();
        let value = value.trim();

        match key {
            "stroke" => {
                attrib.stroke.color = parse_color(value);
                attrib.stroke.present = true;
            }
            "stroke-width" => {
                attrib.stroke.width = value.parse().unwrap_or_else(|_| {
                    debug!("Invalid stroke-width {:?}, using 0", value);
                    0.0
                });
                attrib.stroke.present = true;
            }
            "fill" => {
                attrib.fill.color = parse_color(value);
                attrib.fill.present = true;
            }
            _ => {
                attrib.unknown.insert(key.to_string(), value.to_string());
            }
        }
    }
}
