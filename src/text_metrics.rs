use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

use crate::surface::Font;

/// Em fraction assumed per glyph when no font face can be resolved.
const FALLBACK_ADVANCE: f32 = 0.56;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Advance width of `text` in `font`, estimated when no system font matches.
pub fn measure_text_width(text: &str, font: &Font) -> f32 {
    if text.is_empty() || font.size <= 0.0 {
        return 0.0;
    }
    let measured = TEXT_MEASURER
        .lock()
        .ok()
        .and_then(|mut guard| guard.measure(text, font));
    measured.unwrap_or_else(|| estimate_text_width(text, font.size))
}

pub fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars()
        .map(|ch| if is_wide(ch) { 1.0 } else { FALLBACK_ADVANCE })
        .sum::<f32>()
        * font_size
}

/// CJK ideographs and Hangul take a full em in practically every font.
fn is_wide(ch: char) -> bool {
    matches!(ch as u32, 0x1100..=0x11FF | 0x3000..=0x9FFF | 0xAC00..=0xD7AF | 0xF900..=0xFAFF)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<(String, bool), Option<LoadedFace>>,
}

struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: f32,
    advances: HashMap<char, Option<u16>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font: &Font) -> Option<f32> {
        let key = (font.family.trim().to_string(), font.bold);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(&font.family, font.bold);
            if face.is_none() {
                tracing::debug!(family = %font.family, "no font face found, estimating text width");
            }
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get_mut(&key)?.as_mut()?;
        face.measure(text, font.size)
    }

    fn load_face(&mut self, family: &str, bold: bool) -> Option<LoadedFace> {
        let names: Vec<&str> = family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "monospace" | "ui-monospace" => Family::Monospace,
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    Family::SansSerif
                }
                _ => Family::Name(*name),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: if bold { Weight::BOLD } else { Weight::NORMAL },
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let mut loaded = None;
        self.db.with_face_data(id, |data, index| {
            if let Ok(face) = Face::parse(data, index) {
                loaded = Some(LoadedFace {
                    data: data.to_vec(),
                    index,
                    units_per_em: face.units_per_em().max(1) as f32,
                    advances: HashMap::new(),
                });
            }
        });
        loaded
    }
}

impl LoadedFace {
    fn measure(&mut self, text: &str, font_size: f32) -> Option<f32> {
        let face = Face::parse(&self.data, self.index).ok()?;
        let scale = font_size / self.units_per_em;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = *self.advances.entry(ch).or_insert_with(|| {
                face.glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
            });
            width += match advance {
                Some(units) if units > 0 => units as f32 * scale,
                _ => font_size * FALLBACK_ADVANCE,
            };
        }
        Some(width.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font(size: f32) -> Font {
        Font {
            family: "sans-serif".to_string(),
            size,
            bold: false,
            italic: false,
        }
    }

    #[test]
    fn empty_text_has_no_width() {
        assert_eq!(measure_text_width("", &font(12.0)), 0.0);
        assert_eq!(measure_text_width("abc", &font(0.0)), 0.0);
    }

    #[test]
    fn width_grows_with_text() {
        let short = measure_text_width("Pin", &font(12.0));
        let long = measure_text_width("Pin support (hinged)", &font(12.0));
        assert!(short > 0.0);
        assert!(long > short);
    }

    #[test]
    fn estimate_counts_hangul_as_full_em() {
        assert_eq!(estimate_text_width("인장", 10.0), 20.0);
        assert!((estimate_text_width("ab", 10.0) - 11.2).abs() < 1e-4);
    }
}
