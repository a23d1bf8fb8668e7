//! Style presets: deterministic mapping from a requested style to synthesis
//! parameters and to the tone note used by the rewrite stage.

use std::borrow::Cow;

use crate::request::Style;

/// Synthesis parameters for one style. Field names follow the engine flags
/// they drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylePreset {
    /// Speaking-rate scale: < 1.0 faster, > 1.0 slower.
    pub length_scale: f32,
    /// Lower = cleaner/stabler, higher = breathier.
    pub noise_scale: f32,
    /// Additional noise shaping.
    pub noise_w: f32,
    /// Pause between sentences, in seconds.
    pub sentence_silence: f32,
}

impl Style {
    /// Per-style synthesis defaults. Total over all styles; custom shares
    /// the neutral default.
    pub fn preset(self) -> StylePreset {
        match self {
            Style::Urgent => StylePreset {
                length_scale: 0.94,
                noise_scale: 0.55,
                noise_w: 0.6,
                sentence_silence: 0.22,
            },
            Style::Formal => StylePreset {
                length_scale: 1.08,
                noise_scale: 0.40,
                noise_w: 0.50,
                sentence_silence: 0.30,
            },
            Style::Friendly => StylePreset {
                length_scale: 1.02,
                noise_scale: 0.45,
                noise_w: 0.50,
                sentence_silence: 0.32,
            },
            Style::Custom => StylePreset {
                length_scale: 1.00,
                noise_scale: 0.50,
                noise_w: 0.50,
                sentence_silence: 0.28,
            },
        }
    }

    /// Tone directive passed to the rewriting collaborator. For custom
    /// style the caller's note wins; a blank or missing note falls back to
    /// the neutral default.
    pub fn note<'a>(self, custom: Option<&'a str>) -> Cow<'a, str> {
        match self {
            Style::Friendly => Cow::Borrowed("Warm, welcoming, upbeat."),
            Style::Formal => Cow::Borrowed("Polite, concise, professional."),
            Style::Urgent => Cow::Borrowed("Direct, time-sensitive, clear call-to-action."),
            Style::Custom => match custom {
                Some(n) if !n.trim().is_empty() => Cow::Borrowed(n),
                _ => Cow::Borrowed("Clear, neutral tone."),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STYLES: [Style; 4] = [Style::Friendly, Style::Formal, Style::Urgent, Style::Custom];

    #[test]
    fn presets_are_well_formed() {
        for style in ALL_STYLES {
            let p = style.preset();
            assert!(p.length_scale > 0.0, "{style}: rate must be positive");
            assert!(p.noise_scale > 0.0 && p.noise_scale <= 1.0, "{style}");
            assert!(p.noise_w > 0.0 && p.noise_w <= 1.0, "{style}");
            assert!(p.sentence_silence >= 0.0, "{style}: pause must be non-negative");
        }
    }

    #[test]
    fn preset_lookup_is_pure() {
        for style in ALL_STYLES {
            assert_eq!(style.preset(), style.preset());
        }
    }

    #[test]
    fn urgent_is_fastest_formal_is_slowest() {
        assert!(Style::Urgent.preset().length_scale < Style::Custom.preset().length_scale);
        assert!(Style::Formal.preset().length_scale > Style::Custom.preset().length_scale);
    }

    #[test]
    fn custom_note_prefers_caller_text() {
        assert_eq!(Style::Custom.note(Some("Like a pirate.")), "Like a pirate.");
        assert_eq!(Style::Custom.note(Some("   ")), "Clear, neutral tone.");
        assert_eq!(Style::Custom.note(None), "Clear, neutral tone.");
    }

    #[test]
    fn fixed_styles_ignore_custom_note() {
        assert_eq!(Style::Formal.note(Some("ignored")), "Polite, concise, professional.");
    }
}
