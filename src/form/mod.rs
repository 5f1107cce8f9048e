use crate::error::{DirectorError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_THEME_LEN: usize = 10;
pub const DEFAULT_THEME: &str = "A lone astronaut discovers a sentient plant on a desolate moon.";
pub const DEFAULT_DURATION_SECS: u32 = 90;

/// Creative parameters for one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormParams {
    pub theme: String,
    pub visual_style: VisualStyle,
    pub image_style: ImageStyle,
    pub duration_secs: u32,
    pub writing_style: WritingStyle,
    pub language: Language,
    pub aspect_ratio: AspectRatio,
}

impl Default for FormParams {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            visual_style: VisualStyle::Cinematic,
            image_style: ImageStyle::Photorealistic,
            duration_secs: DEFAULT_DURATION_SECS,
            writing_style: WritingStyle::Storytelling,
            language: Language::Vietnamese,
            aspect_ratio: AspectRatio::Landscape,
        }
    }
}

impl FormParams {
    pub fn validate(&self) -> Result<()> {
        let theme_len = self.theme.trim().chars().count();
        if theme_len < MIN_THEME_LEN {
            return Err(DirectorError::Validation(format!(
                "theme must be at least {} characters (got {})",
                MIN_THEME_LEN, theme_len
            )));
        }
        if self.duration_secs == 0 {
            return Err(DirectorError::Validation(
                "duration must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// Each enum maps to the label shown to the model; the clap value name is the
// kebab-case variant name.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum!(VisualStyle {
    Cinematic => "Cinematic",
    Anime => "Anime",
    Documentary => "Documentary",
    Vlog => "Vlog",
    SciFi => "Sci-Fi",
    Fantasy => "Fantasy",
    Horror => "Horror",
    Noir => "Noir",
    Cyberpunk => "Cyberpunk",
    Steampunk => "Steampunk",
    Vintage => "Vintage",
    Minimalist => "Minimalist",
    Surreal => "Surreal",
    Abstract => "Abstract",
    Nature => "Nature",
    Urban => "Urban",
    Historical => "Historical",
    Gothic => "Gothic",
    PopArt => "Pop Art",
    ComicBook => "Comic Book",
});

labelled_enum!(ImageStyle {
    Photorealistic => "Photorealistic",
    Render3d => "3D Render",
    HandDrawn => "Hand-drawn",
    PixelArt => "Pixel Art",
    OilPainting => "Oil Painting",
    Watercolor => "Watercolor",
    VectorArt => "Vector Art",
    LowPoly => "Low Poly",
    Impressionistic => "Impressionistic",
    Expressionistic => "Expressionistic",
    ConceptArt => "Concept Art",
    Blueprint => "Blueprint",
    ChalkArt => "Chalk Art",
    CharcoalSketch => "Charcoal Sketch",
    Claymation => "Claymation",
    StopMotion => "Stop Motion",
    GlitchArt => "Glitch Art",
    Holographic => "Holographic",
    Infrared => "Infrared",
    XRay => "X-Ray",
});

labelled_enum!(WritingStyle {
    Storytelling => "Storytelling",
    HookStoryOffer => "Hook-Story-Offer",
    ProblemAgitateSolve => "Problem-Agitate-Solve",
    Educational => "Educational",
    Inspirational => "Inspirational",
    Comedy => "Comedy",
    Dramatic => "Dramatic",
    Poetic => "Poetic",
    Investigative => "Investigative",
    Absurdist => "Absurdist",
});

labelled_enum!(Language {
    Vietnamese => "Vietnamese",
    English => "English",
    Chinese => "Chinese",
    Japanese => "Japanese",
});

labelled_enum!(AspectRatio {
    #[value(name = "16:9")]
    Landscape => "16:9",
    #[value(name = "9:16")]
    Portrait => "9:16",
});

impl WritingStyle {
    /// One-line description passed to the prompt next to the style name.
    pub fn description(&self) -> &'static str {
        match self {
            WritingStyle::Storytelling => {
                "Classic narrative arc with a beginning, middle, and end."
            }
            WritingStyle::HookStoryOffer => {
                "Grab attention, tell a compelling story, and present a call to action."
            }
            WritingStyle::ProblemAgitateSolve => {
                "Identify a problem, explore its impact, and offer the solution."
            }
            WritingStyle::Educational => {
                "Informative and instructional, breaking down complex topics."
            }
            WritingStyle::Inspirational => {
                "Motivational and uplifting, designed to evoke positive emotions."
            }
            WritingStyle::Comedy => "Humorous and lighthearted, using wit and jokes.",
            WritingStyle::Dramatic => "Serious and emotional, focusing on conflict and resolution.",
            WritingStyle::Poetic => "Lyrical and artistic, using figurative language.",
            WritingStyle::Investigative => "Journalistic and fact-based, uncovering details.",
            WritingStyle::Absurdist => "Bizarre and nonsensical, challenging logic.",
        }
    }
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Vietnamese => "vi",
            Language::English => "en",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = FormParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.duration_secs, 90);
        assert_eq!(params.aspect_ratio.label(), "16:9");
    }

    #[test]
    fn short_theme_is_rejected() {
        let params = FormParams {
            theme: "   Moon   ".into(),
            ..FormParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, DirectorError::Validation(_)));
        assert!(err.to_string().contains("at least 10 characters"));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let params = FormParams {
            duration_secs: 0,
            ..FormParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn enumerations_have_fixed_sizes() {
        assert_eq!(VisualStyle::ALL.len(), 20);
        assert_eq!(ImageStyle::ALL.len(), 20);
        assert_eq!(WritingStyle::ALL.len(), 10);
        assert_eq!(Language::ALL.len(), 4);
        assert_eq!(AspectRatio::ALL.len(), 2);
    }

    #[test]
    fn labels_and_codes() {
        assert_eq!(VisualStyle::PopArt.to_string(), "Pop Art");
        assert_eq!(ImageStyle::Render3d.label(), "3D Render");
        assert_eq!(Language::Japanese.code(), "ja");
        assert_eq!(
            WritingStyle::Poetic.description(),
            "Lyrical and artistic, using figurative language."
        );
    }

    #[test]
    fn aspect_ratio_parses_from_cli_value() {
        assert_eq!(
            AspectRatio::from_str("9:16", false),
            Ok(AspectRatio::Portrait)
        );
        assert_eq!(
            VisualStyle::from_str("sci-fi", false),
            Ok(VisualStyle::SciFi)
        );
    }
}
