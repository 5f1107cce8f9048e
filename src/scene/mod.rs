use serde::{Deserialize, Serialize};

/// One scene of the script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene number as returned by the model (1-based)
    pub scene_number: u32,
    /// Short title
    pub scene_title: String,
    /// Prompt for a text-to-image model
    pub key_image_prompt: String,
    /// `character_id`s appearing in the scene
    #[serde(default)]
    pub characters_in_scene: Vec<String>,
    #[serde(default)]
    pub location_details: String,
    #[serde(default)]
    pub lighting_tone: String,
    #[serde(default)]
    pub color_palette: String,
    /// Ordered shots; order defines the subtitle timeline
    #[serde(default)]
    pub clip_sequence: Vec<Clip>,
}

/// Smallest unit of a scene. Every clip nominally lasts
/// [`crate::subtitle::CLIP_DURATION_SECS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    #[serde(default)]
    pub shot: Shot,
    #[serde(default)]
    pub subject: Subject,
    #[serde(default)]
    pub scene: Setting,
    #[serde(default)]
    pub visual_details: VisualDetails,
    #[serde(default)]
    pub cinematography: Cinematography,
    #[serde(default)]
    pub audio: Audio,
    #[serde(default)]
    pub color_palette: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialogue: Option<Dialogue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration_clip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shot {
    pub composition: String,
    pub camera_motion: String,
    pub frame_rate: String,
    pub film_grain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subject {
    pub description: String,
    pub wardrobe: String,
}

/// The clip's `scene` object (location, not the enclosing [`Scene`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Setting {
    pub location: String,
    pub time_of_day: String,
    pub environment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualDetails {
    pub action: String,
    pub props: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cinematography {
    pub lighting: String,
    pub tone: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Audio {
    pub ambient: String,
    pub voice: Voice,
    pub music: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Voice {
    pub tone: String,
    pub style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialogue {
    /// `character_id` of the speaker
    pub character: String,
    pub line: String,
    /// Must always be false; burned-in subtitles break the VEO pipeline.
    pub subtitles: bool,
}

impl Clip {
    /// Narration text, if any non-blank text is present.
    pub fn narration(&self) -> Option<&str> {
        self.narration_clip
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Dialogue with a non-blank line.
    pub fn spoken_dialogue(&self) -> Option<&Dialogue> {
        self.dialogue
            .as_ref()
            .filter(|dialogue| !dialogue.line.trim().is_empty())
    }
}

impl Scene {
    pub fn new(scene_number: u32, scene_title: String, key_image_prompt: String) -> Self {
        Self {
            scene_number,
            scene_title,
            key_image_prompt,
            characters_in_scene: Vec::new(),
            location_details: String::new(),
            lighting_tone: String::new(),
            color_palette: String::new(),
            clip_sequence: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_clip_with_missing_optional_parts() {
        let clip: Clip = serde_json::from_str(
            r#"{
                "shot": { "composition": "Medium shot, 50mm lens", "camera_motion": "Slow pan left" },
                "audio": { "ambient": "wind", "voice": { "tone": "Calm" } },
                "narration_clip": "The final moment had arrived."
            }"#,
        )
        .unwrap();

        assert_eq!(clip.shot.composition, "Medium shot, 50mm lens");
        assert_eq!(clip.shot.frame_rate, "");
        assert_eq!(clip.audio.voice.tone, "Calm");
        assert!(clip.dialogue.is_none());
        assert_eq!(clip.narration(), Some("The final moment had arrived."));
    }

    #[test]
    fn blank_text_is_not_spoken() {
        let clip = Clip {
            narration_clip: Some("   ".into()),
            dialogue: Some(Dialogue {
                character: "CHAR_01".into(),
                line: "\n".into(),
                subtitles: false,
            }),
            ..Clip::default()
        };

        assert!(clip.narration().is_none());
        assert!(clip.spoken_dialogue().is_none());
    }

    #[test]
    fn scene_requires_identity_fields() {
        let missing_title = r#"{ "scene_number": 1, "key_image_prompt": "moon" }"#;
        assert!(serde_json::from_str::<Scene>(missing_title).is_err());

        let scene: Scene = serde_json::from_str(
            r#"{ "scene_number": 2, "scene_title": "Contact", "key_image_prompt": "moon" }"#,
        )
        .unwrap();
        assert_eq!(scene, Scene::new(2, "Contact".into(), "moon".into()));
    }
}
