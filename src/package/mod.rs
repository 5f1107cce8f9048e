use crate::error::{DirectorError, Result};
use crate::scene::{Clip, Scene};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything one generation call produces. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPackage {
    pub character_sheet: Vec<Character>,
    pub script: Vec<Scene>,
    pub promotion: Promotion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Opaque id such as `CHAR_01`, referenced by scenes and dialogue
    pub character_id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub thumbnail_prompt: String,
    pub social_media_posts: SocialMediaPosts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMediaPosts {
    pub youtube: SocialPost,
    pub facebook: SocialPost,
    pub tiktok: SocialPost,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub title: String,
    pub description: String,
    pub hashtags: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Youtube,
    Facebook,
    Tiktok,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Youtube, Platform::Facebook, Platform::Tiktok];
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Youtube => "YouTube",
            Platform::Facebook => "Facebook",
            Platform::Tiktok => "TikTok",
        };
        f.write_str(name)
    }
}

impl Promotion {
    pub fn post(&self, platform: Platform) -> &SocialPost {
        let posts = &self.social_media_posts;
        match platform {
            Platform::Youtube => &posts.youtube,
            Platform::Facebook => &posts.facebook,
            Platform::Tiktok => &posts.tiktok,
        }
    }
}

/// Location of a clip inside a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRef {
    pub scene_number: u32,
    /// 0-based position inside `clip_sequence`
    pub clip_index: usize,
}

impl ProductionPackage {
    /// Direct structural decode of the model's JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn character(&self, character_id: &str) -> Option<&Character> {
        self.character_sheet
            .iter()
            .find(|c| c.character_id == character_id)
    }

    pub fn scene(&self, scene_number: u32) -> Option<&Scene> {
        self.script.iter().find(|s| s.scene_number == scene_number)
    }

    /// Looks up a clip by scene number and 0-based clip index.
    pub fn clip(&self, scene_number: u32, clip_index: usize) -> Result<&Clip> {
        let scene = self
            .scene(scene_number)
            .ok_or_else(|| DirectorError::NotFound(format!("scene {}", scene_number)))?;
        scene.clip_sequence.get(clip_index).ok_or_else(|| {
            DirectorError::NotFound(format!(
                "clip {} in scene {} ({} clips)",
                clip_index + 1,
                scene_number,
                scene.clip_sequence.len()
            ))
        })
    }

    /// Every clip in timeline order.
    pub fn clips(&self) -> impl Iterator<Item = &Clip> {
        self.script.iter().flat_map(|scene| scene.clip_sequence.iter())
    }

    /// Clips whose dialogue asks for burned-in subtitles.
    pub fn subtitle_flag_violations(&self) -> Vec<ClipRef> {
        self.script
            .iter()
            .flat_map(|scene| {
                scene
                    .clip_sequence
                    .iter()
                    .enumerate()
                    .filter(|(_, clip)| clip.dialogue.as_ref().is_some_and(|d| d.subtitles))
                    .map(move |(clip_index, _)| ClipRef {
                        scene_number: scene.scene_number,
                        clip_index,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "character_sheet": [
            { "character_id": "CHAR_01", "description": "Astronaut in a scuffed white suit" }
        ],
        "script": [
            {
                "scene_number": 1,
                "scene_title": "Landing",
                "key_image_prompt": "A grey moon under a black sky",
                "characters_in_scene": ["CHAR_01"],
                "clip_sequence": [
                    { "narration_clip": "Silence." },
                    { "dialogue": { "character": "CHAR_01", "line": "Hello?", "subtitles": true } }
                ]
            }
        ],
        "promotion": {
            "thumbnail_prompt": "Astronaut and glowing plant",
            "social_media_posts": {
                "youtube": { "title": "Y", "description": "yd", "hashtags": "#moon" },
                "facebook": { "title": "F", "description": "fd", "hashtags": "#space" },
                "tiktok": { "title": "T", "description": "td", "hashtags": "#fyp" }
            }
        }
    }"##;

    #[test]
    fn decodes_full_package() {
        let package = ProductionPackage::from_json(SAMPLE).unwrap();

        assert_eq!(package.character_sheet.len(), 1);
        assert_eq!(
            package.character("CHAR_01").map(|c| c.description.as_str()),
            Some("Astronaut in a scuffed white suit")
        );
        assert_eq!(package.clips().count(), 2);
        assert_eq!(package.promotion.post(Platform::Tiktok).hashtags, "#fyp");
    }

    #[test]
    fn missing_top_level_key_is_a_parse_error() {
        let err = ProductionPackage::from_json(r#"{ "character_sheet": [], "script": [] }"#)
            .unwrap_err();
        assert!(matches!(err, DirectorError::Json(_)));
    }

    #[test]
    fn clip_lookup_reports_what_is_missing() {
        let package = ProductionPackage::from_json(SAMPLE).unwrap();

        assert!(package.clip(1, 1).is_ok());
        assert!(matches!(package.clip(2, 0), Err(DirectorError::NotFound(_))));
        let err = package.clip(1, 5).unwrap_err();
        assert_eq!(err.to_string(), "Not found: clip 6 in scene 1 (2 clips)");
    }

    #[test]
    fn finds_clips_requesting_subtitles() {
        let package = ProductionPackage::from_json(SAMPLE).unwrap();
        assert_eq!(
            package.subtitle_flag_violations(),
            vec![ClipRef {
                scene_number: 1,
                clip_index: 1
            }]
        );
    }
}
