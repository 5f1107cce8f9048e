//! SubRip transcript derived from a production package.
//!
//! The timeline is clip-indexed: every clip occupies [`CLIP_DURATION_SECS`]
//! whether or not it carries text, and a cue lasts for the larger of the
//! narration and dialogue allocations of its clip.

use crate::error::Result;
use crate::package::ProductionPackage;
use crate::scene::Clip;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CLIP_DURATION_SECS: f64 = 8.0;
pub const NARRATION_SHARE: f64 = 0.5;
pub const DIALOGUE_SHARE: f64 = 0.3;

pub const SRT_FILE_NAME: &str = "subtitles.srt";
pub const SRT_MIME_TYPE: &str = "text/plain";

/// One numbered SubRip cue.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    /// Narration first, then `speaker: line`
    pub lines: Vec<String>,
}

impl SubtitleEntry {
    fn from_clip(index: usize, start: f64, clip: &Clip) -> Option<Self> {
        let narration = clip.narration();
        let dialogue = clip.spoken_dialogue();
        if narration.is_none() && dialogue.is_none() {
            return None;
        }

        let narration_time = if narration.is_some() {
            CLIP_DURATION_SECS * NARRATION_SHARE
        } else {
            0.0
        };
        let dialogue_time = if dialogue.is_some() {
            CLIP_DURATION_SECS * DIALOGUE_SHARE
        } else {
            0.0
        };

        let mut lines = Vec::with_capacity(2);
        if let Some(text) = narration {
            lines.push(text.to_string());
        }
        if let Some(d) = dialogue {
            lines.push(format!("{}: {}", d.character, d.line));
        }

        Some(Self {
            index,
            start,
            end: start + narration_time.max(dialogue_time),
            lines,
        })
    }
}

/// Walks scenes then clips in order and emits a cue for every clip with text.
pub fn build_entries(package: &ProductionPackage) -> Vec<SubtitleEntry> {
    let mut entries = Vec::new();
    for (position, clip) in package.clips().enumerate() {
        let start = position as f64 * CLIP_DURATION_SECS;
        if let Some(entry) = SubtitleEntry::from_clip(entries.len() + 1, start, clip) {
            entries.push(entry);
        }
    }
    entries
}

/// `HH:MM:SS,mmm`; hours are not capped at 99.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60,
        ms
    )
}

pub fn render(entries: &[SubtitleEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "{}\n{} --> {}\n",
            entry.index,
            format_timestamp(entry.start),
            format_timestamp(entry.end)
        ));
        for line in &entry.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

pub fn to_srt(package: &ProductionPackage) -> String {
    render(&build_entries(package))
}

/// Writes `subtitles.srt` into `dir` and returns its path.
pub async fn write_srt(package: &ProductionPackage, dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(SRT_FILE_NAME);
    let entries = build_entries(package);
    tokio::fs::write(&path, render(&entries)).await?;
    info!("Wrote {} subtitles to {}", entries.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{Promotion, SocialMediaPosts, SocialPost};
    use crate::scene::{Dialogue, Scene};

    fn narration(text: &str) -> Clip {
        Clip {
            narration_clip: Some(text.into()),
            ..Clip::default()
        }
    }

    fn dialogue(speaker: &str, line: &str) -> Clip {
        Clip {
            dialogue: Some(Dialogue {
                character: speaker.into(),
                line: line.into(),
                subtitles: false,
            }),
            ..Clip::default()
        }
    }

    fn package(scenes: Vec<Vec<Clip>>) -> ProductionPackage {
        let script = scenes
            .into_iter()
            .enumerate()
            .map(|(i, clips)| {
                let mut scene = Scene::new(i as u32 + 1, format!("Scene {}", i + 1), "prompt".into());
                scene.clip_sequence = clips;
                scene
            })
            .collect();
        ProductionPackage {
            character_sheet: Vec::new(),
            script,
            promotion: Promotion {
                thumbnail_prompt: String::new(),
                social_media_posts: SocialMediaPosts {
                    youtube: SocialPost::default(),
                    facebook: SocialPost::default(),
                    tiktok: SocialPost::default(),
                },
            },
        }
    }

    #[test]
    fn formats_timestamps() {
        assert_eq!(format_timestamp(125.4), "00:02:05,400");
        assert_eq!(format_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_timestamp(2.4), "00:00:02,400");
        assert_eq!(format_timestamp(3725.0), "01:02:05,000");
        assert_eq!(format_timestamp(360_000.5), "100:00:00,500");
    }

    #[test]
    fn rounding_carries_into_seconds() {
        assert_eq!(format_timestamp(59.9996), "00:01:00,000");
    }

    #[test]
    fn allocation_uses_max_not_sum() {
        let mut both = dialogue("CHAR_01", "Hello?");
        both.narration_clip = Some("Dust settles.".into());
        let pkg = package(vec![vec![narration("Silence."), dialogue("CHAR_02", "Hi."), both]]);

        let entries = build_entries(&pkg);
        let spans: Vec<(f64, f64)> = entries.iter().map(|e| (e.start, e.end)).collect();
        assert_eq!(spans, vec![(0.0, 4.0), (8.0, 8.0 + 2.4), (16.0, 20.0)]);
        assert_eq!(entries[2].lines, vec!["Dust settles.", "CHAR_01: Hello?"]);
    }

    #[test]
    fn silent_clip_still_advances_timeline() {
        let pkg = package(vec![
            vec![narration("One."), Clip::default()],
            vec![narration("   "), narration("Two.")],
        ]);

        let entries = build_entries(&pkg);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].index, 2);
        assert_eq!(entries[1].start, 24.0);
    }

    #[test]
    fn three_clip_scene_end_to_end() {
        let pkg = package(vec![vec![
            narration("The moon was quiet."),
            dialogue("CHAR_01", "Is anyone there?"),
            Clip::default(),
        ]]);

        let expected = "1\n\
                        00:00:00,000 --> 00:00:04,000\n\
                        The moon was quiet.\n\
                        \n\
                        2\n\
                        00:00:08,000 --> 00:00:10,400\n\
                        CHAR_01: Is anyone there?\n\
                        \n";
        assert_eq!(to_srt(&pkg), expected);
    }

    #[test]
    fn output_is_deterministic() {
        let pkg = package(vec![vec![narration("a"), dialogue("B", "c")]]);
        assert_eq!(to_srt(&pkg), to_srt(&pkg.clone()));
    }

    #[test]
    fn empty_package_renders_nothing() {
        assert_eq!(to_srt(&package(vec![])), "");
    }

    #[tokio::test]
    async fn writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = package(vec![vec![narration("Hello.")]]);

        let path = write_srt(&pkg, dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), SRT_FILE_NAME);
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.starts_with("1\n00:00:00,000 --> 00:00:04,000\nHello.\n"));
    }
}
