//! Scene data handed to the external video renderer.
//!
//! The renderer consumes a JSON document of frame-addressed scenes; this
//! module only authors and validates that data. Scene kinds are a tagged
//! union dispatched on the `type` field, so each kind carries exactly the
//! fields its template needs.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FPS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub start_frame: u32,
    pub duration_frames: u32,
    pub duration_ms: u32,
    #[serde(flatten)]
    pub kind: SceneKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum SceneKind {
    Opening {
        text: String,
        audio_file: String,
    },
    Detailed {
        rank: u32,
        title: String,
        text: String,
        key_point: String,
        source: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        audio_file: String,
    },
    Quick {
        items: Vec<QuickItem>,
        audio_files: Vec<String>,
    },
    Closing {
        text: String,
        audio_file: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickItem {
    pub rank: u32,
    pub title: String,
    pub text: String,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoScript {
    pub date: String,
    pub fps: u32,
    pub total_frames: u32,
    pub scenes: Vec<Scene>,
}

impl VideoScript {
    /// Scenes must sit back-to-back-or-later on the single track: ascending,
    /// non-overlapping, and collectively within `total_frames`.
    pub fn validate(&self) -> Result<()> {
        let mut cursor = 0u32;
        for scene in &self.scenes {
            if scene.start_frame < cursor {
                bail!(
                    "scene '{}' starts at frame {} but the previous scene runs to {}",
                    scene.id,
                    scene.start_frame,
                    cursor
                );
            }
            cursor = scene.start_frame + scene.duration_frames;
        }
        if cursor > self.total_frames {
            bail!(
                "scenes run to frame {} past totalFrames {}",
                cursor,
                self.total_frames
            );
        }
        Ok(())
    }
}

/// Lays scenes out sequentially: each appended scene starts where the
/// previous one ended, with audio durations converted to frames at the
/// configured fps.
pub struct ScriptBuilder {
    fps: u32,
    cursor: u32,
    scenes: Vec<Scene>,
}

impl ScriptBuilder {
    pub fn new(fps: u32) -> Self {
        Self {
            fps,
            cursor: 0,
            scenes: Vec::new(),
        }
    }

    fn ms_to_frames(&self, ms: u32) -> u32 {
        (u64::from(ms) * u64::from(self.fps) / 1000) as u32
    }

    fn push(&mut self, id: impl Into<String>, duration_ms: u32, kind: SceneKind) -> &mut Self {
        let duration_frames = self.ms_to_frames(duration_ms);
        self.scenes.push(Scene {
            id: id.into(),
            start_frame: self.cursor,
            duration_frames,
            duration_ms,
            kind,
        });
        self.cursor += duration_frames;
        self
    }

    pub fn opening(&mut self, text: impl Into<String>, audio_file: impl Into<String>, duration_ms: u32) -> &mut Self {
        self.push(
            "opening",
            duration_ms,
            SceneKind::Opening {
                text: text.into(),
                audio_file: audio_file.into(),
            },
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn detailed(
        &mut self,
        index: u32,
        rank: u32,
        title: impl Into<String>,
        text: impl Into<String>,
        key_point: impl Into<String>,
        source: impl Into<String>,
        duration_ms: u32,
    ) -> &mut Self {
        let id = format!("detailed_{index}");
        let audio_file = format!("assets/audio/{id}.mp3");
        self.push(
            id,
            duration_ms,
            SceneKind::Detailed {
                rank,
                title: title.into(),
                text: text.into(),
                key_point: key_point.into(),
                source: source.into(),
                url: None,
                audio_file,
            },
        )
    }

    /// One combined scene for the quick-fire items; its duration is the sum
    /// of the per-item audio durations.
    pub fn quick(&mut self, items: Vec<QuickItem>) -> &mut Self {
        if items.is_empty() {
            return self;
        }
        let total_ms: u32 = items.iter().map(|i| i.duration_ms).sum();
        let audio_files = (1..=items.len())
            .map(|i| format!("assets/audio/quick_{i}.mp3"))
            .collect();
        self.push(
            "quick_summary",
            total_ms,
            SceneKind::Quick { items, audio_files },
        )
    }

    pub fn closing(&mut self, text: impl Into<String>, audio_file: impl Into<String>, duration_ms: u32) -> &mut Self {
        self.push(
            "closing",
            duration_ms,
            SceneKind::Closing {
                text: text.into(),
                audio_file: audio_file.into(),
            },
        )
    }

    pub fn build(&mut self, date: impl Into<String>) -> VideoScript {
        VideoScript {
            date: date.into(),
            fps: self.fps,
            total_frames: self.cursor,
            scenes: std::mem::take(&mut self.scenes),
        }
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}
