//! Exercise records

use serde::{Deserialize, Serialize};

const YOUTUBE_EMBED_PREFIX: &str = "//www.youtube.com/embed/";

/// A single exercise from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_path: String,
    #[serde(default)]
    pub audio_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure: Option<String>,
    /// YouTube video ids
    #[serde(default)]
    pub videos: Vec<String>,
}

impl Exercise {
    /// Create an exercise without procedure or videos
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        image_path: impl Into<String>,
        audio_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: description.into(),
            image_path: image_path.into(),
            audio_path: audio_path.into(),
            procedure: None,
            videos: Vec::new(),
        }
    }

    /// Create an empty exercise for the builder
    pub fn blank() -> Self {
        Self::new("", "", "", "", "")
    }

    pub fn with_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.procedure = Some(procedure.into());
        self
    }

    pub fn with_videos<I, S>(mut self, videos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.videos = videos.into_iter().map(Into::into).collect();
        self
    }

    /// Embed URL for the video at `index`, if there is one
    pub fn video_embed_url(&self, index: usize) -> Option<String> {
        self.videos
            .get(index)
            .filter(|id| !id.is_empty())
            .map(|id| format!("{}{}", YOUTUBE_EMBED_PREFIX, id))
    }
}
