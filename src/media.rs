//! Media element selection for filled carousel items.
//!
//! The element kind is sniffed from the url string alone: a url ending in `.mp4` becomes a
//! silent looping video, everything else an image. Each kind reports readiness through its own
//! load event.

use crate::constants::VIDEO_SUFFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Event a media element fires once it can be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    /// Image finished loading (`load`).
    Load,
    /// Video decoded its first frame (`loadeddata`).
    LoadedData,
}

impl MediaKind {
    pub fn for_url(url: &str) -> Self {
        if url.ends_with(VIDEO_SUFFIX) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    pub fn load_event(self) -> LoadEvent {
        match self {
            MediaKind::Image => LoadEvent::Load,
            MediaKind::Video => LoadEvent::LoadedData,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            MediaKind::Image => "img",
            MediaKind::Video => "video",
        }
    }
}

impl LoadEvent {
    pub fn name(self) -> &'static str {
        match self {
            LoadEvent::Load => "load",
            LoadEvent::LoadedData => "loadeddata",
        }
    }
}

/// The element that displays a resolved url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaElement {
    pub kind: MediaKind,
    pub src: String,
    pub autoplay: bool,
    pub looping: bool,
    pub muted: bool,
    pub plays_inline: bool,
}

impl MediaElement {
    pub fn for_url(url: &str) -> Self {
        let kind = MediaKind::for_url(url);
        // Videos play like a gif: muted, looping, inline.
        let gif_like = kind == MediaKind::Video;
        Self {
            kind,
            src: url.to_string(),
            autoplay: gif_like,
            looping: gif_like,
            muted: gif_like,
            plays_inline: gif_like,
        }
    }

    pub fn load_event(&self) -> LoadEvent {
        self.kind.load_event()
    }
}
