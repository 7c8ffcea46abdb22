use crate::media::{LoadEvent, MediaElement};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Persisted form of one carousel entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemData {
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

impl ItemData {
    pub fn new(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: caption.into(),
        }
    }
}

/// Saved data of a whole carousel block, in display order.
pub type CarouselData = Vec<ItemData>;

/// Stable handle of an item for the lifetime of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Local representation of a picked file, shown until the upload resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSource(pub String);

impl PreviewSource {
    pub fn uri(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    /// Hydrated from a record without a url.
    Empty,
    /// Waiting for its upload; shows the preview as background when one exists.
    Uploading { preview: Option<PreviewSource> },
    /// Has a resolved url. `media_loaded` flips once the media element reports its load event.
    Filled { media_loaded: bool },
}

/// Coarse status used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Empty,
    Uploading,
    Filled,
}

impl ItemStatus {
    pub fn class_suffix(self) -> &'static str {
        match self {
            ItemStatus::Empty => "empty",
            ItemStatus::Uploading => "loading",
            ItemStatus::Filled => "filled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselItem {
    pub id: ItemId,
    pub url: String,
    pub caption: String,
    pub state: ItemState,
}

impl CarouselItem {
    pub fn from_data(data: &ItemData) -> Self {
        let state = if data.url.is_empty() {
            ItemState::Empty
        } else {
            ItemState::Filled {
                media_loaded: false,
            }
        };
        Self {
            id: ItemId::new(),
            url: data.url.clone(),
            caption: data.caption.clone(),
            state,
        }
    }

    pub fn placeholder(preview: Option<PreviewSource>) -> Self {
        Self {
            id: ItemId::new(),
            url: String::new(),
            caption: String::new(),
            state: ItemState::Uploading { preview },
        }
    }

    pub fn status(&self) -> ItemStatus {
        match self.state {
            ItemState::Empty => ItemStatus::Empty,
            ItemState::Uploading { .. } => ItemStatus::Uploading,
            ItemState::Filled { .. } => ItemStatus::Filled,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.url.is_empty()
    }

    pub fn preview(&self) -> Option<&PreviewSource> {
        match &self.state {
            ItemState::Uploading { preview } => preview.as_ref(),
            _ => None,
        }
    }

    pub fn media(&self) -> Option<MediaElement> {
        (!self.url.is_empty()).then(|| MediaElement::for_url(&self.url))
    }

    pub fn media_loaded(&self) -> bool {
        matches!(self.state, ItemState::Filled { media_loaded: true })
    }

    /// Stores the resolved url and drops the preview. Returns false if the item already had one
    /// or `url` is blank.
    pub fn fill(&mut self, url: &str) -> bool {
        if !self.is_placeholder() || url.trim().is_empty() {
            return false;
        }
        self.url = url.to_string();
        self.state = ItemState::Filled {
            media_loaded: false,
        };
        true
    }

    /// Applies a media load event. Only the event matching the element kind counts.
    pub fn apply_load_event(&mut self, event: LoadEvent) -> bool {
        let Some(media) = self.media() else {
            return false;
        };
        if media.load_event() != event {
            return false;
        }
        match &mut self.state {
            ItemState::Filled { media_loaded } if !*media_loaded => {
                *media_loaded = true;
                true
            }
            _ => false,
        }
    }

    pub fn to_data(&self) -> ItemData {
        ItemData {
            url: self.url.clone(),
            caption: self.caption.clone(),
        }
    }
}
