//! # Carousel Block
//!
//! An image carousel block for block-based document editors: an ordered list of images with
//! captions, filled through an uploader and saved as `[{ url, caption }]`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ CarouselBlock: list + pending uploads        │
//! │  - render() → CarouselView (projection)      │
//! │  - save()   → [{url, caption}]               │
//! └──────────────────────────────────────────────┘
//!        ↑ completions (by ItemId)     ↓ jobs
//! ┌──────────────────────────────────────────────┐
//! │ Uploader: local media store | HTTP endpoint  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carousel_block::{CarouselBlock, CarouselConfig, ItemData};
//!
//! let mut block = CarouselBlock::new(
//!     vec![ItemData::new("a.png", "A")],
//!     CarouselConfig::default(),
//!     Box::new(host),
//!     media_dir,
//! )?;
//!
//! // Add control clicked
//! block.on_select_file();
//!
//! // Every frame
//! block.poll_uploads();
//! let view = block.render();
//!
//! // Host saves the document
//! let data = block.save();
//! ```

pub mod carousel;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod host;
pub mod item;
pub mod item_list;
pub mod media;
pub mod paths;
pub mod ui;
pub mod uploader;
pub mod view;

pub use carousel::CarouselBlock;
pub use config::{CarouselConfig, Endpoints, HostSettings, ThemeTokens};
pub use document::{BlockRecord, EditorDocument};
pub use error::{ConfigError, UploadError};
pub use host::{HostApi, HostStyles, Notification, NotificationStyle, Toolbox};
pub use item::{CarouselData, CarouselItem, ItemData, ItemId, ItemState, ItemStatus, PreviewSource};
pub use item_list::CarouselList;
pub use media::{LoadEvent, MediaElement, MediaKind};
pub use uploader::{UploadCompletion, UploadResponse, UploadedFile, Uploader};
pub use view::{CarouselView, ItemBody, ItemNode, ItemView, ListChild};
