//! Centralized constants for default configuration, theme tokens, card sizing, and colors.
//!
//! This module consolidates the strings and magic numbers used by the carousel block and its
//! desktop host so the rest of the crate refers to them by meaning.

use egui::Color32;

// =============================================================================
// CONFIGURATION DEFAULTS
// =============================================================================

/// Form field name the uploaded file is sent under.
pub const DEFAULT_FIELD: &str = "image";

/// MIME filter applied to picked files.
pub const DEFAULT_TYPES: &str = "image/*";

/// Caption placeholder, passed through the host's translator before display.
pub const DEFAULT_CAPTION_PLACEHOLDER: &str = "Caption";

/// Class prefix for the tool's own theme tokens.
pub const DEFAULT_CLASS_PREFIX: &str = "cdxcarousel";

/// Class of the preload indicator, shared with the single image tool.
pub const IMAGE_PRELOADER_CLASS: &str = "image-tool__image-preloader";

// =============================================================================
// USER-FACING MESSAGES (translation keys)
// =============================================================================

/// Label of the add control when no custom button content is configured.
pub const MSG_ADD_IMAGE: &str = "Add Image";

/// Hint of the add-by-url field.
pub const MSG_PASTE_URL: &str = "Paste image url";

/// Notification shown for any failed upload.
pub const MSG_UPLOAD_FAILED: &str = "Can not upload an image, try another";

// =============================================================================
// TOOLBOX
// =============================================================================

/// Title shown in the host's block picker.
pub const TOOLBOX_TITLE: &str = "Carousel";

/// Icon markup shown in the host's block picker.
pub const TOOLBOX_ICON: &str = r#"<svg width="38" height="18" viewBox="0 0 38 18" xmlns="http://www.w3.org/2000/svg"><rect x="10" y="0" width="18" height="18" rx="2"/><path d="M7 13.6L2.7 9 7 4.4 5.7 3 0 9l5.7 6z"/><path d="M31 13.6L35.3 9 31 4.4 32.3 3 38 9l-5.7 6z"/></svg>"#;

/// Glyph drawn in front of the default add label.
pub const ADD_BUTTON_GLYPH: &str = "＋";

/// Glyph of the remove control.
pub const REMOVE_BUTTON_GLYPH: &str = "✕";

// =============================================================================
// MEDIA
// =============================================================================

/// Url suffix that switches the media element to a looping muted video.
pub const VIDEO_SUFFIX: &str = ".mp4";

/// Extensions offered by the file picker for wildcard image filters.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

/// Extensions offered by the file picker for wildcard video filters.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

// =============================================================================
// CARD LAYOUT CONSTANTS
// =============================================================================

/// Width of a single carousel card, including the add card.
pub const CARD_WIDTH: f32 = 180.0;

/// Height of the media area inside a card.
pub const CARD_MEDIA_HEIGHT: f32 = 120.0;

/// Spacing between cards in the carousel strip.
pub const CARD_SPACING: f32 = 12.0;

/// Corner radius of card frames.
pub const CARD_CORNER_RADIUS: f32 = 6.0;

/// Inner margin of card frames.
pub const CARD_INNER_MARGIN: f32 = 6.0;

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// Seconds a toast stays visible in the desktop host.
pub const TOAST_LIFETIME_SECS: f64 = 4.0;

/// Repaint interval while uploads are pending, in milliseconds.
pub const UPLOAD_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// WINDOW CONSTANTS
// =============================================================================

/// Initial window width when the application starts.
pub const INITIAL_WINDOW_WIDTH: f32 = 900.0;

/// Initial window height when the application starts.
pub const INITIAL_WINDOW_HEIGHT: f32 = 600.0;

// =============================================================================
// COLORS
// =============================================================================

/// Card background.
pub const COLOR_CARD_BG: Color32 = Color32::from_rgb(45, 45, 48);

/// Background of the preload indicator when no preview is available.
pub const COLOR_PRELOADER_BG: Color32 = Color32::from_rgb(70, 70, 75);

/// Tint applied to the preview image while an upload is in flight.
pub const COLOR_PREVIEW_TINT: Color32 = Color32::from_rgba_premultiplied(120, 120, 120, 160);

/// Remove control color when hovered.
pub const COLOR_REMOVE_BUTTON_HOVER: Color32 = Color32::from_rgb(255, 100, 100);

/// Remove control color in normal state.
pub const COLOR_REMOVE_BUTTON: Color32 = Color32::RED;

/// Toast background for error notifications.
pub const COLOR_TOAST_ERROR: Color32 = Color32::from_rgb(150, 40, 40);

/// Toast background for any other notification style.
pub const COLOR_TOAST_INFO: Color32 = Color32::from_rgb(40, 80, 140);
