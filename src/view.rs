//! Visual projection of a carousel block.
//!
//! `render` never owns state: it walks the item list and produces a tree of plain nodes that a
//! frontend draws. The tree mirrors the markup of the editor plugin:
//!
//! ```text
//! <wrapper>
//!   <list>
//!     <block><item> url · remove · (preloader | media + caption) </item></block>
//!     ...
//!     <block><add-button/></block>
//!   </list>
//! </wrapper>
//! ```

use crate::config::CarouselConfig;
use crate::constants::{ADD_BUTTON_GLYPH, IMAGE_PRELOADER_CLASS, MSG_ADD_IMAGE, MSG_PASTE_URL};
use crate::host::HostStyles;
use crate::item::{CarouselItem, ItemId};
use crate::media::MediaElement;

/// Resolved class names for every node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    pub base: String,
    pub loading: String,
    pub input: String,
    pub button: String,
    pub wrapper: String,
    pub add_button: String,
    pub block: String,
    pub item: String,
    pub remove_button: String,
    pub input_url: String,
    pub caption: String,
    pub list: String,
    pub image_preloader: String,
}

impl ClassNames {
    pub fn new(prefix: &str, styles: &HostStyles) -> Self {
        Self {
            base: styles.block.clone(),
            loading: styles.loader.clone(),
            input: styles.input.clone(),
            button: styles.button.clone(),
            wrapper: format!("{prefix}-wrapper"),
            add_button: format!("{prefix}-addImage"),
            block: format!("{prefix}-block"),
            item: format!("{prefix}-item"),
            remove_button: format!("{prefix}-removeBtn"),
            input_url: format!("{prefix}-inputUrl"),
            caption: format!("{prefix}-caption"),
            list: format!("{prefix}-list"),
            image_preloader: IMAGE_PRELOADER_CLASS.to_string(),
        }
    }
}

/// Everything an item view needs besides the item itself.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub classes: ClassNames,
    pub caption_placeholder: String,
    pub add_label: String,
    pub url_hint: String,
}

impl ViewContext {
    /// Builds the context from config; `translate` is the host's i18n function.
    pub fn new(config: &CarouselConfig, styles: &HostStyles, translate: impl Fn(&str) -> String) -> Self {
        let add_label = if config.button_content.is_empty() {
            format!("{ADD_BUTTON_GLYPH} {}", translate(MSG_ADD_IMAGE))
        } else {
            config.button_content.clone()
        };
        Self {
            classes: ClassNames::new(&config.theme.class_prefix, styles),
            caption_placeholder: translate(&config.caption_placeholder),
            add_label,
            url_hint: translate(MSG_PASTE_URL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselView {
    pub classes: Vec<String>,
    pub list: ListNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub classes: Vec<String>,
    pub children: Vec<ListChild>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChild {
    Item(ItemNode),
    AddControl(AddControl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddControl {
    pub classes: Vec<String>,
    pub label: String,
    /// Hint of the field that adds an item from a remote url.
    pub url_hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemNode {
    pub id: ItemId,
    pub classes: Vec<String>,
    /// Value of the hidden url field; empty for placeholders.
    pub url_field: String,
    pub remove: RemoveControl,
    pub body: ItemBody,
}

/// Activating the control removes `target` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveControl {
    pub classes: Vec<String>,
    pub target: ItemId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemBody {
    Placeholder(Preloader),
    Filled {
        media: MediaElement,
        /// Shown until the media element fires its load event.
        preloader: Option<Preloader>,
        caption: CaptionField,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preloader {
    pub classes: Vec<String>,
    /// Background image uri, set from the preview source while uploading.
    pub background: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionField {
    pub classes: Vec<String>,
    pub value: String,
    pub placeholder: String,
}

pub struct ItemView;

impl ItemView {
    pub fn build(item: &CarouselItem, ctx: &ViewContext) -> ItemNode {
        let classes = &ctx.classes;
        let body = match item.media() {
            Some(media) => ItemBody::Filled {
                preloader: (!item.media_loaded()).then(|| Preloader {
                    classes: vec![classes.image_preloader.clone()],
                    background: None,
                }),
                media,
                caption: CaptionField {
                    classes: vec![classes.caption.clone(), classes.input.clone()],
                    value: item.caption.clone(),
                    placeholder: ctx.caption_placeholder.clone(),
                },
            },
            None => ItemBody::Placeholder(Preloader {
                classes: vec![classes.image_preloader.clone()],
                background: item.preview().map(|p| p.uri().to_string()),
            }),
        };

        ItemNode {
            id: item.id,
            classes: vec![
                classes.item.clone(),
                format!("{}--{}", classes.item, item.status().class_suffix()),
            ],
            url_field: item.url.clone(),
            remove: RemoveControl {
                classes: vec![classes.remove_button.clone()],
                target: item.id,
            },
            body,
        }
    }
}

pub fn render(items: &[CarouselItem], ctx: &ViewContext) -> CarouselView {
    let classes = &ctx.classes;
    let mut children: Vec<ListChild> = items
        .iter()
        .map(|item| ListChild::Item(ItemView::build(item, ctx)))
        .collect();
    children.push(ListChild::AddControl(AddControl {
        classes: vec![classes.button.clone(), classes.add_button.clone()],
        label: ctx.add_label.clone(),
        url_hint: ctx.url_hint.clone(),
    }));

    CarouselView {
        classes: vec![classes.wrapper.clone()],
        list: ListNode {
            classes: vec![classes.list.clone()],
            children,
        },
    }
}

impl CarouselView {
    /// Item nodes in display order, without the add control.
    pub fn items(&self) -> impl Iterator<Item = &ItemNode> {
        self.list.children.iter().filter_map(|child| match child {
            ListChild::Item(item) => Some(item),
            ListChild::AddControl(_) => None,
        })
    }
}
