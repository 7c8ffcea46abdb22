//! Draws a carousel block's projection with egui and feeds user actions back into the block.

use crate::carousel::CarouselBlock;
use crate::constants::{
    CARD_CORNER_RADIUS, CARD_INNER_MARGIN, CARD_MEDIA_HEIGHT, CARD_SPACING, CARD_WIDTH,
    COLOR_CARD_BG, COLOR_PRELOADER_BG, COLOR_PREVIEW_TINT, COLOR_REMOVE_BUTTON,
    COLOR_REMOVE_BUTTON_HOVER, REMOVE_BUTTON_GLYPH,
};
use crate::item::ItemId;
use crate::media::{LoadEvent, MediaElement, MediaKind};
use crate::view::{AddControl, CaptionField, ItemBody, ItemNode, ListChild, Preloader};
use egui::load::{SizeHint, TexturePoll};
use egui::{vec2, Align2, Color32, FontId, Sense, Vec2};
use std::hash::Hash;

/// What the user did to a block during one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockAction {
    SelectFile,
    AddUrl(String),
    Remove(ItemId),
    Caption(ItemId, String),
    MediaLoaded(ItemId, LoadEvent),
}

/// Shows `block` as a horizontal strip of cards and applies what the user did.
pub fn show(ui: &mut egui::Ui, id_salt: impl Hash, block: &mut CarouselBlock) {
    let view = block.render();
    let mut actions = Vec::new();

    egui::ScrollArea::horizontal()
        .id_salt(id_salt)
        .show(ui, |ui| {
            ui.horizontal_top(|ui| {
                ui.spacing_mut().item_spacing.x = CARD_SPACING;
                for child in &view.list.children {
                    match child {
                        ListChild::Item(node) => item_card(ui, node, &mut actions),
                        ListChild::AddControl(add) => add_card(ui, add, &mut actions),
                    }
                }
            });
        });

    for action in actions {
        apply(block, action);
    }
}

pub fn apply(block: &mut CarouselBlock, action: BlockAction) {
    match action {
        BlockAction::SelectFile => block.on_select_file(),
        BlockAction::AddUrl(url) => block.add_by_url(&url),
        BlockAction::Remove(id) => {
            block.remove_item(id);
        }
        BlockAction::Caption(id, text) => {
            block.set_caption(id, &text);
        }
        BlockAction::MediaLoaded(id, event) => {
            block.on_media_event(id, event);
        }
    }
}

fn card_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(COLOR_CARD_BG)
        .rounding(CARD_CORNER_RADIUS)
        .inner_margin(CARD_INNER_MARGIN)
}

fn media_size() -> Vec2 {
    vec2(CARD_WIDTH, CARD_MEDIA_HEIGHT)
}

fn item_card(ui: &mut egui::Ui, node: &ItemNode, actions: &mut Vec<BlockAction>) {
    card_frame().show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            if remove_button(ui) {
                actions.push(BlockAction::Remove(node.remove.target));
            }
            match &node.body {
                ItemBody::Placeholder(preloader) => preloader_view(ui, preloader),
                ItemBody::Filled {
                    media,
                    preloader,
                    caption,
                } => {
                    media_view(ui, node.id, media, preloader.is_some(), actions);
                    if preloader.is_some() {
                        ui.spinner();
                    }
                    caption_field(ui, node.id, caption, actions);
                }
            }
        });
    });
}

fn remove_button(ui: &mut egui::Ui) -> bool {
    let size = ui.spacing().interact_size.y;
    let (rect, response) = ui.allocate_exact_size(vec2(CARD_WIDTH, size), Sense::hover());
    let button_rect = egui::Rect::from_min_size(rect.right_top() - vec2(size, 0.0), vec2(size, size));
    let button = ui.interact(button_rect, response.id.with("remove"), Sense::click());
    let color = if button.hovered() {
        COLOR_REMOVE_BUTTON_HOVER
    } else {
        COLOR_REMOVE_BUTTON
    };
    ui.painter().text(
        button_rect.center(),
        Align2::CENTER_CENTER,
        REMOVE_BUTTON_GLYPH,
        FontId::proportional(size * 0.7),
        color,
    );
    button.clicked()
}

fn preloader_view(ui: &mut egui::Ui, preloader: &Preloader) {
    match &preloader.background {
        Some(uri) => {
            ui.add(
                egui::Image::new(uri.as_str())
                    .fit_to_exact_size(media_size())
                    .tint(COLOR_PREVIEW_TINT),
            );
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(media_size(), Sense::hover());
            ui.painter()
                .rect_filled(rect, CARD_CORNER_RADIUS, COLOR_PRELOADER_BG);
        }
    }
    ui.spinner();
}

fn media_view(
    ui: &mut egui::Ui,
    id: ItemId,
    media: &MediaElement,
    waiting: bool,
    actions: &mut Vec<BlockAction>,
) {
    match media.kind {
        MediaKind::Image => {
            ui.add(
                egui::Image::new(media.src.as_str())
                    .fit_to_exact_size(media_size())
                    .maintain_aspect_ratio(true),
            )
            .on_hover_text(media.src.as_str());
            if waiting && image_ready(ui.ctx(), &media.src) {
                actions.push(BlockAction::MediaLoaded(id, media.load_event()));
            }
        }
        MediaKind::Video => {
            let (rect, response) = ui.allocate_exact_size(media_size(), Sense::hover());
            ui.painter()
                .rect_filled(rect, CARD_CORNER_RADIUS, COLOR_PRELOADER_BG);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                "▶",
                FontId::proportional(CARD_MEDIA_HEIGHT * 0.3),
                Color32::WHITE,
            );
            response.on_hover_text(media.src.as_str());
            // egui has no video decoder; the painted poster stands in for the first frame.
            if waiting {
                actions.push(BlockAction::MediaLoaded(id, media.load_event()));
            }
        }
    }
}

fn image_ready(ctx: &egui::Context, uri: &str) -> bool {
    matches!(
        ctx.try_load_texture(uri, egui::TextureOptions::default(), SizeHint::default()),
        Ok(TexturePoll::Ready { .. })
    )
}

fn caption_field(
    ui: &mut egui::Ui,
    id: ItemId,
    caption: &CaptionField,
    actions: &mut Vec<BlockAction>,
) {
    let mut text = caption.value.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut text)
            .hint_text(caption.placeholder.as_str())
            .desired_width(CARD_WIDTH),
    );
    if response.changed() {
        actions.push(BlockAction::Caption(id, text));
    }
}

fn add_card(ui: &mut egui::Ui, add: &AddControl, actions: &mut Vec<BlockAction>) {
    card_frame().show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(add.label.as_str()).min_size(vec2(CARD_WIDTH, CARD_MEDIA_HEIGHT * 0.6));
            if ui.add(button).clicked() {
                actions.push(BlockAction::SelectFile);
            }

            let url_id = ui.id().with("add-url");
            let mut url = ui.data(|d| d.get_temp::<String>(url_id)).unwrap_or_default();
            let response = ui.add(
                egui::TextEdit::singleline(&mut url)
                    .hint_text(add.url_hint.as_str())
                    .desired_width(CARD_WIDTH),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if submitted && !url.trim().is_empty() {
                actions.push(BlockAction::AddUrl(url));
                ui.data_mut(|d| d.remove::<String>(url_id));
            } else {
                ui.data_mut(|d| d.insert_temp(url_id, url));
            }
        });
    });
}
