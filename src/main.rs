use carousel_block::constants::{
    CARD_CORNER_RADIUS, CARD_INNER_MARGIN, COLOR_TOAST_ERROR, COLOR_TOAST_INFO,
    INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, TOAST_LIFETIME_SECS, UPLOAD_POLL_INTERVAL_MS,
};
use carousel_block::paths::AppPaths;
use carousel_block::{
    BlockRecord, CarouselBlock, CarouselData, EditorDocument, HostApi, HostSettings, HostStyles,
    Notification, NotificationStyle,
};
use eframe::egui::{self, Align2, Color32, RichText};
use egui::vec2;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let paths = AppPaths::from_project_dirs();
    if let Some(paths) = &paths {
        if let Err(err) = paths.ensure_dirs_exist() {
            log::error!("Failed to create app directories: {err}");
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT]),
        ..Default::default()
    };

    eframe::run_native(
        "Carousel Block",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(EditorApp::new(cc, paths)))
        }),
    )
}

/// Host API handed to every block: fixed style tokens, a message table, a shared notifier.
#[derive(Clone)]
struct EguiHost {
    messages: Rc<BTreeMap<String, String>>,
    outbox: Rc<RefCell<VecDeque<Notification>>>,
}

impl HostApi for EguiHost {
    fn styles(&self) -> HostStyles {
        HostStyles::default()
    }

    fn t(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn notify(&self, notification: Notification) {
        self.outbox.borrow_mut().push_back(notification);
    }
}

struct Toast {
    notification: Notification,
    expires_at: f64,
}

struct HostedBlock {
    key: u64,
    block: CarouselBlock,
}

struct EditorApp {
    settings: HostSettings,
    host: EguiHost,
    blocks: Vec<HostedBlock>,
    next_block_key: u64,
    toasts: Vec<Toast>,
    document_path: Option<PathBuf>,
    media_dir: PathBuf,
}

impl EditorApp {
    fn new(_cc: &eframe::CreationContext<'_>, paths: Option<AppPaths>) -> Self {
        let settings = match &paths {
            Some(paths) => HostSettings::load(&paths.settings_file()).unwrap_or_else(|err| {
                log::error!("Failed to read settings, using defaults: {err}");
                HostSettings::default()
            }),
            None => HostSettings::default(),
        };
        let host = EguiHost {
            messages: Rc::new(settings.messages.clone()),
            outbox: Rc::new(RefCell::new(VecDeque::new())),
        };
        let media_dir = paths
            .as_ref()
            .map(|p| p.media.clone())
            .unwrap_or_else(|| std::env::temp_dir().join("carousel_block_media"));

        let mut app = Self {
            settings,
            host,
            blocks: Vec::new(),
            next_block_key: 0,
            toasts: Vec::new(),
            document_path: paths.as_ref().map(AppPaths::document_file),
            media_dir,
        };
        app.load_document();
        app
    }

    fn add_block(&mut self, data: CarouselData) {
        match CarouselBlock::new(
            data,
            self.settings.tool.clone(),
            Box::new(self.host.clone()),
            self.media_dir.clone(),
        ) {
            Ok(block) => {
                let key = self.next_block_key;
                self.next_block_key += 1;
                self.blocks.push(HostedBlock { key, block });
            }
            Err(err) => {
                log::error!("Failed to create carousel block: {err}");
                let message = format!("{}: {err}", self.host.t("Carousel unavailable"));
                self.host.notify(Notification::error(message));
            }
        }
    }

    fn load_document(&mut self) {
        let Some(path) = self.document_path.clone() else {
            return;
        };
        match EditorDocument::load(&path) {
            Ok(document) => {
                self.blocks.clear();
                for data in document.carousels() {
                    self.add_block(data);
                }
            }
            Err(err) => {
                log::error!("Failed to load {}: {err}", path.display());
                let message = format!("{}: {err}", self.host.t("Could not open document"));
                self.host.notify(Notification::error(message));
            }
        }
    }

    fn save_document(&mut self) {
        let Some(path) = self.document_path.clone() else {
            self.host
                .notify(Notification::error(self.host.t("No data directory to save into")));
            return;
        };
        let blocks: Result<Vec<BlockRecord>, _> = self
            .blocks
            .iter()
            .map(|hosted| BlockRecord::carousel(&hosted.block.save()))
            .collect();
        let result = blocks.and_then(|blocks| EditorDocument { blocks }.save(&path));
        match result {
            Ok(()) => self.host.notify(Notification {
                message: self.host.t("Saved"),
                style: NotificationStyle::Success,
            }),
            Err(err) => {
                log::error!("Failed to save {}: {err}", path.display());
                let message = format!("{}: {err}", self.host.t("Could not save document"));
                self.host.notify(Notification::error(message));
            }
        }
    }

    fn collect_toasts(&mut self, now: f64) {
        let mut outbox = self.host.outbox.borrow_mut();
        while let Some(notification) = outbox.pop_front() {
            self.toasts.push(Toast {
                notification,
                expires_at: now + TOAST_LIFETIME_SECS,
            });
        }
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    fn show_toasts(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let fill = match toast.notification.style {
                        NotificationStyle::Error => COLOR_TOAST_ERROR,
                        NotificationStyle::Info | NotificationStyle::Success => COLOR_TOAST_INFO,
                    };
                    egui::Frame::none()
                        .fill(fill)
                        .rounding(CARD_CORNER_RADIUS)
                        .inner_margin(CARD_INNER_MARGIN)
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(&toast.notification.message).color(Color32::WHITE),
                            );
                        });
                }
            });
        ctx.request_repaint_after(Duration::from_secs_f64(TOAST_LIFETIME_SECS));
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for hosted in &mut self.blocks {
            if hosted.block.poll_uploads() {
                ctx.request_repaint();
            }
        }
        if self.blocks.iter().any(|h| h.block.has_pending_uploads()) {
            ctx.request_repaint_after(Duration::from_millis(UPLOAD_POLL_INTERVAL_MS));
        }

        let toolbox = CarouselBlock::toolbox();
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(format!("＋ {}", self.host.t(toolbox.title)))
                    .clicked()
                {
                    self.add_block(Vec::new());
                }
                if ui.button(self.host.t("Save")).clicked() {
                    self.save_document();
                }
                if ui.button(self.host.t("Reload")).clicked() {
                    self.load_document();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let mut destroyed = None;
                for hosted in &mut self.blocks {
                    ui.horizontal(|ui| {
                        ui.strong(toolbox.title);
                        if ui.small_button("🗑").on_hover_text("Delete block").clicked() {
                            destroyed = Some(hosted.key);
                        }
                    });
                    carousel_block::ui::show(ui, hosted.key, &mut hosted.block);
                    ui.separator();
                }
                if let Some(key) = destroyed {
                    self.blocks.retain(|hosted| hosted.key != key);
                }
            });
        });

        let now = ctx.input(|i| i.time);
        self.collect_toasts(now);
        self.show_toasts(ctx);
    }
}
