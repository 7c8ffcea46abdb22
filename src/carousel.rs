//! The carousel block: owns the item list, mediates between user actions and the uploader, and
//! exposes the render/save entry points of the host's block-tool contract.

use crate::config::CarouselConfig;
use crate::constants::MSG_UPLOAD_FAILED;
use crate::error::UploadError;
use crate::host::{HostApi, Notification, Toolbox, TOOLBOX};
use crate::item::{CarouselData, CarouselItem, ItemId, PreviewSource};
use crate::item_list::CarouselList;
use crate::media::LoadEvent;
use crate::uploader::{UploadResponse, Uploader};
use crate::view::{render, CarouselView, ViewContext};
use std::collections::HashSet;
use std::path::PathBuf;

pub struct CarouselBlock {
    config: CarouselConfig,
    api: Box<dyn HostApi>,
    uploader: Box<dyn Uploader>,
    list: CarouselList,
    /// Placeholders that still wait for their upload.
    pending: HashSet<ItemId>,
}

impl CarouselBlock {
    /// Builds a block with the uploader the config asks for, storing local files in `media_dir`.
    pub fn new(
        data: CarouselData,
        config: CarouselConfig,
        api: Box<dyn HostApi>,
        media_dir: PathBuf,
    ) -> Result<Self, UploadError> {
        let uploader = crate::uploader::for_config(&config, media_dir)?;
        Ok(Self::with_uploader(data, config, api, uploader))
    }

    /// Builds a block around a custom uploader.
    pub fn with_uploader(
        data: CarouselData,
        config: CarouselConfig,
        api: Box<dyn HostApi>,
        uploader: Box<dyn Uploader>,
    ) -> Self {
        log::debug!("Hydrating carousel with {} items", data.len());
        Self {
            list: CarouselList::from_data(&data),
            config,
            api,
            uploader,
            pending: HashSet::new(),
        }
    }

    pub fn toolbox() -> Toolbox {
        TOOLBOX
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn items(&self) -> &[CarouselItem] {
        self.list.items()
    }

    pub fn has_pending_uploads(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_pending(&self, id: ItemId) -> bool {
        self.pending.contains(&id)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Block-tool contract
    // ─────────────────────────────────────────────────────────────────────────────

    /// Projects the current list: items in order, then the add control.
    pub fn render(&self) -> CarouselView {
        let ctx = ViewContext::new(&self.config, &self.api.styles(), |key| self.api.t(key));
        render(self.list.items(), &ctx)
    }

    /// Every item with a resolved url as `{url, caption}`, in display order.
    /// Items still uploading are left out.
    pub fn save(&self) -> CarouselData {
        let data = self.list.to_data();
        let skipped = self.list.len() - data.len();
        if skipped > 0 {
            log::debug!("Saving carousel without {skipped} unresolved items");
        }
        data
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Add flow
    // ─────────────────────────────────────────────────────────────────────────────

    /// Handler of the add control: asks the uploader for a file and inserts a placeholder as soon
    /// as its preview is known.
    pub fn on_select_file(&mut self) {
        let list = &mut self.list;
        let pending = &mut self.pending;
        let result = self.uploader.upload_selected_file(&mut |preview: PreviewSource| {
            let id = list.insert_placeholder(Some(preview));
            pending.insert(id);
            log::debug!("Inserted placeholder {id}");
            id
        });
        if let Err(err) = result {
            self.uploading_failed(None, &err);
        }
    }

    /// Adds an item from a remote url, resolved through the uploader like a picked file.
    pub fn add_by_url(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        let id = self
            .list
            .insert_placeholder(Some(PreviewSource(url.to_string())));
        self.pending.insert(id);
        if let Err(err) = self.uploader.upload_by_url(id, url) {
            self.pending.remove(&id);
            self.uploading_failed(Some(id), &err);
        }
    }

    /// Applies every upload that finished since the last call. Returns true if anything changed.
    pub fn poll_uploads(&mut self) -> bool {
        let completions = self.uploader.poll_completions();
        let changed = !completions.is_empty();
        for completion in completions {
            match completion.result {
                Ok(response) => self.on_upload(completion.item, response),
                Err(err) => self.on_upload_error(completion.item, &err),
            }
        }
        changed
    }

    /// Upload callback for the placeholder `id`.
    ///
    /// On success the placeholder gets the resolved url in place. Anything else is reported and
    /// leaves every item untouched.
    pub fn on_upload(&mut self, id: ItemId, response: UploadResponse) {
        if !self.pending.remove(&id) {
            log::warn!("Discarding upload result for {id}: item was removed or already resolved");
            return;
        }
        match response.into_url() {
            Ok(url) => {
                if self.list.fill(id, &url) {
                    log::debug!("Filled {id} with {url}");
                } else {
                    log::warn!("Could not fill {id}: item is no longer a placeholder");
                }
            }
            Err(err) => self.uploading_failed(Some(id), &err),
        }
    }

    /// Error callback for the placeholder `id`. Errors of detached uploads are dropped.
    pub fn on_upload_error(&mut self, id: ItemId, error: &UploadError) {
        if !self.pending.remove(&id) {
            log::warn!("Discarding upload error for {id}: {error}");
            return;
        }
        self.uploading_failed(Some(id), error);
    }

    /// Reports a failed upload. The placeholder, if any, stays where it is.
    pub fn uploading_failed(&self, id: Option<ItemId>, error: &UploadError) {
        match id {
            Some(id) => log::error!("Carousel: uploading {id} failed because of {error}"),
            None => log::error!("Carousel: uploading failed because of {error}"),
        }
        self.api
            .notify(Notification::error(self.api.t(MSG_UPLOAD_FAILED)));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Item edits
    // ─────────────────────────────────────────────────────────────────────────────

    /// Remove control handler. A pending upload for the item is detached.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        if self.pending.remove(&id) {
            log::debug!("Detached pending upload of removed item {id}");
        }
        self.list.remove(id).is_some()
    }

    pub fn set_caption(&mut self, id: ItemId, caption: &str) -> bool {
        self.list.set_caption(id, caption)
    }

    /// Media load event of an item's element; clears its preloader when the event fits.
    pub fn on_media_event(&mut self, id: ItemId, event: LoadEvent) -> bool {
        self.list.apply_load_event(id, event)
    }
}
