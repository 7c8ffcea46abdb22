//! Test doubles for the host API and the uploader.

#![allow(dead_code)]

use carousel_block::{
    CarouselBlock, CarouselConfig, CarouselData, HostApi, HostStyles, ItemId, Notification,
    PreviewSource, UploadCompletion, UploadError, UploadResponse, Uploader,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct RecordingHost {
    pub notifications: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingHost {
    pub fn count(&self) -> usize {
        self.notifications.borrow().len()
    }
}

impl HostApi for RecordingHost {
    fn styles(&self) -> HostStyles {
        HostStyles::default()
    }

    fn t(&self, key: &str) -> String {
        key.to_string()
    }

    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }
}

#[derive(Default)]
pub struct UploaderState {
    /// Picks answered by the next `upload_selected_file` calls; `None` is a cancelled dialog.
    pub picks: Vec<Option<String>>,
    /// Jobs started, in order, with the item they are bound to.
    pub started: Vec<ItemId>,
    pub by_url: Vec<(ItemId, String)>,
    pub finished: Vec<UploadCompletion>,
}

/// Uploader whose jobs only finish when the test says so.
#[derive(Clone, Default)]
pub struct ManualUploader {
    pub state: Rc<RefCell<UploaderState>>,
}

impl ManualUploader {
    pub fn pick(&self, preview: &str) {
        self.state.borrow_mut().picks.push(Some(preview.to_string()));
    }

    pub fn cancel_next_pick(&self) {
        self.state.borrow_mut().picks.push(None);
    }

    pub fn started(&self) -> Vec<ItemId> {
        self.state.borrow().started.clone()
    }

    pub fn succeed(&self, item: ItemId, url: &str) {
        self.finish(item, Ok(UploadResponse::success(url)));
    }

    pub fn finish(&self, item: ItemId, result: Result<UploadResponse, UploadError>) {
        self.state
            .borrow_mut()
            .finished
            .push(UploadCompletion { item, result });
    }
}

impl Uploader for ManualUploader {
    fn upload_selected_file(
        &mut self,
        on_preview: &mut dyn FnMut(PreviewSource) -> ItemId,
    ) -> Result<(), UploadError> {
        let pick = {
            let mut state = self.state.borrow_mut();
            if state.picks.is_empty() {
                Some("file:///tmp/picked.png".to_string())
            } else {
                state.picks.remove(0)
            }
        };
        if let Some(preview) = pick {
            let item = on_preview(PreviewSource(preview));
            self.state.borrow_mut().started.push(item);
        }
        Ok(())
    }

    fn upload_by_url(&mut self, item: ItemId, url: &str) -> Result<(), UploadError> {
        self.state.borrow_mut().by_url.push((item, url.to_string()));
        Ok(())
    }

    fn poll_completions(&mut self) -> Vec<UploadCompletion> {
        std::mem::take(&mut self.state.borrow_mut().finished)
    }
}

pub fn block_with(data: CarouselData) -> (CarouselBlock, RecordingHost, ManualUploader) {
    let host = RecordingHost::default();
    let uploader = ManualUploader::default();
    let block = CarouselBlock::with_uploader(
        data,
        CarouselConfig::default(),
        Box::new(host.clone()),
        Box::new(uploader.clone()),
    );
    (block, host, uploader)
}
