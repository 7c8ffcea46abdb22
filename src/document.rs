//! Editor document as the desktop host persists it: `{ "blocks": [{ "type", "data" }] }`.

use crate::constants::TOOLBOX_TITLE;
use crate::error::ConfigError;
use crate::item::CarouselData;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Block type under which carousel data is stored.
pub const CAROUSEL_BLOCK_TYPE: &str = "carousel";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl BlockRecord {
    pub fn carousel(data: &CarouselData) -> Result<Self, ConfigError> {
        Ok(Self {
            kind: CAROUSEL_BLOCK_TYPE.to_string(),
            data: serde_json::to_value(data)?,
        })
    }

    /// Carousel data of this record, or `None` for blocks of other tools.
    pub fn carousel_data(&self) -> Option<Result<CarouselData, ConfigError>> {
        (self.kind == CAROUSEL_BLOCK_TYPE)
            .then(|| serde_json::from_value(self.data.clone()).map_err(ConfigError::from))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorDocument {
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
}

impl EditorDocument {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        log::debug!("Saved {} blocks to {}", self.blocks.len(), path.display());
        Ok(())
    }

    /// Carousel blocks in document order. Blocks of other tools and unreadable data are skipped.
    pub fn carousels(&self) -> Vec<CarouselData> {
        self.blocks
            .iter()
            .filter_map(|record| match record.carousel_data()? {
                Ok(data) => Some(data),
                Err(err) => {
                    log::warn!("Skipping unreadable {TOOLBOX_TITLE} block: {err}");
                    None
                }
            })
            .collect()
    }
}
