use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

pub struct AppPaths {
    pub config: PathBuf,
    pub documents: PathBuf,
    pub media: PathBuf,
}

impl AppPaths {
    pub fn from_project_dirs() -> Option<Self> {
        ProjectDirs::from("com", "carouselblock", "CarouselBlock").map(|dirs| {
            let config = dirs.config_dir().to_path_buf();
            let data = dirs.data_dir();
            let documents = data.join("documents");
            let media = data.join("media");

            Self {
                config,
                documents,
                media,
            }
        })
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config.join("settings.json")
    }

    pub fn document_file(&self) -> PathBuf {
        self.documents.join("document.json")
    }

    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config)?;
        fs::create_dir_all(&self.documents)?;
        fs::create_dir_all(&self.media)?;
        Ok(())
    }
}
