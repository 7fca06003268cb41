//! ip2region database implementation core

use crate::database::{Database, LoadMode, RegionRecord};
use crate::error::{RegionError, Result};
use once_cell::sync::OnceCell;
use std::fs::File;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::image::DatabaseImage;

/// ip2region database handle
///
/// `open` only acquires the file descriptor. The image is read on the first
/// lookup (or an explicit [`load`](Database::load)) behind a one-time
/// initialisation barrier, so racing first callers share a single read.
pub struct Ip2RegionDatabase {
    name: String,
    path: PathBuf,
    mode: LoadMode,
    file: Mutex<Option<File>>,
    image: OnceCell<Arc<DatabaseImage>>,
}

impl Ip2RegionDatabase {
    /// Open the database file without reading it
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_mode(path, LoadMode::default())
    }

    pub fn open_with_mode<P: AsRef<Path>>(path: P, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(RegionError::IoError)?;
        log::info!("Opened ip2region database: {:?} ({:?} mode)", path, mode);

        Ok(Self {
            name: "ip2region".to_string(),
            path,
            mode,
            file: Mutex::new(Some(file)),
            image: OnceCell::new(),
        })
    }

    /// Return the loaded image, reading the file on first use
    ///
    /// A failed load leaves nothing cached, so the next call tries again.
    pub fn ensure_loaded(&self) -> Result<Arc<DatabaseImage>> {
        self.image
            .get_or_try_init(|| -> Result<Arc<DatabaseImage>> {
                let guard = self
                    .file
                    .lock()
                    .map_err(|e| RegionError::Other(format!("Failed to acquire file lock: {}", e)))?;
                let file = guard
                    .as_ref()
                    .ok_or_else(|| RegionError::DatabaseClosed(self.path.display().to_string()))?;

                log::info!("Loading ip2region database from: {:?}", self.path);
                let image = DatabaseImage::read_from(file, self.mode)?;
                log::info!(
                    "Successfully loaded ip2region database: {} index blocks, {} bytes",
                    image.total_blocks(),
                    image.len()
                );

                Ok(Arc::new(image))
            })
            .map(Arc::clone)
    }

    /// Release the file descriptor
    ///
    /// An image loaded before closing stays usable.
    pub fn close(&self) {
        match self.file.lock() {
            Ok(mut guard) => {
                if guard.take().is_some() {
                    log::debug!("Closed ip2region database: {:?}", self.path);
                }
            }
            Err(e) => log::warn!("Failed to close ip2region database: {}", e),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_mode(&self) -> LoadMode {
        self.mode
    }

    /// Index block count, once loaded
    pub fn total_blocks(&self) -> Option<i64> {
        self.image.get().map(|image| image.total_blocks())
    }
}

impl Database for Ip2RegionDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_loaded(&self) -> bool {
        self.image.get().is_some()
    }

    fn load(&self) -> Result<()> {
        self.ensure_loaded().map(|_| ())
    }

    fn lookup(&self, address: &str) -> Result<RegionRecord> {
        let image = self.ensure_loaded()?;
        image.resolve(address)
    }

    fn lookup_ip(&self, ip: Ipv4Addr) -> Result<RegionRecord> {
        let image = self.ensure_loaded()?;
        image.resolve_ip(ip)
    }
}

impl std::fmt::Debug for Ip2RegionDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ip2RegionDatabase")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
