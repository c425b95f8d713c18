use crate::domain::ports::ImageStore;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalImageStore {
    base_path: String,
}

impl LocalImageStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl ImageStore for LocalImageStore {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        // An absolute path replaces the base entirely.
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }
}
