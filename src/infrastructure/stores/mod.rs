pub mod file;
pub mod memory;

use std::path;

use crate::domain::models::StoreBox;

pub struct StoreManager {}

impl StoreManager {
    /// A file-backed store at `storage_file`, or a store that lives only as
    /// long as the process when no file is configured.
    pub fn get(storage_file: &str) -> StoreBox {
        if storage_file.is_empty() {
            return Box::<memory::MemoryStore>::default();
        }

        return Box::new(file::FileStore::new(path::PathBuf::from(storage_file)));
    }
}
