use std::io::{Cursor, Read};

use pomelo_core::location::{FileResolver, Location};
use pomelo_util::errors::PomeloError;

/// A file resolver over in-memory XML documents, for driving the
/// cataloger without touching disk or network.
pub struct MemoryTree {
    files: Vec<(String, String)>,
}

impl MemoryTree {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_string()))
                .collect(),
        }
    }
}

impl FileResolver for MemoryTree {
    fn files_by_glob(&self, pattern: &str) -> miette::Result<Vec<Location>> {
        let suffix = pattern.rsplit('/').next().unwrap_or(pattern);
        Ok(self
            .files
            .iter()
            .filter(|(path, _)| path.ends_with(suffix))
            .map(|(path, _)| Location::new(path.clone()))
            .collect())
    }

    fn open(&self, location: &Location) -> miette::Result<Box<dyn Read + Send>> {
        let content = self
            .files
            .iter()
            .find(|(path, _)| *path == location.path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| PomeloError::Generic {
                message: format!("no such file: {}", location.path),
            })?;
        Ok(Box::new(Cursor::new(content.into_bytes())))
    }
}
