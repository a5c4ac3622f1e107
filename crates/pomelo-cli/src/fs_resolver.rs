//! Directory-tree file resolver backed by `walkdir`.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use pomelo_core::location::{FileResolver, Location};
use pomelo_util::errors::PomeloError;

/// Resolves files inside a directory tree on the local filesystem,
/// typically an extracted container image or a source checkout.
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl FileResolver for DirectoryResolver {
    fn files_by_glob(&self, pattern: &str) -> miette::Result<Vec<Location>> {
        // Directory components of the pattern are treated as "any depth";
        // only the file-name segment is matched.
        let name_pattern = pattern.rsplit('/').next().unwrap_or(pattern);

        let mut locations = Vec::new();
        for entry in WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if wildcard_match(name_pattern, &name) {
                locations.push(Location::new(entry.path().display().to_string()));
            }
        }
        Ok(locations)
    }

    fn open(&self, location: &Location) -> miette::Result<Box<dyn Read + Send>> {
        let file = File::open(&location.path).map_err(PomeloError::Io)?;
        Ok(Box::new(file))
    }
}

/// Match a single path segment against a pattern with `*` wildcards.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == name;
    }

    let mut rest = name;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            match rest.strip_prefix(part) {
                Some(stripped) => rest = stripped,
                None => return false,
            }
        } else if i == parts.len() - 1 {
            return rest.ends_with(part);
        } else {
            match rest.find(part) {
                Some(pos) => rest = &rest[pos + part.len()..],
                None => return false,
            }
        }
    }
    true
}
