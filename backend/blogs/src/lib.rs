//! # Blogs
//!
//! Records shared by the server and the tools around it.
//!
//! - [`models`]: stored blog and user records
//! - [`payloads`]: JSON bodies of the REST API
//! - [`list_helper`]: statistics over a list of blogs
//! - [`ownership`]: who may change a blog
use std::{fs, io, path::Path};

use thiserror::Error;

pub mod list_helper;
pub mod models;
pub mod ownership;
pub mod payloads;

use models::BlogEntry;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Malformed blog list: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Reads a JSON array of blogs, as exported from the API or the database.
pub fn read_entries(path: impl AsRef<Path>) -> Result<Vec<BlogEntry>, LoadError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    entries_from_slice(&data)
}

pub fn entries_from_slice(data: &[u8]) -> Result<Vec<BlogEntry>, LoadError> {
    Ok(serde_json::from_slice(data)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_read_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"_id": "5a422a851b54a676234d17f7", "title": "React patterns", "author": "Michael Chan", "url": "https://reactpatterns.com/", "likes": 7, "__v": 0}},
                {{"title": "Type wars", "author": "Robert C. Martin"}}
            ]"#
        )
        .unwrap();

        let entries = read_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].likes, 7);
        assert_eq!(entries[1].likes, 0);
    }

    #[test]
    fn test_missing_file() {
        let err = read_entries("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_malformed() {
        let err = entries_from_slice(br#"{"title": "not a list"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }
}
