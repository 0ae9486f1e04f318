// Attachment directory listing

use std::io;
use std::path::{Component, Path, PathBuf};

/// Failure to list an attachment directory, other than it being absent
#[derive(Debug, thiserror::Error)]
#[error("failed to read case files in {path}: {source}")]
pub struct AttachmentError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// File utilities for attachment lookup
pub struct FileUtils;

impl FileUtils {
    /// Directory holding the attachments of one case: `<root>/<suite>/<name>`.
    ///
    /// Only the normal components of `suite` and `name` are used, so the
    /// result always stays under `root` even for names like `/health` or `../x`.
    pub fn case_dir(root: &Path, suite: &str, name: &str) -> PathBuf {
        let mut dir = root.to_path_buf();
        for part in [suite, name] {
            dir.extend(
                Path::new(part)
                    .components()
                    .filter(|c| matches!(c, Component::Normal(_))),
            );
        }
        std::path::absolute(&dir).unwrap_or(dir)
    }

    /// List the non-hidden entries of a case's attachment directory.
    ///
    /// A missing directory is the normal "no attachments" case and yields an
    /// empty list. Entries come back sorted by file name.
    pub fn case_files(root: &Path, suite: &str, name: &str) -> Result<Vec<String>, AttachmentError> {
        let dir = Self::case_dir(root, suite, name);

        match std::fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(AttachmentError {
                    source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
                    path: dir,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(AttachmentError { path: dir, source }),
        }

        let walker = walkdir::WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| AttachmentError {
                path: dir.clone(),
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop")),
            })?;

            if Self::is_hidden(entry.file_name()) {
                continue;
            }
            files.push(entry.path().to_string_lossy().into_owned());
        }

        Ok(files)
    }

    fn is_hidden(name: &std::ffi::OsStr) -> bool {
        name.to_string_lossy().starts_with('.')
    }
}
