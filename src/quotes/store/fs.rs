use super::DataStore;
use crate::config::WriteMode;
use crate::error::{QuotesError, Result};
use crate::model::{Quote, QuoteDocument};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const JSON_INDENT: &[u8] = b"    ";

#[derive(Serialize)]
struct DocumentRef<'a> {
    quotes: &'a [Quote],
}

pub struct FileStore {
    path: PathBuf,
    write_mode: WriteMode,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_mode: WriteMode::Atomic,
        }
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(QuotesError::Io)?;
            }
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("quotes");
        self.path
            .with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }
}

fn encode(quotes: &[Quote]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    DocumentRef { quotes }
        .serialize(&mut ser)
        .map_err(QuotesError::Serialization)?;
    Ok(buf)
}

impl DataStore for FileStore {
    fn load(&self) -> Result<Vec<Quote>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            // A store that was never written is an empty collection
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(QuotesError::Io(e)),
        };
        let doc: QuoteDocument =
            serde_json::from_str(&content).map_err(QuotesError::Serialization)?;
        debug!(path = %self.path.display(), count = doc.quotes.len(), "loaded quotes");
        Ok(doc.quotes)
    }

    fn save(&self, quotes: &[Quote]) -> Result<()> {
        self.ensure_parent()?;
        let content = encode(quotes)?;

        match self.write_mode {
            WriteMode::Atomic => {
                let tmp_file = self.tmp_path();
                if let Err(e) = fs::write(&tmp_file, &content) {
                    let _ = fs::remove_file(&tmp_file);
                    return Err(QuotesError::Io(e));
                }
                if let Err(e) = fs::rename(&tmp_file, &self.path) {
                    let _ = fs::remove_file(&tmp_file);
                    return Err(QuotesError::Io(e));
                }
            }
            WriteMode::Direct => {
                fs::write(&self.path, &content).map_err(QuotesError::Io)?;
            }
        }

        debug!(path = %self.path.display(), count = quotes.len(), mode = ?self.write_mode, "saved quotes");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
