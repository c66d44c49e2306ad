//! The stored bearer token, the terminal's stand-in for browser storage.
//!
//! The token lives in a small TOML file. Logging out deletes the file.

use std::{io::ErrorKind, path::PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
  token: String,
}

/// Reads, writes and clears the persisted token.
#[derive(Debug, Clone)]
pub struct TokenStore {
  path: PathBuf,
}

impl TokenStore {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  /// The saved token, if a session file exists and is readable.
  pub fn load(&self) -> anyhow::Result<Option<String>> {
    let raw = match std::fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => {
        return Err(e).with_context(|| format!("reading session file {}", self.path.display()));
      }
    };
    let file: SessionFile = toml::from_str(&raw).context("parsing session file")?;
    Ok(Some(file.token).filter(|t| !t.is_empty()))
  }

  pub fn save(&self, token: &str) -> anyhow::Result<()> {
    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("creating {}", parent.display()))?;
    }
    let raw = toml::to_string(&SessionFile { token: token.to_string() })
      .context("serialising session file")?;
    std::fs::write(&self.path, raw)
      .with_context(|| format!("writing session file {}", self.path.display()))?;
    tracing::info!(path = %self.path.display(), "token saved");
    Ok(())
  }

  /// Forget the token. Clearing an absent session is not an error.
  pub fn clear(&self) -> anyhow::Result<()> {
    match std::fs::remove_file(&self.path) {
      Ok(()) => {
        tracing::info!(path = %self.path.display(), "token cleared");
        Ok(())
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => {
        Err(e).with_context(|| format!("removing session file {}", self.path.display()))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn save_load_clear() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("nested").join("session.toml"));

    assert_eq!(store.load().unwrap(), None);
    store.save("abc.def.ghi").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("abc.def.ghi"));

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
    store.clear().unwrap();
  }

  #[test]
  fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.toml");
    std::fs::write(&path, "not = [valid").unwrap();
    assert!(TokenStore::new(path).load().is_err());
  }
}
