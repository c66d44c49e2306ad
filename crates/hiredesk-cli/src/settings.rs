//! Layered settings: built-in defaults, an optional TOML file,
//! `HIREDESK_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved runtime settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub base_url:        String,
  #[serde(default)]
  pub token:           Option<String>,
  /// Overrides the organization reported by `/users/me`.
  #[serde(default)]
  pub organization_id: Option<i64>,
  pub timeout_secs:    u64,
  pub download_dir:    PathBuf,
  pub log_file:        PathBuf,
  pub session_file:    PathBuf,
}

/// Values given on the command line; `None` leaves lower layers in charge.
#[derive(Debug, Default)]
pub struct Overrides {
  pub config_file:     Option<PathBuf>,
  pub base_url:        Option<String>,
  pub token:           Option<String>,
  pub organization_id: Option<i64>,
  pub download_dir:    Option<PathBuf>,
  pub log_file:        Option<PathBuf>,
}

impl Settings {
  pub fn load(overrides: Overrides) -> anyhow::Result<Self> {
    let dir = config_dir();

    // An explicit --config must exist; the default location is optional.
    let file = match &overrides.config_file {
      Some(path) => File::from(path.as_path()).required(true),
      None => File::from(dir.join("config.toml")).required(false),
    };

    let settings = Config::builder()
      .set_default("base_url", DEFAULT_BASE_URL)?
      .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
      .set_default("download_dir", ".")?
      .set_default("log_file", path_value(&std::env::temp_dir().join("hiredesk.log")))?
      .set_default("session_file", path_value(&dir.join("session.toml")))?
      .add_source(file)
      .add_source(Environment::with_prefix("HIREDESK"))
      .set_override_option("base_url", overrides.base_url)?
      .set_override_option("token", overrides.token)?
      .set_override_option("organization_id", overrides.organization_id)?
      .set_override_option("download_dir", overrides.download_dir.as_deref().map(path_value))?
      .set_override_option("log_file", overrides.log_file.as_deref().map(path_value))?
      .build()
      .context("failed to read configuration")?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.download_dir = expand_tilde(&settings.download_dir);
    settings.log_file = expand_tilde(&settings.log_file);
    settings.session_file = expand_tilde(&settings.session_file);
    Ok(settings)
  }
}

fn path_value(path: &Path) -> String { path.to_string_lossy().into_owned() }

/// `$XDG_CONFIG_HOME/hiredesk`, falling back to `~/.config/hiredesk`.
pub fn config_dir() -> PathBuf {
  if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
    && !xdg.is_empty()
  {
    return PathBuf::from(xdg).join("hiredesk");
  }
  match std::env::var("HOME") {
    Ok(home) => PathBuf::from(home).join(".config").join("hiredesk"),
    Err(_) => PathBuf::from(".hiredesk"),
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
  }

  #[test]
  fn file_values_are_read() {
    let file = config_file(
      r#"
        base_url = "https://ats.example.com/api"
        organization_id = 7
        timeout_secs = 5
      "#,
    );
    let settings = Settings::load(Overrides {
      config_file: Some(file.path().to_path_buf()),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(settings.base_url, "https://ats.example.com/api");
    assert_eq!(settings.organization_id, Some(7));
    assert_eq!(settings.timeout_secs, 5);
    assert_eq!(settings.download_dir, PathBuf::from("."));
  }

  #[test]
  fn flags_override_the_file() {
    let file = config_file(
      r#"
        base_url = "https://ats.example.com/api"
        token = "from-file"
      "#,
    );
    let settings = Settings::load(Overrides {
      config_file: Some(file.path().to_path_buf()),
      base_url: Some("http://127.0.0.1:9000".into()),
      token: Some("from-flag".into()),
      organization_id: Some(2),
      download_dir: Some(PathBuf::from("/tmp/downloads")),
      log_file: None,
    })
    .unwrap();
    assert_eq!(settings.base_url, "http://127.0.0.1:9000");
    assert_eq!(settings.token.as_deref(), Some("from-flag"));
    assert_eq!(settings.organization_id, Some(2));
    assert_eq!(settings.download_dir, PathBuf::from("/tmp/downloads"));
    assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
  }

  #[test]
  fn explicit_missing_file_is_an_error() {
    let result = Settings::load(Overrides {
      config_file: Some(PathBuf::from("/nonexistent/hiredesk/config.toml")),
      ..Default::default()
    });
    assert!(result.is_err());
  }
}
