//! Configuration loading: optional TOML file layered with `PERSONAS_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Runtime configuration, deserialised from `personas.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct CliConfig {
  /// SQLite database file. A leading `~/` expands to `$HOME`.
  pub store_path: PathBuf,
}

pub fn load(path: &Path) -> anyhow::Result<CliConfig> {
  build(path, Some(config::Environment::with_prefix("PERSONAS")))
}

/// Defaults, then the file at `path`, then `env` when given.
fn build(path: &Path, env: Option<config::Environment>) -> anyhow::Result<CliConfig> {
  let mut builder = config::Config::builder()
    .set_default("store_path", "personas.db")?
    .add_source(config::File::from(path.to_path_buf()).required(false));
  if let Some(env) = env {
    builder = builder.add_source(env);
  }

  let settings = builder.build().context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise CliConfig")
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
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
  use super::*;

  // File-layer tests skip the environment so a `PERSONAS_STORE_PATH` set in
  // the test shell cannot override what they assert.

  #[test]
  fn missing_file_falls_back_to_default_store() {
    let cfg = build(Path::new("does-not-exist/personas.toml"), None).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("personas.db"));
  }

  #[test]
  fn file_overrides_default_store() {
    let dir = std::env::temp_dir().join(format!("personas-cfg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("personas.toml");
    std::fs::write(&file, "store_path = \"/var/lib/personas/tags.db\"\n").unwrap();

    let cfg = build(&file, None).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/personas/tags.db"));

    std::fs::remove_dir_all(&dir).ok();
  }

  #[test]
  fn non_tilde_paths_are_unchanged() {
    assert_eq!(expand_tilde(Path::new("/tmp/p.db")), PathBuf::from("/tmp/p.db"));
    assert_eq!(expand_tilde(Path::new("p.db")), PathBuf::from("p.db"));
  }
}
