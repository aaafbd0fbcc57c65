use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes `value` as pretty JSON via a temp file and rename, so a reader
/// never sees a half-written file.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create parent directory")?;
    }

    let json = serde_json::to_string_pretty(value).context("Failed to serialize")?;

    let temp_path = temp_path_for(path);
    let mut temp_file = std::fs::File::create(&temp_path).context("Failed to create temp file")?;
    temp_file
        .write_all(json.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.sync_all().context("Failed to sync temp file")?;

    std::fs::rename(&temp_path, path).context("Failed to rename temp file to target")?;
    Ok(())
}

/// Sibling of `path` with `.tmp` appended to the full file name, so it never
/// equals the target even when the target already ends in `.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;
    use crate::seed::default_catalog;

    #[test]
    fn test_catalog_file_round_trip() -> Result<()> {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "test_catalog_{}.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)?
                .as_nanos()
        ));

        let catalog = default_catalog();
        save_json(&path, &catalog)?;
        let loaded: Catalog = load_json(&path)?;
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, catalog);
        Ok(())
    }

    #[test]
    fn test_target_with_tmp_extension() -> Result<()> {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "test_catalog_{}.tmp",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)?
                .as_nanos()
        ));
        assert_ne!(temp_path_for(&path), path);

        let catalog = default_catalog();
        save_json(&path, &catalog)?;
        let loaded: Catalog = load_json(&path)?;
        let leftover = temp_path_for(&path).exists();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, catalog);
        assert!(!leftover);
        Ok(())
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_json::<Catalog>(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
