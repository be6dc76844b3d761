use std::{
    cmp::Reverse,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use cuentas_core::{storage::LedgerStorage, CoreError};
use tracing::debug;

const FILE_EXTENSION: &str = "json";
const BACKUP_DIR: &str = "backups";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const CORRUPT_SUFFIX: &str = "corrupt";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Describes a backup file kept for a storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub key: String,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub corrupt: bool,
    pub path: PathBuf,
}

/// Filesystem-backed local storage: one JSON document per key under a data directory.
#[derive(Debug, Clone)]
pub struct JsonLedgerStorage {
    data_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonLedgerStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(data_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(data_dir: PathBuf, retention: usize) -> Result<Self, CoreError> {
        let backups_dir = data_dir.join(BACKUP_DIR);
        fs::create_dir_all(&data_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            data_dir,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn ledger_path(&self, key: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", canonical_key(key), FILE_EXTENSION))
    }

    pub fn backup_dir(&self, key: &str) -> PathBuf {
        self.backups_dir.join(canonical_key(key))
    }

    /// Lists backups for `key`, newest first.
    pub fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = self.backup_dir(key);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let slug = canonical_key(key);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BackupInfo {
                    key: slug.clone(),
                    name: name.to_string(),
                    created_at: parse_backup_timestamp(name),
                    corrupt: is_corrupt_backup(name),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by(|a, b| {
            Reverse(a.created_at)
                .cmp(&Reverse(b.created_at))
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(entries)
    }

    fn backup_file_name(key: &str) -> String {
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        format!("{}_{}.{}", canonical_key(key), timestamp, FILE_EXTENSION)
    }

    /// First free `<key>_<ts>_corrupt[_N].json` path; existing quarantined files are never reused.
    fn quarantine_path(&self, key: &str) -> PathBuf {
        let dir = self.backup_dir(key);
        let stem = format!(
            "{}_{}_{}",
            canonical_key(key),
            Utc::now().format(BACKUP_TIMESTAMP_FORMAT),
            CORRUPT_SUFFIX
        );
        let mut target = dir.join(format!("{}.{}", stem, FILE_EXTENSION));
        let mut attempt = 1;
        while target.exists() {
            attempt += 1;
            target = dir.join(format!("{}_{}.{}", stem, attempt, FILE_EXTENSION));
        }
        target
    }

    fn backup_existing_file(&self, key: &str, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(key);
        fs::create_dir_all(&dir)?;
        let backup_path = dir.join(Self::backup_file_name(key));
        fs::copy(path, &backup_path)?;
        self.prune_backups(key)?;
        Ok(())
    }

    /// Keeps the newest `retention` rotation backups. Quarantined files are never pruned.
    fn prune_backups(&self, key: &str) -> Result<(), CoreError> {
        let stale = self
            .list_backups(key)?
            .into_iter()
            .filter(|info| !info.corrupt)
            .skip(self.retention);
        for entry in stale {
            if let Err(err) = fs::remove_file(&entry.path) {
                debug!(path = %entry.path.display(), error = %err, "could not prune backup");
            }
        }
        Ok(())
    }
}

impl LedgerStorage for JsonLedgerStorage {
    fn read_ledger(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.ledger_path(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_ledger(&self, key: &str, data: &str) -> Result<(), CoreError> {
        let path = self.ledger_path(key);
        self.backup_existing_file(key, &path)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), bytes = data.len(), "ledger written");
        Ok(())
    }

    fn quarantine_ledger(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.ledger_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::create_dir_all(self.backup_dir(key))?;
        let target = self.quarantine_path(key);
        fs::rename(&path, &target)?;
        Ok(Some(target.display().to_string()))
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "registros".into()
    } else {
        sanitized
    }
}

/// Strips `_corrupt` or `_corrupt_<n>` from a backup stem.
fn strip_corrupt_marker(stem: &str) -> Option<&str> {
    let marker = format!("_{}", CORRUPT_SUFFIX);
    if let Some(trimmed) = stem.strip_suffix(&marker) {
        return Some(trimmed);
    }
    let (head, counter) = stem.rsplit_once('_')?;
    if counter.is_empty() || !counter.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    head.strip_suffix(&marker)
}

fn is_corrupt_backup(name: &str) -> bool {
    name.strip_suffix(&format!(".{}", FILE_EXTENSION))
        .and_then(strip_corrupt_marker)
        .is_some()
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let mut stem = name.strip_suffix(&format!(".{}", FILE_EXTENSION))?;
    if let Some(trimmed) = strip_corrupt_marker(stem) {
        stem = trimmed;
    }
    let mut segments = stem.rsplit('_');
    let time = segments.next()?;
    let date = segments.next()?;
    if !is_digits(date, 8) || !is_digits(time, 4) {
        return None;
    }
    let raw = format!("{}{}", date, time);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_sanitizes_names() {
        assert_eq!(canonical_key("Registros"), "registros");
        assert_eq!(canonical_key("mis cuentas/2024"), "mis_cuentas_2024");
        assert_eq!(canonical_key("   "), "registros");
    }

    #[test]
    fn backup_timestamps_parse_with_and_without_corrupt_suffix() {
        let plain = parse_backup_timestamp("registros_20240305_1030.json").expect("timestamp");
        let corrupt =
            parse_backup_timestamp("registros_20240305_1030_corrupt.json").expect("timestamp");
        assert_eq!(plain, corrupt);
        assert!(is_corrupt_backup("registros_20240305_1030_corrupt.json"));
        assert!(!is_corrupt_backup("registros_20240305_1030.json"));
        assert_eq!(parse_backup_timestamp("registros.json"), None);
    }

    #[test]
    fn numbered_quarantine_names_are_recognised() {
        let name = "registros_20240305_1030_corrupt_2.json";
        assert!(is_corrupt_backup(name));
        assert_eq!(
            parse_backup_timestamp(name),
            parse_backup_timestamp("registros_20240305_1030.json")
        );
        assert!(!is_corrupt_backup("registros_20240305_1030.json"));
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/registros.json")),
            PathBuf::from("/data/registros.json.tmp")
        );
    }
}
