//! On-disk credential hand-off store
//!
//! Plaintext records of generated passwords, written so an administrator can
//! hand the initial credentials to a new employee. The store is explicitly
//! non-authoritative: it has no transactional link to the accounts table,
//! writes and deletes are best-effort, and every I/O failure is swallowed
//! after logging so credential issuance never fails on it.

use chrono::Utc;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*";

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^Date Created: (.*)$").unwrap());
static EMPLOYEE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^Employee: (.*)$").unwrap());
static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^Username: (.*)$").unwrap());
static PASSWORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^Password: (.*)$").unwrap());

/// Parsed credential hand-off record
#[derive(Debug, Clone, Serialize)]
pub struct CredentialRecord {
    pub date_created: String,
    pub employee: String,
    pub username: String,
    pub password: String,
}

/// Filesystem-backed credential store
pub struct CredentialStore {
    directory: PathBuf,
}

impl CredentialStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Generate a random password containing at least one uppercase letter,
    /// one lowercase letter, one digit and one symbol. The guarantee holds
    /// for every call: the four class picks survive the final shuffle.
    pub fn generate_password(length: usize) -> String {
        let length = length.max(4);
        let mut rng = rand::thread_rng();

        let mut chars: Vec<u8> = vec![
            UPPERCASE[rng.gen_range(0..UPPERCASE.len())],
            LOWERCASE[rng.gen_range(0..LOWERCASE.len())],
            DIGITS[rng.gen_range(0..DIGITS.len())],
            SYMBOLS[rng.gen_range(0..SYMBOLS.len())],
        ];

        let all: Vec<u8> = [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS].concat();
        for _ in chars.len()..length {
            chars.push(all[rng.gen_range(0..all.len())]);
        }

        chars.shuffle(&mut rng);

        String::from_utf8(chars).expect("password characters are ASCII")
    }

    /// Write a credential record for a freshly created account.
    ///
    /// Must never fail the enclosing account creation: errors are logged and
    /// dropped.
    pub fn persist(&self, employee_name: &str, username: &str, password: &str) {
        if let Err(e) = self.try_persist(employee_name, username, password) {
            tracing::warn!(
                username = %username,
                error = %e,
                "Failed to write credential record"
            );
        }
    }

    fn try_persist(
        &self,
        employee_name: &str,
        username: &str,
        password: &str,
    ) -> std::io::Result<()> {
        fs::create_dir_all(&self.directory)?;

        let now = Utc::now();
        let filename = format!("{}_{}.txt", username, now.format("%Y%m%d_%H%M%S"));
        let content = format!(
            "Date Created: {}\nEmployee: {}\nUsername: {}\nPassword: {}\n",
            now.format("%Y-%m-%d %H:%M:%S"),
            employee_name,
            username,
            password,
        );

        fs::write(self.directory.join(filename), content)?;

        tracing::info!(username = %username, "Credential record written");
        Ok(())
    }

    /// Delete every record whose filename is prefixed with `username_`.
    ///
    /// Best-effort: per-file failures are logged and skipped, partial
    /// deletion is acceptable.
    pub fn purge(&self, username: &str) {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            // Nothing to purge if the directory was never created
            Err(_) => return,
        };

        let prefix = format!("{}_", username);
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(&prefix) || !name.ends_with(".txt") {
                continue;
            }
            if let Err(e) = fs::remove_file(entry.path()) {
                tracing::warn!(file = %name, error = %e, "Failed to delete credential record");
            } else {
                tracing::info!(file = %name, "Credential record deleted");
            }
        }
    }

    /// Find the most recent record for a username.
    ///
    /// Matches on the embedded `Username:` line, case-insensitively, so the
    /// lookup works even when the file was renamed.
    pub fn lookup(&self, username: &str) -> Option<CredentialRecord> {
        let entries = fs::read_dir(&self.directory).ok()?;

        let needle = format!("username: {}", username.to_lowercase());
        let mut best: Option<(std::time::SystemTime, CredentialRecord)> = None;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(_) => continue,
            };

            if !content.to_lowercase().contains(&needle) {
                continue;
            }

            let record = parse_record(&content);
            let modified = file_modified(&path);

            match &best {
                Some((newest, _)) if *newest >= modified => {}
                _ => best = Some((modified, record)),
            }
        }

        best.map(|(_, record)| record)
    }
}

fn file_modified(path: &Path) -> std::time::SystemTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
}

fn parse_record(content: &str) -> CredentialRecord {
    let field = |re: &Regex| {
        re.captures(content)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };

    CredentialRecord {
        date_created: field(&DATE_RE),
        employee: field(&EMPLOYEE_RE),
        username: field(&USERNAME_RE),
        password: field(&PASSWORD_RE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_password_length() {
        assert_eq!(CredentialStore::generate_password(12).len(), 12);
        assert_eq!(CredentialStore::generate_password(20).len(), 20);
        // Shorter than the class guarantee saturates to four characters
        assert_eq!(CredentialStore::generate_password(2).len(), 4);
    }

    #[test]
    fn test_generate_password_character_classes() {
        for _ in 0..200 {
            let password = CredentialStore::generate_password(12);
            assert!(password.bytes().any(|b| b.is_ascii_uppercase()));
            assert!(password.bytes().any(|b| b.is_ascii_lowercase()));
            assert!(password.bytes().any(|b| b.is_ascii_digit()));
            assert!(password.bytes().any(|b| SYMBOLS.contains(&b)));
        }
    }

    #[test]
    fn test_parse_record() {
        let content = "Date Created: 2025-03-15 12:00:00\n\
                       Employee: Jane Doe\n\
                       Username: jane_d\n\
                       Password: Xy9!abcdefgh\n";
        let record = parse_record(content);

        assert_eq!(record.date_created, "2025-03-15 12:00:00");
        assert_eq!(record.employee, "Jane Doe");
        assert_eq!(record.username, "jane_d");
        assert_eq!(record.password, "Xy9!abcdefgh");
    }

    #[test]
    fn test_parse_record_missing_fields() {
        let record = parse_record("Username: only_username\n");
        assert_eq!(record.username, "only_username");
        assert_eq!(record.password, "");
    }

    #[test]
    fn test_lookup_missing_directory() {
        let store = CredentialStore::new("does/not/exist");
        assert!(store.lookup("anyone").is_none());
    }

    #[test]
    fn test_purge_missing_directory_is_silent() {
        let store = CredentialStore::new("does/not/exist");
        store.purge("anyone");
    }
}
