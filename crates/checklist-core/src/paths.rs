use crate::error::{ChecklistError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CHECKLIST_DIR: &str = ".checklist";

/// Fixed LocalCache key. The cache file is named after it.
pub const CACHE_KEY: &str = "cx-checklist";

pub const CACHE_FILE: &str = ".checklist/cx-checklist.json";
pub const CONFIG_FILE: &str = ".checklist/config.yaml";
pub const RECORD_DB_FILE: &str = ".checklist/remote.redb";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn checklist_dir(root: &Path) -> PathBuf {
    root.join(CHECKLIST_DIR)
}

pub fn cache_path(root: &Path) -> PathBuf {
    root.join(CACHE_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn record_db_path(root: &Path) -> PathBuf {
    root.join(RECORD_DB_FILE)
}

/// The user's home directory, used as the default data root.
pub fn home_root() -> Result<PathBuf> {
    home::home_dir().ok_or(ChecklistError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Identity validation
// ---------------------------------------------------------------------------

static IDENTITY_RE: OnceLock<Regex> = OnceLock::new();

fn identity_re() -> &'static Regex {
    IDENTITY_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*$").unwrap())
}

/// Identities end up as URL path segments and redb keys.
pub fn validate_identity(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 128 || !identity_re().is_match(id) {
        return Err(ChecklistError::InvalidIdentity(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identities() {
        for id in [
            "u1",
            "7d3c2f0e-9a1b-4c5d-8e6f-001122334455",
            "jane.doe",
            "A_b-c",
        ] {
            validate_identity(id).unwrap_or_else(|_| panic!("expected valid: {id}"));
        }
    }

    #[test]
    fn invalid_identities() {
        for id in ["", "-dash-first", "has space", "slash/inside", ".hidden"] {
            assert!(validate_identity(id).is_err(), "expected invalid: {id}");
        }
        assert!(validate_identity(&"a".repeat(129)).is_err());
    }

    #[test]
    fn cache_path_uses_fixed_key() {
        let p = cache_path(Path::new("/data"));
        assert_eq!(p, PathBuf::from("/data/.checklist/cx-checklist.json"));
        assert!(CACHE_FILE.contains(CACHE_KEY));
    }
}
