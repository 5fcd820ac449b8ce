//! Filesystem utilities.

use std::path::{Path, PathBuf};

/// Expand a leading tilde to the home directory.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("/etc/gatecert.yml"), PathBuf::from("/etc/gatecert.yml"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/.gatecert/config.yml"), home.join(".gatecert/config.yml"));
        }
    }
}
