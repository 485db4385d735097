//! Config file discovery and loading.
//!
//! # Discovery
//!
//! Each candidate path is normalized to a glob pattern:
//!
//! - A leading `~` expands to the user's home directory.
//! - Relative paths are made absolute against the current directory.
//! - An existing directory becomes `<dir>/*`, so every file inside is a
//!   candidate.
//!
//! Each pattern expands to the matching regular files, sorted
//! lexicographically. Expansions are concatenated in candidate order, so the
//! final list is **priority-ascending**: later files override earlier ones,
//! and `99-local.ini` in a directory naturally wins over `10-base.ini`.
//!
//! A candidate that matches nothing contributes nothing. Listing a path is a
//! suggestion, not a requirement.
//!
//! # Loading
//!
//! Matched files that cannot be read are skipped with a warning. Content
//! that is not valid UTF-8 is a parse error.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::warn;

use crate::error::GetconfError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand a leading `~` to the home directory.
///
/// Paths that do not start with a `~` component are returned unchanged, as
/// is everything when no home directory can be determined.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match directories::UserDirs::new() {
        Some(user) => user.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// Normalize one candidate path into an absolute glob pattern.
pub fn candidate_pattern(path: &Path) -> String {
    let expanded = expand_home(path);
    let absolute = if expanded.as_os_str().is_empty() {
        std::env::current_dir().unwrap_or(expanded)
    } else {
        std::path::absolute(&expanded).unwrap_or(expanded)
    };
    if absolute.is_dir() {
        let dir = Pattern::escape(&absolute.to_string_lossy());
        let sep = std::path::MAIN_SEPARATOR;
        format!("{}{sep}*", dir.trim_end_matches(sep))
    } else {
        absolute.to_string_lossy().into_owned()
    }
}

/// Expand one pattern into its matching regular files, sorted.
///
/// A pattern that does not parse as a glob (an unclosed `[`, say) is taken
/// literally.
pub fn expand_pattern(pattern: &str) -> Vec<PathBuf> {
    let paths = match glob::glob_with(pattern, MATCH_OPTIONS) {
        Ok(paths) => paths,
        Err(e) => {
            let literal = PathBuf::from(pattern);
            if literal.is_file() {
                return vec![literal];
            }
            warn!(pattern, error = %e, "ignoring invalid config search pattern");
            return vec![];
        }
    };

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(path = %e.path().display(), error = %e.error(), "skipping unreadable path");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files
}

/// Expand all patterns into one priority-ascending file list.
pub fn discover(patterns: &[String]) -> Vec<PathBuf> {
    patterns.iter().flat_map(|p| expand_pattern(p)).collect()
}

/// Read every file in order. Unreadable files are skipped.
pub fn load_config_files(files: &[PathBuf]) -> Result<Vec<(PathBuf, String)>, GetconfError> {
    let mut results = Vec::new();
    for path in files {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable config file");
                continue;
            }
        };
        let content = String::from_utf8(bytes).map_err(|e| GetconfError::ParseError {
            path: path.clone(),
            line: 0,
            reason: format!("file is not valid UTF-8: {e}"),
        })?;
        results.push((path.clone(), content));
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pattern_of(path: &Path) -> String {
        candidate_pattern(path)
    }

    #[test]
    fn missing_file_matches_nothing() {
        let dir = TempDir::new().unwrap();
        let files = discover(&[pattern_of(&dir.path().join("nope.ini"))]);
        assert!(files.is_empty());
    }

    #[test]
    fn explicit_file_matches_itself() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.ini");
        fs::write(&file, "[a]\n").unwrap();
        assert_eq!(discover(&[pattern_of(&file)]), vec![file]);
    }

    #[test]
    fn directory_becomes_wildcard() {
        let dir = TempDir::new().unwrap();
        let pattern = pattern_of(dir.path());
        assert!(pattern.ends_with('*'));
        assert!(pattern.starts_with(&*Pattern::escape(&dir.path().to_string_lossy())));
    }

    #[test]
    fn directory_files_sorted_lexicographically() {
        let dir = TempDir::new().unwrap();
        for name in ["99-local.ini", "10-base.ini", "50-mid.ini"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let files = discover(&[pattern_of(dir.path())]);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["10-base.ini", "50-mid.ini", "99-local.ini"]);
    }

    #[test]
    fn subdirectories_and_hidden_files_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join(".hidden.ini"), "").unwrap();
        fs::write(dir.path().join("visible.ini"), "").unwrap();
        let files = discover(&[pattern_of(dir.path())]);
        assert_eq!(files, vec![dir.path().join("visible.ini")]);
    }

    #[test]
    fn hidden_file_named_literally_matches() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join(".myapp.ini");
        fs::write(&file, "").unwrap();
        assert_eq!(discover(&[pattern_of(&file)]), vec![file]);
    }

    #[test]
    fn glob_pattern_candidate() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.ini"), "").unwrap();
        fs::write(dir.path().join("a.ini"), "").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();
        let files = discover(&[pattern_of(&dir.path().join("*.ini"))]);
        assert_eq!(
            files,
            vec![dir.path().join("a.ini"), dir.path().join("b.ini")]
        );
    }

    #[test]
    fn candidate_order_is_preserved() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("z.ini"), "").unwrap();
        fs::write(second.path().join("a.ini"), "").unwrap();
        let files = discover(&[pattern_of(first.path()), pattern_of(second.path())]);
        assert_eq!(
            files,
            vec![first.path().join("z.ini"), second.path().join("a.ini")]
        );
    }

    #[test]
    fn two_empty_candidates_give_empty_list() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        assert!(discover(&[pattern_of(a.path()), pattern_of(&b.path().join("x.ini"))]).is_empty());
    }

    #[test]
    fn invalid_pattern_matches_nothing() {
        assert!(expand_pattern("/tmp/[unterminated").is_empty());
    }

    #[test]
    fn unclosed_bracket_in_existing_file_taken_literally() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("settings[prod.ini");
        fs::write(&file, "[x]\nk = v\n").unwrap();
        assert_eq!(discover(&[candidate_pattern(&file)]), vec![file]);
    }

    #[test]
    fn relative_path_made_absolute() {
        let pattern = pattern_of(Path::new("surely-missing-getconf.ini"));
        assert!(Path::new(&pattern).is_absolute());
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(user) = directories::UserDirs::new() else {
            return;
        };
        assert_eq!(
            expand_home(Path::new("~/.myapp.ini")),
            user.home_dir().join(".myapp.ini")
        );
        assert_eq!(expand_home(Path::new("~")), user.home_dir());
    }

    #[test]
    fn tilde_inside_name_untouched() {
        assert_eq!(expand_home(Path::new("/etc/~app")), PathBuf::from("/etc/~app"));
        assert_eq!(expand_home(Path::new("~user/x")), PathBuf::from("~user/x"));
    }

    #[test]
    fn load_reads_in_order() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.ini");
        let b = dir.path().join("b.ini");
        fs::write(&a, "[x]\nk = 1\n").unwrap();
        fs::write(&b, "[x]\nk = 2\n").unwrap();
        let loaded = load_config_files(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].0, a);
        assert!(loaded[1].1.contains("k = 2"));
    }

    #[test]
    fn load_skips_vanished_file() {
        let dir = TempDir::new().unwrap();
        let loaded = load_config_files(&[dir.path().join("gone.ini")]).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn load_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bin.ini");
        fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            load_config_files(&[file]),
            Err(GetconfError::ParseError { .. })
        ));
    }
}
