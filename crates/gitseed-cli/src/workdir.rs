//! Working directory naming.

use chrono::{DateTime, Local};

/// Derive the working directory name for a run: the repository's basename
/// when a URL is given, otherwise a timestamped fallback.
pub fn directory_name(repository: Option<&str>, now: DateTime<Local>) -> String {
    repository.map_or_else(
        || format!("repository-{}", now.format("%Y-%m-%d-%H-%M-%S")),
        repository_basename,
    )
}

fn repository_basename(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    trimmed
        .rsplit('/')
        .next()
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_from_https_url() {
        assert_eq!(
            repository_basename("https://github.com/user/history.git"),
            "history"
        );
    }

    #[test]
    fn test_basename_without_git_suffix() {
        assert_eq!(
            repository_basename("https://github.com/user/history"),
            "history"
        );
    }

    #[test]
    fn test_basename_with_trailing_slash() {
        assert_eq!(
            repository_basename("https://github.com/user/history.git/"),
            "history"
        );
    }

    #[test]
    fn test_basename_from_local_path() {
        assert_eq!(repository_basename("/srv/git/demo.git"), "demo");
    }

    #[test]
    fn test_timestamped_fallback() {
        let now = Local::now();
        let name = directory_name(None, now);
        assert!(name.starts_with("repository-"));
        assert_eq!(name.len(), "repository-".len() + 19);
    }
}
