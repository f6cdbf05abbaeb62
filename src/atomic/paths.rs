// Working directory expansion

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` and `$VAR`/`${VAR}` references.
///
/// Unset variables stay as written.
fn expand(value: &str) -> PathBuf {
    let expanded = shellexpand::full_with_context_no_errors(
        value,
        || dirs::home_dir().map(|home| home.to_string_lossy().into_owned()),
        |name| std::env::var(name).ok(),
    );
    PathBuf::from(expanded.into_owned())
}

/// Resolve `.` and `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Absolute path for a user-supplied value such as `~/atomics` or `$TMPDIR/run`
pub fn abs_path(value: &str) -> PathBuf {
    let expanded = expand(value);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    };
    normalize(&absolute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expands_env_vars() {
        let path = std::env::var("PATH").unwrap();
        assert_eq!(expand("$PATH"), PathBuf::from(&path));
        assert_eq!(expand("${PATH}/x"), PathBuf::from(format!("{path}/x")));
    }

    #[test]
    fn test_unset_var_kept() {
        let value = "/tmp/$ATOMIC_RUNNER_SURELY_UNSET_VAR/x";
        assert_eq!(expand(value), PathBuf::from(value));
        assert_eq!(expand("cost: $"), PathBuf::from("cost: $"));
    }

    #[test]
    fn test_expands_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(abs_path("~"), normalize(&home));
            assert_eq!(abs_path("~/atomics"), normalize(&home.join("atomics")));
        }
    }

    #[test]
    fn test_tilde_only_expanded_at_start() {
        assert_eq!(expand("a/~/b"), PathBuf::from("a/~/b"));
    }

    #[cfg(unix)]
    #[test]
    fn test_normalizes_dots() {
        assert_eq!(abs_path("/tmp/a/./b/../c"), PathBuf::from("/tmp/a/c"));
    }

    #[test]
    fn test_relative_is_made_absolute() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(abs_path("sub"), normalize(&cwd.join("sub")));
        assert!(abs_path(".").is_absolute());
    }
}
