//! Path helpers shared across the daemon
//!
//! Joining here follows the lexical rules of the directory layout: the
//! second argument is always treated as relative to the first, even when it
//! starts with `/`, and the result is cleaned.

use std::path::{Component, Path, PathBuf};

/// Lexically clean a path
///
/// Collapses repeated separators, drops `.` and trailing slashes, and
/// resolves `..` against preceding components. `..` above `/` is dropped.
/// An empty input yields `.`.
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let mut rooted = false;
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                rooted = true;
                parts.clear();
            }
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(component),
            },
            Component::Normal(_) => parts.push(component),
        }
    }

    let mut cleaned = if rooted {
        PathBuf::from("/")
    } else {
        PathBuf::new()
    };
    cleaned.extend(parts);

    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Join `suffix` below `base`, treating an absolute suffix as relative
#[must_use]
pub fn join_under(base: &Path, suffix: impl AsRef<Path>) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in suffix.as_ref().components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            other => joined.push(other),
        }
    }
    clean_path(&joined)
}

/// Check whether `path` lies at or below `root`, comparing whole components
#[must_use]
pub fn is_under_root(path: &Path, root: &Path) -> bool {
    path.is_absolute() && clean_path(path).starts_with(clean_path(root))
}

/// Strip `root` from `path`, returning the remainder re-anchored at `/`
///
/// # Panics
///
/// Panics if `path` is not absolute or does not lie below `root`. Both are
/// caller bugs.
#[must_use]
pub fn strip_root(path: &Path, root: &Path) -> PathBuf {
    assert!(
        path.is_absolute(),
        "supplied path is not absolute {}",
        path.display()
    );
    let cleaned = clean_path(path);
    let Ok(rest) = cleaned.strip_prefix(clean_path(root)) else {
        panic!(
            "supplied path is not related to global root {}",
            path.display()
        );
    };
    Path::new("/").join(rest)
}
