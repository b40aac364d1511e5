//! Path normalization

use std::path::{Component, Path, PathBuf};

/// Why a lexical join could not produce a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    EmptyBase,
    EmptyFragment,
    AboveRoot,
}

impl std::fmt::Display for JoinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBase => f.write_str("base directory is empty"),
            Self::EmptyFragment => f.write_str("reference has no path after the marker"),
            Self::AboveRoot => f.write_str("'..' climbs above the filesystem root"),
        }
    }
}

/// Join `fragment` onto `base` and fold `.` and `..` without touching the
/// filesystem.
///
/// The fragment is joined exactly as written; only `.` and `..` components
/// are rewritten. A whitespace-only fragment counts as empty. An absolute
/// fragment replaces the base, as with [`Path::join`]. Leading `..`
/// components of a relative base are kept.
///
/// With an absolute base, a `..` that would climb past the root is an error
/// ([`JoinError::AboveRoot`]) rather than being clamped to `/` the way POSIX
/// resolves `/..`.
pub fn lexical_join(base: &Path, fragment: &str) -> Result<PathBuf, JoinError> {
    if base.as_os_str().is_empty() {
        return Err(JoinError::EmptyBase);
    }
    if fragment.trim().is_empty() {
        return Err(JoinError::EmptyFragment);
    }

    let joined = base.join(fragment);
    let mut out = PathBuf::new();
    // Count of normal components pushed after any root/prefix
    let mut depth = 0usize;
    let mut rooted = false;

    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                out.push(component.as_os_str());
                rooted = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                } else if rooted {
                    return Err(JoinError::AboveRoot);
                } else {
                    out.push("..");
                }
            }
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_join_parent_components() {
        let joined = lexical_join(Path::new("/flows/x/y"), "../../rtl/top.sv").unwrap();
        assert_eq!(joined, PathBuf::from("/flows/rtl/top.sv"));

        let joined = lexical_join(Path::new("/flows/x"), "../../rtl/top.sv").unwrap();
        assert_eq!(joined, PathBuf::from("/rtl/top.sv"));
    }

    #[test]
    fn test_lexical_join_current_dir() {
        let joined = lexical_join(Path::new("/design"), "./pin_order.cfg").unwrap();
        assert_eq!(joined, PathBuf::from("/design/pin_order.cfg"));
    }

    #[test]
    fn test_lexical_join_above_root() {
        let err = lexical_join(Path::new("/flows"), "../../top.sv").unwrap_err();
        assert_eq!(err, JoinError::AboveRoot);
    }

    #[test]
    fn test_lexical_join_relative_base_keeps_leading_parents() {
        let joined = lexical_join(Path::new("designs"), "../../rtl/a.v").unwrap();
        assert_eq!(joined, PathBuf::from("../rtl/a.v"));
    }

    #[test]
    fn test_lexical_join_empty_inputs() {
        assert_eq!(lexical_join(Path::new(""), "a.v").unwrap_err(), JoinError::EmptyBase);
        assert_eq!(lexical_join(Path::new("/x"), "").unwrap_err(), JoinError::EmptyFragment);
        assert_eq!(lexical_join(Path::new("/x"), "  ").unwrap_err(), JoinError::EmptyFragment);
    }

    #[test]
    fn test_lexical_join_keeps_fragment_verbatim() {
        let joined = lexical_join(Path::new("/w/a/b/c"), " rtl\\a b.v ").unwrap();
        assert_eq!(joined, PathBuf::from("/w/a/b/c/ rtl\\a b.v "));

        let joined = lexical_join(Path::new("/w/a/b/c"), "../my rtl/top .sv").unwrap();
        assert_eq!(joined, PathBuf::from("/w/a/b/my rtl/top .sv"));
    }
}
