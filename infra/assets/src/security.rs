use crate::error::AssetError;
use std::path::{Component, Path, PathBuf};

/// Collapse `.` / `..` lexically while ensuring the name never escapes the store root.
///
/// Allows `..` as long as it doesn't go "above" the root (i.e. above the empty
/// relative base).
fn normalize_relative(name: &str) -> Result<PathBuf, AssetError> {
    let path = Path::new(name);
    let mut out = PathBuf::new();

    for c in path.components() {
        match c {
            Component::CurDir => {},
            Component::Normal(seg) => out.push(seg),
            Component::ParentDir => {
                if !out.pop() {
                    return Err(AssetError::InvalidName {
                        message: name.to_owned().into(),
                        context: Some("Asset name escapes the store root via '..'".into()),
                    });
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(AssetError::InvalidName {
                    message: name.to_owned().into(),
                    context: Some("Absolute asset names are not allowed".into()),
                });
            },
        }
    }

    if out.as_os_str().is_empty() {
        return Err(AssetError::InvalidName {
            message: name.to_owned().into(),
            context: Some("Asset name is empty".into()),
        });
    }

    Ok(out)
}

/// Canonical form of an asset name used as a lookup key (`./i18n/../a.json` -> `a.json`).
pub(crate) fn normalize_name(name: &str) -> Result<String, AssetError> {
    let normalized = normalize_relative(name)?;
    let segments: Vec<_> = normalized.iter().map(|seg| seg.to_string_lossy()).collect();
    Ok(segments.join("/"))
}

/// Joins a name to the (canonical) root and ensures the target stays inside it.
///
/// Symlinks are followed; a link pointing outside the root is rejected.
pub(crate) fn resolve_path(root: &Path, name: &str) -> Result<PathBuf, AssetError> {
    let joined = root.join(normalize_relative(name)?);

    match joined.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
        Ok(canonical) => Err(AssetError::InvalidName {
            message: canonical.display().to_string().into(),
            context: Some("Asset resolves outside the store root".into()),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AssetError::not_found(name)),
        Err(e) => Err(AssetError::Io {
            source: e,
            context: Some(format!("Failed to resolve asset: {name}").into()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_normalized() {
        assert_eq!(normalize_name("appsettings.json").unwrap(), "appsettings.json");
        assert_eq!(normalize_name("./i18n/../config/app.json").unwrap(), "config/app.json");
        assert_eq!(normalize_name("a//b.json").unwrap(), "a/b.json");
    }

    #[test]
    fn escaping_names_are_rejected() {
        for name in ["../secret.json", "a/../../b.json", "/etc/passwd", "", ".", "a/.."] {
            assert!(
                matches!(normalize_name(name), Err(AssetError::InvalidName { .. })),
                "expected {name:?} to be rejected"
            );
        }
    }
}
