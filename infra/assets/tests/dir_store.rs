use apphost_assets::{AssetError, AssetStore, DirAssetStore};
use std::fs;
use tempfile::TempDir;

fn store_with(files: &[(&str, &[u8])]) -> (TempDir, DirAssetStore) {
    let temp = TempDir::new().unwrap();
    for (name, bytes) in files {
        let path = temp.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }
    let store = DirAssetStore::builder().root(temp.path()).open().unwrap();
    (temp, store)
}

#[test]
fn reads_nested_assets() {
    let (_temp, store) = store_with(&[("i18n/en.json", b"{\"Hello\":\"Hello\"}")]);

    assert!(store.exists("i18n/en.json"));
    assert_eq!(store.read_to_string("i18n/en.json").unwrap(), "{\"Hello\":\"Hello\"}");
}

#[test]
fn byte_order_mark_is_stripped() {
    let (_temp, store) = store_with(&[("appsettings.json", b"\xEF\xBB\xBF{}")]);
    assert_eq!(store.read("appsettings.json").unwrap(), b"{}");
}

#[test]
fn missing_asset_is_not_found() {
    let (_temp, store) = store_with(&[]);

    assert!(!store.exists("appsettings.json"));
    assert!(matches!(store.open("appsettings.json"), Err(AssetError::NotFound { .. })));
}

#[test]
fn directories_are_not_assets() {
    let (_temp, store) = store_with(&[("i18n/en.json", b"{}")]);

    assert!(!store.exists("i18n"));
    assert!(matches!(store.open("i18n"), Err(AssetError::NotFound { .. })));
}

#[test]
fn path_traversal_blocked() {
    let outer = TempDir::new().unwrap();
    let root = outer.path().join("assets");
    fs::create_dir_all(&root).unwrap();
    fs::write(outer.path().join("secret.json"), b"{}").unwrap();

    let store = DirAssetStore::builder().root(&root).open().unwrap();

    assert!(matches!(store.open("../secret.json"), Err(AssetError::InvalidName { .. })));
    assert!(matches!(store.open("a/../../secret.json"), Err(AssetError::InvalidName { .. })));
    assert!(!store.exists("../secret.json"));
}

#[test]
fn absolute_names_are_rejected() {
    let (temp, store) = store_with(&[("appsettings.json", b"{}")]);
    let absolute = temp.path().join("appsettings.json");

    assert!(matches!(store.open(absolute.to_str().unwrap()), Err(AssetError::InvalidName { .. })));
}

#[cfg(unix)]
#[test]
fn symlinks_cannot_escape_the_root() {
    let outer = TempDir::new().unwrap();
    let root = outer.path().join("assets");
    fs::create_dir_all(&root).unwrap();
    fs::write(outer.path().join("secret.json"), b"{}").unwrap();
    std::os::unix::fs::symlink(outer.path().join("secret.json"), root.join("link.json")).unwrap();

    let store = DirAssetStore::builder().root(&root).open().unwrap();
    assert!(matches!(store.open("link.json"), Err(AssetError::InvalidName { .. })));
}

#[test]
fn invalid_utf8_is_an_io_error() {
    let (_temp, store) = store_with(&[("bad.json", &[0xFF, 0xFE, 0x00])]);

    let err = store.read_to_string("bad.json").unwrap_err();
    assert!(
        matches!(&err, AssetError::Io { source, .. } if source.kind() == std::io::ErrorKind::InvalidData)
    );
}

#[test]
fn root_must_exist_and_be_a_directory() {
    let temp = TempDir::new().unwrap();

    let missing = DirAssetStore::builder().root(temp.path().join("missing")).open().unwrap_err();
    assert!(matches!(missing, AssetError::Io { .. }));

    let file = temp.path().join("file.txt");
    fs::write(&file, b"x").unwrap();
    let not_dir = DirAssetStore::builder().root(&file).open().unwrap_err();
    assert!(matches!(not_dir, AssetError::NotFound { .. }));
}

#[test]
fn store_is_usable_as_a_shared_capability() {
    let (_temp, store) = store_with(&[("appsettings.json", b"{}")]);
    let shared: std::sync::Arc<dyn AssetStore> = std::sync::Arc::new(store.clone());

    assert!(shared.exists("appsettings.json"));
    assert!(store.root().is_absolute());
}
