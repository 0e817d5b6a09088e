use brandkit_error::storage::StorageError;
use brandkit_models::enums::media::MediaKind;
use brandkit_repository::MediaStore;
use std::path::Path;
use tempfile::TempDir;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

fn store(root: &TempDir) -> MediaStore {
    MediaStore::with_dirs(
        root.path().join("logos"),
        root.path().join("media"),
        "/uploads/",
    )
}

#[tokio::test]
async fn stored_files_are_listed_by_type() {
    let root = TempDir::new().unwrap();
    let store = store(&root);

    let logo = store
        .store(MediaKind::Logos, Some("acme.png"), Some("image/png"), PNG.to_vec())
        .await
        .unwrap();
    store
        .store(MediaKind::Media, Some("hero"), Some("image/jpeg"), b"jpeg".to_vec())
        .await
        .unwrap();

    assert_eq!(logo.url, "/uploads/logos/acme.png");
    assert_eq!(logo.size, PNG.len() as u64);
    assert_eq!(std::fs::read(&logo.path).unwrap(), PNG);

    let logos = store.list(Some(MediaKind::Logos)).await.unwrap();
    assert_eq!(logos.total, 1);
    assert_eq!(logos.images[0].filename, "acme.png");
    assert_eq!(logos.images[0].kind, MediaKind::Logos);
    assert_eq!(logos.types, MediaKind::ALL.to_vec());

    let all = store.list(None).await.unwrap();
    assert_eq!(all.total, 2);
    let media: Vec<_> = all
        .images
        .iter()
        .filter(|i| i.kind == MediaKind::Media)
        .map(|i| i.filename.as_str())
        .collect();
    assert_eq!(media, vec!["hero.jpg"]);
}

#[tokio::test]
async fn unnamed_upload_is_named_by_content_hash() {
    let root = TempDir::new().unwrap();
    let store = store(&root);

    let first = store
        .store(MediaKind::Logos, None, Some("image/png"), PNG.to_vec())
        .await
        .unwrap();
    let again = store
        .store(MediaKind::Logos, Some("  "), Some("image/png"), PNG.to_vec())
        .await
        .unwrap();

    assert_eq!(first.url, again.url);
    let name = Path::new(&first.path).file_name().unwrap().to_str().unwrap();
    assert!(name.ends_with(".png"));
    assert_eq!(name.len(), 64 + ".png".len());
    assert_eq!(store.list(None).await.unwrap().total, 1);
}

#[tokio::test]
async fn deletion_removes_the_file() {
    let root = TempDir::new().unwrap();
    let store = store(&root);
    let stored = store
        .store(MediaKind::Media, Some("banner.webp"), None, b"webp".to_vec())
        .await
        .unwrap();

    let result = store.delete(MediaKind::Media, "banner.webp").await.unwrap();

    assert!(result.success);
    assert!(!Path::new(&stored.path).exists());
    assert_eq!(store.list(Some(MediaKind::Media)).await.unwrap().total, 0);

    let err = store
        .delete(MediaKind::Media, "banner.webp")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::EntityNotFound(_)));
}

#[tokio::test]
async fn unsafe_names_are_rejected() {
    let root = TempDir::new().unwrap();
    let store = store(&root);

    for name in ["../escape.png", "a/b.png", "..\\win.png", "..", ".hidden"] {
        let err = store
            .store(MediaKind::Logos, Some(name), Some("image/png"), PNG.to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidInput(_)), "{name}");

        let err = store.delete(MediaKind::Logos, name).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidInput(_)), "{name}");
    }

    assert!(!root.path().join("escape.png").exists());
    assert_eq!(store.list(None).await.unwrap().total, 0);
}

#[tokio::test]
async fn listing_missing_directories_is_empty() {
    let root = TempDir::new().unwrap();
    let list = store(&root).list(None).await.unwrap();
    assert_eq!(list.total, 0);
    assert!(list.images.is_empty());
}
