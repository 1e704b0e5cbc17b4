use std::path::PathBuf;

use super::*;

fn temp_files(tag: &str, n: usize) -> (PathBuf, Vec<PathBuf>) {
    let dir = std::env::temp_dir().join(format!(
        "photobooth_upload_{tag}_{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let files = (0..n)
        .map(|i| {
            let p = dir.join(format!("{i}.bin"));
            std::fs::write(&p, [i as u8]).unwrap();
            p
        })
        .collect();
    (dir, files)
}

#[test]
fn fewer_than_four_is_insufficient_input() {
    let (dir, files) = temp_files("few", 3);
    let err = load_upload_batch(&files).unwrap_err();
    assert!(matches!(err, BoothError::InsufficientInput(_)));
    assert!(err.is_user_facing());
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn takes_first_four_in_order() {
    let (dir, files) = temp_files("many", 6);
    let sources = load_upload_batch(&files).unwrap();
    assert_eq!(sources.len(), SLOT_COUNT);
    for (i, s) in sources.iter().enumerate() {
        let RasterSource::Encoded(bytes) = s else {
            panic!("expected encoded source");
        };
        assert_eq!(bytes.as_ref(), &[i as u8]);
    }
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn unreadable_file_is_acquisition_error_and_store_untouched() {
    let (dir, mut files) = temp_files("bad", 4);
    files[2] = dir.join("missing.jpg");
    let mut store = ImageSlotStore::new();
    store.set(0, RasterSource::placeholder()).unwrap();

    let err = upload_into(&mut store, &files).unwrap_err();
    assert!(matches!(err, BoothError::Acquisition(_)));
    assert_eq!(store.filled_count(), 1);
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn upload_into_fills_store() {
    let (dir, files) = temp_files("ok", 4);
    let mut store = ImageSlotStore::new();
    upload_into(&mut store, &files).unwrap();
    assert!(store.is_full());
    std::fs::remove_dir_all(dir).ok();
}
