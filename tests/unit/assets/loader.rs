use super::*;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "photobooth_loader_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn css_url_wrappers_are_stripped() {
    assert_eq!(strip_css_url("url(\"bg.png\")"), "bg.png");
    assert_eq!(strip_css_url("url('bg.png')"), "bg.png");
    assert_eq!(strip_css_url("url(bg.png)"), "bg.png");
    assert_eq!(strip_css_url("  bg.png "), "bg.png");
    assert_eq!(strip_css_url("url( \"a b.png\" )"), "a b.png");
}

#[test]
fn data_uri_base64_and_percent() {
    assert_eq!(
        decode_data_uri("data:text/plain;base64,aGVsbG8=").unwrap(),
        b"hello".to_vec()
    );
    assert_eq!(
        decode_data_uri("data:text/plain,a%20b%3C").unwrap(),
        b"a b<".to_vec()
    );
    assert!(decode_data_uri("data:text/plain;base64").is_err());
    assert!(decode_data_uri("data:text/plain,%2").is_err());
    assert!(decode_data_uri("text/plain,abc").is_err());
}

#[test]
fn fs_loader_reads_relative_and_file_urls() {
    let dir = temp_dir("fs");
    std::fs::write(dir.join("bg.bin"), b"abc").unwrap();

    let loader = FsLoader::new(&dir);
    assert_eq!(loader.load_bytes("bg.bin").unwrap(), b"abc".to_vec());
    assert_eq!(loader.load_bytes("url('bg.bin')").unwrap(), b"abc".to_vec());

    let file_url = format!("file://{}", dir.join("bg.bin").display());
    assert_eq!(loader.load_bytes(&file_url).unwrap(), b"abc".to_vec());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn fs_loader_failures_are_decode_errors() {
    let loader = FsLoader::new(std::env::temp_dir());
    let missing = loader.load_bytes("photobooth-definitely-missing.png");
    assert!(matches!(missing, Err(BoothError::Decode(_))));
    let remote = loader.load_bytes("https://example.com/bg.png");
    assert!(matches!(remote, Err(BoothError::Decode(_))));
    let escape = loader.load_bytes("../etc/passwd");
    assert!(matches!(escape, Err(BoothError::Decode(_))));
}

#[test]
fn memory_loader_lookup() {
    let mut loader = MemoryLoader::new();
    loader.insert("bg", vec![1, 2, 3]);
    assert_eq!(loader.load_bytes("bg").unwrap(), vec![1, 2, 3]);
    assert_eq!(loader.load_bytes("url(bg)").unwrap(), vec![1, 2, 3]);
    assert!(loader.load_bytes("other").is_err());
    assert_eq!(
        loader.load_bytes("data:x;base64,AQID").unwrap(),
        vec![1, 2, 3]
    );
}
