use std::io::Write;
use std::sync::Arc;
use std::thread;

use net::{HttpSource, MemorySource, NetError, TextSource};

#[test]
fn sources_are_shareable_across_threads() {
    let source: Arc<dyn TextSource> = Arc::new(MemorySource::new().with("data.json", "[]"));
    let worker = {
        let source = Arc::clone(&source);
        thread::spawn(move || source.fetch_text("data.json"))
    };
    let body = worker.join().expect("fetch thread").expect("body");
    assert_eq!(body, "[]");
}

#[test]
fn files_are_read_from_disk() {
    let dir = std::env::temp_dir().join(format!("net-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("dir");
    let path = dir.join("style.css");
    std::fs::File::create(&path)
        .and_then(|mut f| f.write_all(b".openmoji { height: 1em; }"))
        .expect("write");

    let source = HttpSource::new();
    let text = source
        .fetch_text(path.to_str().expect("utf-8 path"))
        .expect("read");
    assert_eq!(text, ".openmoji { height: 1em; }");

    let url = format!("file://{}", path.display());
    assert_eq!(source.fetch_text(&url).expect("file url"), text);

    let missing = source.fetch_text(dir.join("missing.css").to_str().expect("utf-8 path"));
    assert!(matches!(missing, Err(NetError::Io { .. })));
    let _ = std::fs::remove_dir_all(&dir);
}
