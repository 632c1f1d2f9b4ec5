use std::fs::{self, File};
use std::io::Read;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use flate2::read::GzDecoder;
use filecache::{CachedFileReader, Error, FileCacheItem, SharedCache};
use memlru::LruCache;
use tempfile::TempDir;

fn reader(capacity: usize, compression: bool) -> (Arc<LruCache<FileCacheItem>>, CachedFileReader) {
    let cache = Arc::new(LruCache::new(capacity));
    let shared: SharedCache = cache.clone();
    (cache, CachedFileReader::new(Some(shared), compression))
}

#[test]
fn test_second_read_hits_cache() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("index.html");
    fs::write(&path, b"<h1>hello</h1>").unwrap();

    let (cache, reader) = reader(1024, false);

    assert_eq!(&reader.read(&path).unwrap()[..], b"<h1>hello</h1>");
    assert_eq!(&reader.read(&path).unwrap()[..], b"<h1>hello</h1>");

    assert_eq!(cache.stats().misses(), 1);
    assert_eq!(cache.stats().hits(), 1);
    assert_eq!(cache.size(), 14);
}

#[test]
fn test_modified_file_is_reread() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.txt");
    fs::write(&path, b"first").unwrap();

    let (cache, reader) = reader(1024, false);
    assert_eq!(&reader.read(&path).unwrap()[..], b"first");

    fs::write(&path, b"second version").unwrap();
    let later = SystemTime::now() + Duration::from_secs(5);
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(later)
        .unwrap();

    assert_eq!(&reader.read(&path).unwrap()[..], b"second version");
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.size(), 14);
}

#[test]
fn test_compressed_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.txt");
    let content = "lorem ipsum ".repeat(200);
    fs::write(&path, &content).unwrap();

    let (cache, reader) = reader(64 * 1024, true);
    let packed = reader.read(&path).unwrap();
    assert!(packed.len() < content.len());

    let mut unpacked = String::new();
    GzDecoder::new(&packed[..])
        .read_to_string(&mut unpacked)
        .unwrap();
    assert_eq!(unpacked, content);

    let key = format!("{}compressed", path.display());
    assert!(cache.contains(&key));
}

#[test]
fn test_file_larger_than_cache_still_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.bin");
    fs::write(&path, vec![7u8; 100]).unwrap();

    let (cache, reader) = reader(50, false);
    assert_eq!(reader.read(&path).unwrap().len(), 100);
    assert!(cache.is_empty());
    assert_eq!(cache.stats().rejections(), 1);
}

#[test]
fn test_reader_without_cache() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, b"abc").unwrap();

    let reader = CachedFileReader::new(None, false);
    assert_eq!(&reader.read(&path).unwrap()[..], b"abc");
}

#[test]
fn test_errors() {
    let dir = TempDir::new().unwrap();
    let (_, reader) = reader(1024, false);

    assert!(matches!(reader.read(dir.path()), Err(Error::NotAFile(_))));
    assert!(matches!(
        reader.read(dir.path().join("missing")),
        Err(Error::Io(_))
    ));
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_paths_never_share_an_entry() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    let first = dir.path().join(OsStr::from_bytes(b"f\xff"));
    let second = dir.path().join(OsStr::from_bytes(b"f\xfe"));
    fs::write(&first, b"contents of first").unwrap();
    fs::write(&second, b"contents of second").unwrap();

    let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    for path in [&first, &second] {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(stamp)
            .unwrap();
    }

    let (cache, reader) = reader(1024, false);
    assert_eq!(&reader.read(&first).unwrap()[..], b"contents of first");
    assert_eq!(&reader.read(&second).unwrap()[..], b"contents of second");
    assert_eq!(&reader.read(&first).unwrap()[..], b"contents of first");
    assert!(cache.is_empty());
}
