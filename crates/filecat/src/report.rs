//! End-of-run statistics

use std::fmt;

use memlru::LruCache;
use serde::Serialize;

/// Snapshot of cache state and counters
#[derive(Debug, Serialize)]
pub struct Report {
    pub entries: usize,
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub rejections: u64,
    pub hit_ratio: f64,
}

impl Report {
    pub fn from_cache<V: ?Sized>(cache: &LruCache<V>) -> Self {
        let stats = cache.stats();
        Self {
            entries: cache.len(),
            size: cache.size(),
            capacity: cache.capacity(),
            hits: stats.hits(),
            misses: stats.misses(),
            inserts: stats.inserts(),
            evictions: stats.evictions(),
            rejections: stats.rejections(),
            hit_ratio: stats.hit_ratio(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "entries:    {}", self.entries)?;
        writeln!(f, "size:       {} / {} bytes", self.size, self.capacity)?;
        writeln!(
            f,
            "hits:       {} ({:.1}%)",
            self.hits,
            self.hit_ratio * 100.0
        )?;
        writeln!(f, "misses:     {}", self.misses)?;
        writeln!(f, "inserts:    {}", self.inserts)?;
        writeln!(f, "evictions:  {}", self.evictions)?;
        writeln!(f, "rejections: {}", self.rejections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_cache() {
        let cache: LruCache<str> = LruCache::new(10);
        cache.add("a", "12345").unwrap();
        cache.add("b", "12345").unwrap();
        cache.add("c", "12345").unwrap();
        cache.get("c");
        cache.get("a");
        assert!(cache.add("d", "this is too long").is_err());

        let report = Report::from_cache(&cache);
        assert_eq!(report.entries, 2);
        assert_eq!(report.size, 10);
        assert_eq!(report.hits, 1);
        assert_eq!(report.misses, 1);
        assert_eq!(report.evictions, 1);
        assert_eq!(report.rejections, 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["capacity"], 10);
        assert_eq!(json["inserts"], 3);

        let text = report.to_string();
        assert!(text.contains("size:       10 / 10 bytes"));
        assert!(text.contains("hits:       1 (50.0%)"));
    }
}
