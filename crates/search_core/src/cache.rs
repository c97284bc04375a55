use std::collections::{BTreeSet, HashMap, HashSet};

/// One search result. Identity is `id`; everything else is display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub id: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub comment_count: u32,
    pub score: i64,
}

/// One fetched page for a search key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub query: String,
    pub page_number: u32,
    pub hits: Vec<Hit>,
}

/// Accumulated hits for one search key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    hits: Vec<Hit>,
    last_page: u32,
    applied_pages: BTreeSet<u32>,
}

impl CacheEntry {
    fn from_page(page: PageResult) -> Self {
        let mut applied_pages = BTreeSet::new();
        applied_pages.insert(page.page_number);
        Self {
            hits: dedupe_within_page(page.hits),
            last_page: page.page_number,
            applied_pages,
        }
    }

    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// Highest page number merged so far.
    pub fn last_page(&self) -> u32 {
        self.last_page
    }

    pub fn has_page(&self, page_number: u32) -> bool {
        self.applied_pages.contains(&page_number)
    }
}

/// Per-session mapping from exact search key to its accumulated pages.
///
/// Keys are compared byte-for-byte. Entries are created on the first merged
/// page and never evicted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Merges `page` into the entry for `key`.
    ///
    /// Hits are concatenated in arrival order, so ids repeated across pages
    /// are kept. A page number that was already applied is ignored and
    /// `false` is returned. An older page arriving late still contributes its
    /// hits but never moves `last_page` backwards.
    pub fn append_page(&mut self, key: &str, page: PageResult) -> bool {
        match self.entries.get_mut(key) {
            None => {
                self.entries
                    .insert(key.to_owned(), CacheEntry::from_page(page));
                true
            }
            Some(entry) => {
                if !entry.applied_pages.insert(page.page_number) {
                    return false;
                }
                entry.hits.extend(dedupe_within_page(page.hits));
                entry.last_page = entry.last_page.max(page.page_number);
                true
            }
        }
    }

    /// Removes the first hit with `hit_id` from the entry for `key`.
    /// Returns whether anything was removed.
    pub fn remove_hit(&mut self, key: &str, hit_id: &str) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        match entry.hits.iter().position(|hit| hit.id == hit_id) {
            Some(index) => {
                entry.hits.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of distinct search keys held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn dedupe_within_page(hits: Vec<Hit>) -> Vec<Hit> {
    let mut seen = HashSet::with_capacity(hits.len());
    hits.into_iter()
        .filter(|hit| seen.insert(hit.id.clone()))
        .collect()
}
