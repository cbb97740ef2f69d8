use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Caché LRU acotada (texturas a tamaño completo del lightbox).
pub struct ImageCache<K, V> {
    entries: HashMap<K, V>,
    max_cache_size: usize,
    access_order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V> ImageCache<K, V> {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_cache_size: max_size.max(1),
            access_order: VecDeque::new(),
        }
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.entries.contains_key(key) {
            self.touch(key);
        }
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.contains_key(&key) {
            self.touch(&key);
        } else {
            while self.entries.len() >= self.max_cache_size {
                let Some(oldest) = self.access_order.pop_front() else {
                    break;
                };
                self.entries.remove(&oldest);
            }
            self.access_order.push_back(key.clone());
        }
        self.entries.insert(key, value);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            if let Some(k) = self.access_order.remove(pos) {
                self.access_order.push_back(k);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = ImageCache::new(2);
        cache.insert(0, "a");
        cache.insert(1, "b");
        assert_eq!(cache.get(&0), Some(&"a"));

        cache.insert(2, "c");
        assert!(cache.contains(&0));
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reinserting_replaces_without_eviction() {
        let mut cache = ImageCache::new(2);
        cache.insert(0, "a");
        cache.insert(1, "b");
        cache.insert(0, "a2");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&0), Some(&"a2"));
        assert!(cache.contains(&1));
    }

    #[test]
    fn clear_empties_everything() {
        let mut cache = ImageCache::new(3);
        cache.insert("x", 1);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&"x"), None);
    }
}
