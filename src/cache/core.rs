use std::collections::{HashMap, VecDeque};

use blake3::{Hash, Hasher};

use crate::error::Result;
use crate::geometry::{Position, Rect, Size, Widget};
use crate::shift::{Resolution, resolve};

const DEFAULT_CAPACITY: usize = 64;

/// Digest of (container, cell size, moving widget, proposed position, widget set).
///
/// Widget order is part of the key because it breaks ties between widgets that
/// share a top-left corner.
pub fn resolution_key(
    moving: &Widget,
    proposed: Position,
    widgets: &[Widget],
    container: Size,
    cell_size: u32,
) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(&container.width.to_le_bytes());
    hasher.update(&container.height.to_le_bytes());
    hasher.update(&cell_size.to_le_bytes());
    hash_widget(&mut hasher, moving);
    hasher.update(&proposed.x.to_le_bytes());
    hasher.update(&proposed.y.to_le_bytes());
    hasher.update(&(widgets.len() as u64).to_le_bytes());
    for widget in widgets {
        hash_widget(&mut hasher, widget);
    }
    hasher.finalize()
}

fn hash_widget(hasher: &mut Hasher, widget: &Widget) {
    let id = widget.id.as_str().as_bytes();
    hasher.update(&(id.len() as u64).to_le_bytes());
    hasher.update(id);
    hash_rect(hasher, widget.rect);
    match &widget.config {
        Some(config) => {
            hasher.update(&[1]);
            hasher.update(&(config.len() as u64).to_le_bytes());
            hasher.update(config.as_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

fn hash_rect(hasher: &mut Hasher, rect: Rect) {
    for value in [rect.x, rect.y, rect.width, rect.height] {
        hasher.update(&value.to_le_bytes());
    }
}

/// Bounded memo of [`resolve`] results; the oldest entry is evicted first.
#[derive(Debug)]
pub struct LayoutCache {
    entries: HashMap<Hash, Resolution>,
    order: VecDeque<Hash>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the memoized resolution for these inputs, computing it on a miss.
    /// Errors are not cached.
    pub fn resolve_cached(
        &mut self,
        moving: &Widget,
        proposed: Position,
        widgets: &[Widget],
        container: Size,
        cell_size: u32,
    ) -> Result<Resolution> {
        let key = resolution_key(moving, proposed, widgets, container, cell_size);
        if let Some(hit) = self.entries.get(&key) {
            self.hits = self.hits.saturating_add(1);
            return Ok(hit.clone());
        }

        self.misses = self.misses.saturating_add(1);
        let resolution = resolve(moving, proposed, widgets, container, cell_size)?;
        self.insert(key, resolution.clone());
        Ok(resolution)
    }

    fn insert(&mut self, key: Hash, resolution: Resolution) {
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key, resolution);
        self.order.push_back(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size::new(400, 400);

    fn widgets() -> Vec<Widget> {
        vec![
            Widget::new("a", Rect::new(0, 0, 100, 100)),
            Widget::new("b", Rect::new(100, 0, 100, 100)),
        ]
    }

    #[test]
    fn key_changes_with_any_input() {
        let set = widgets();
        let base = resolution_key(&set[0], Position::new(0, 0), &set, CONTAINER, 50);

        assert_eq!(
            base,
            resolution_key(&set[0], Position::new(0, 0), &set, CONTAINER, 50)
        );
        assert_ne!(
            base,
            resolution_key(&set[0], Position::new(50, 0), &set, CONTAINER, 50)
        );
        assert_ne!(
            base,
            resolution_key(&set[0], Position::new(0, 0), &set, CONTAINER, 25)
        );
        assert_ne!(
            base,
            resolution_key(&set[0], Position::new(0, 0), &set[..1], CONTAINER, 50)
        );

        let mut tagged = set.clone();
        tagged[1] = tagged[1].clone().with_config("pinned");
        assert_ne!(
            base,
            resolution_key(&set[0], Position::new(0, 0), &tagged, CONTAINER, 50)
        );
    }

    #[test]
    fn repeated_call_hits() {
        let set = widgets();
        let mut cache = LayoutCache::new();

        let first = cache
            .resolve_cached(&set[0], Position::new(100, 0), &set, CONTAINER, 50)
            .unwrap();
        let second = cache
            .resolve_cached(&set[0], Position::new(100, 0), &set, CONTAINER, 50)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_widget_sets_do_not_share_entries() {
        let set = widgets();
        let mut moved = set.clone();
        moved[1] = moved[1].moved_to(Position::new(300, 300));
        let mut cache = LayoutCache::new();

        let crowded = cache
            .resolve_cached(&set[0], Position::new(100, 0), &set, CONTAINER, 50)
            .unwrap();
        let roomy = cache
            .resolve_cached(&set[0], Position::new(100, 0), &moved, CONTAINER, 50)
            .unwrap();

        assert!(crowded.collision.is_some());
        assert!(roomy.collision.is_none());
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let set = widgets();
        let mut cache = LayoutCache::new();
        assert!(cache
            .resolve_cached(&set[0], Position::new(0, 0), &set, CONTAINER, 0)
            .is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn oldest_entry_is_evicted() {
        let set = widgets();
        let mut cache = LayoutCache::with_capacity(2);
        for x in [200, 250, 300] {
            cache
                .resolve_cached(&set[0], Position::new(x, 200), &set, CONTAINER, 50)
                .unwrap();
        }
        assert_eq!(cache.len(), 2);

        cache
            .resolve_cached(&set[0], Position::new(200, 200), &set, CONTAINER, 50)
            .unwrap();
        assert_eq!(cache.misses(), 4);

        cache.clear();
        assert!(cache.is_empty());
    }
}
