//! Ordered collection of carousel items.
//!
//! The list is the single source of truth for a block: display order, save order and insertion
//! order are the same thing. The add control is not stored here; it is always rendered after the
//! last item, so appending to the list is the same as inserting before the add control.

use crate::item::{CarouselData, CarouselItem, ItemData, ItemId, PreviewSource};
use crate::media::LoadEvent;

#[derive(Debug, Clone, Default)]
pub struct CarouselList {
    items: Vec<CarouselItem>,
}

impl CarouselList {
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Hydrates a list from saved data, keeping the given order.
    pub fn from_data(data: &[ItemData]) -> Self {
        Self {
            items: data.iter().map(CarouselItem::from_data).collect(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Collection Access
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns a slice of all items in display order.
    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over all item IDs in display order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&CarouselItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut CarouselItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Inserts a new uploading placeholder right before the add control and returns its ID.
    pub fn insert_placeholder(&mut self, preview: Option<PreviewSource>) -> ItemId {
        let item = CarouselItem::placeholder(preview);
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Removes an item by its ID. Other items keep their relative order.
    pub fn remove(&mut self, id: ItemId) -> Option<CarouselItem> {
        self.index_of(id).map(|idx| self.items.remove(idx))
    }

    /// Stores a resolved url on the placeholder with the given ID. The item keeps its position.
    /// Returns false if the item is gone or already filled.
    pub fn fill(&mut self, id: ItemId, url: &str) -> bool {
        self.get_mut(id).is_some_and(|item| item.fill(url))
    }

    pub fn set_caption(&mut self, id: ItemId, caption: &str) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.caption = caption.to_string();
                true
            }
            None => false,
        }
    }

    pub fn apply_load_event(&mut self, id: ItemId, event: LoadEvent) -> bool {
        self.get_mut(id)
            .is_some_and(|item| item.apply_load_event(event))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Serialization
    // ─────────────────────────────────────────────────────────────────────────────

    /// Serializes every item that has a url, in display order.
    /// Placeholders are skipped whatever their caption says.
    pub fn to_data(&self) -> CarouselData {
        self.items
            .iter()
            .filter(|item| !item.url.is_empty())
            .map(CarouselItem::to_data)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemStatus;

    fn sample() -> CarouselList {
        CarouselList::from_data(&[
            ItemData::new("a.png", "A"),
            ItemData::new("b.png", "B"),
            ItemData::new("c.png", "C"),
        ])
    }

    fn urls(list: &CarouselList) -> Vec<&str> {
        list.items().iter().map(|i| i.url.as_str()).collect()
    }

    #[test]
    fn test_hydration_keeps_order() {
        let list = sample();
        assert_eq!(urls(&list), vec!["a.png", "b.png", "c.png"]);
        assert_eq!(list.to_data()[1], ItemData::new("b.png", "B"));
    }

    #[test]
    fn test_placeholders_append_in_order() {
        let mut list = sample();
        let first = list.insert_placeholder(None);
        let second = list.insert_placeholder(None);

        let ids: Vec<_> = list.ids().collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(ids[3], first);
        assert_eq!(ids[4], second);
        assert_eq!(list.get(first).unwrap().status(), ItemStatus::Uploading);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut list = sample();
        let middle = list.items()[1].id;

        let removed = list.remove(middle).unwrap();
        assert_eq!(removed.url, "b.png");
        assert_eq!(urls(&list), vec!["a.png", "c.png"]);
        assert!(list.remove(middle).is_none());
    }

    #[test]
    fn test_fill_keeps_position() {
        let mut list = CarouselList::new();
        let early = list.insert_placeholder(None);
        let late = list.insert_placeholder(None);

        assert!(list.fill(early, "early.png"));
        assert_eq!(list.index_of(early), Some(0));
        assert_eq!(list.index_of(late), Some(1));
        assert_eq!(list.to_data(), vec![ItemData::new("early.png", "")]);
    }

    #[test]
    fn test_save_skips_empty_urls_with_captions() {
        let mut list = CarouselList::from_data(&[
            ItemData::new("", "lost caption"),
            ItemData::new("kept.png", ""),
        ]);
        let pending = list.insert_placeholder(None);
        list.set_caption(pending, "typed while uploading");

        assert_eq!(list.to_data(), vec![ItemData::new("kept.png", "")]);
    }

    #[test]
    fn test_set_caption_on_missing_item() {
        let mut list = sample();
        let id = list.insert_placeholder(None);
        list.remove(id);
        assert!(!list.set_caption(id, "nothing"));
    }
}
