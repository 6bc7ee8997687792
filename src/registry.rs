use egui::Color32;

use crate::point::Point;
use crate::shape::{ShapeDimensions, ShapeKind};
use crate::surface::PrimitiveId;

/// Bookkeeping for one annotation shape, paired 1:1 with a live primitive
/// through `tag`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    pub tag: String,
    pub id: PrimitiveId,
    pub kind: ShapeKind,
    /// Logical center; the origin for scaling
    pub center: Point,
    pub outline_color: Color32,
    pub dimensions: ShapeDimensions,
}

/// Append-only list of shape records, in creation order
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    records: Vec<ShapeRecord>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Instance tag the next shape of `kind` will get, e.g. `"oval3"`.
    /// The number counts every registered shape, so tags never collide.
    pub fn next_tag(&self, kind: ShapeKind) -> String {
        format!("{}{}", kind.name(), self.records.len() + 1)
    }

    pub(crate) fn push(&mut self, record: ShapeRecord) {
        debug_assert!(self.index_of(&record.tag).is_none(), "duplicate tag {}", record.tag);
        self.records.push(record);
    }

    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.records.iter().position(|r| r.tag == tag)
    }

    pub fn get(&self, tag: &str) -> Option<&ShapeRecord> {
        self.records.iter().find(|r| r.tag == tag)
    }

    pub fn by_id(&self, id: PrimitiveId) -> Option<&ShapeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub(crate) fn by_id_mut(&mut self, id: PrimitiveId) -> Option<&mut ShapeRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// Most recently created
    pub fn last(&self) -> Option<&ShapeRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tag: &str, id: usize) -> ShapeRecord {
        ShapeRecord {
            tag: tag.to_owned(),
            id: PrimitiveId::new(id),
            kind: ShapeKind::Oval,
            center: Point::new(0, 0),
            outline_color: Color32::BLACK,
            dimensions: ShapeDimensions::default(),
        }
    }

    #[test]
    fn test_next_tag_counts_all_kinds() {
        let mut registry = ShapeRegistry::new();
        assert_eq!(registry.next_tag(ShapeKind::Oval), "oval1");
        registry.push(record("oval1", 1));
        assert_eq!(registry.next_tag(ShapeKind::Rectangle), "rectangle2");
    }

    #[test]
    fn test_lookup() {
        let mut registry = ShapeRegistry::new();
        registry.push(record("oval1", 4));
        registry.push(record("oval2", 7));

        assert_eq!(registry.index_of("oval2"), Some(1));
        assert_eq!(registry.by_id(PrimitiveId::new(4)).map(|r| r.tag.as_str()), Some("oval1"));
        assert_eq!(registry.last().map(|r| r.id), Some(PrimitiveId::new(7)));
        assert!(registry.get("oval3").is_none());

        registry.by_id_mut(PrimitiveId::new(4)).unwrap().center = Point::new(3, 4);
        assert_eq!(registry.get("oval1").unwrap().center, Point::new(3, 4));
    }
}
