use egui::{Color32, Pos2, Rect, Vec2};
use log::debug;

use super::{DrawingSurface, Geometry, PrimitiveId, Style, StyleProperty, SurfaceError};
use crate::geometry::distance_to_geometry;
use crate::id_generator::IdGenerator;

/// A primitive as stored by [`Scene`]
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    id: PrimitiveId,
    geometry: Geometry,
    outline: Color32,
    fill: Option<Color32>,
    width: f32,
    tags: Vec<String>,
}

impl Primitive {
    pub fn id(&self) -> PrimitiveId {
        self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn outline(&self) -> Color32 {
        self.outline
    }

    pub fn fill(&self) -> Option<Color32> {
        self.fill
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// In-memory retained drawing surface. Primitives are kept in stacking
/// order, oldest at the bottom.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    ids: IdGenerator,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Bottom to top
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: PrimitiveId) -> Result<&mut Primitive, SurfaceError> {
        self.primitives
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(SurfaceError::UnknownPrimitive(id))
    }

    fn lookup(&self, id: PrimitiveId) -> Result<&Primitive, SurfaceError> {
        self.get(id).ok_or(SurfaceError::UnknownPrimitive(id))
    }
}

impl DrawingSurface for Scene {
    fn create_primitive(
        &mut self,
        geometry: Geometry,
        style: Style,
        tags: &[&str],
    ) -> Result<PrimitiveId, SurfaceError> {
        if !geometry.is_finite() {
            return Err(SurfaceError::InvalidGeometry(geometry));
        }

        let id = PrimitiveId::new(self.ids.generate_id());
        self.primitives.push(Primitive {
            id,
            geometry,
            outline: style.outline,
            fill: None,
            width: style.width,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        });
        debug!("created {:?} primitive {} tagged {:?}", geometry.kind(), id, tags);
        Ok(id)
    }

    fn move_primitive(&mut self, id: PrimitiveId, dx: f32, dy: f32) -> Result<(), SurfaceError> {
        let primitive = self.get_mut(id)?;
        primitive.geometry.translate(Vec2::new(dx, dy));
        Ok(())
    }

    fn scale_primitive(
        &mut self,
        id: PrimitiveId,
        origin: Pos2,
        factor_x: f32,
        factor_y: f32,
    ) -> Result<(), SurfaceError> {
        let valid = |f: f32| f.is_finite() && f > 0.0;
        if !valid(factor_x) || !valid(factor_y) {
            return Err(SurfaceError::DegenerateScale { factor_x, factor_y });
        }
        let primitive = self.get_mut(id)?;
        primitive.geometry.scale(origin, factor_x, factor_y);
        Ok(())
    }

    fn delete_primitive(&mut self, id: PrimitiveId) -> Result<(), SurfaceError> {
        let index = self
            .primitives
            .iter()
            .position(|p| p.id == id)
            .ok_or(SurfaceError::UnknownPrimitive(id))?;
        self.primitives.remove(index);
        Ok(())
    }

    fn delete_by_tag(&mut self, tag: &str) -> usize {
        let before = self.primitives.len();
        self.primitives.retain(|p| !p.has_tag(tag));
        before - self.primitives.len()
    }

    fn bounds(&self, id: PrimitiveId) -> Result<Rect, SurfaceError> {
        Ok(self.lookup(id)?.geometry.bounds())
    }

    fn set_style(
        &mut self,
        id: PrimitiveId,
        property: StyleProperty,
        value: Option<Color32>,
    ) -> Result<(), SurfaceError> {
        let primitive = self.get_mut(id)?;
        match property {
            StyleProperty::Outline => primitive.outline = value.unwrap_or(Color32::TRANSPARENT),
            StyleProperty::Fill => primitive.fill = value,
        }
        Ok(())
    }

    fn style(&self, id: PrimitiveId, property: StyleProperty) -> Result<Option<Color32>, SurfaceError> {
        let primitive = self.lookup(id)?;
        Ok(match property {
            StyleProperty::Outline => Some(primitive.outline),
            StyleProperty::Fill => primitive.fill,
        })
    }

    fn find_nearest(&self, pos: Pos2, halo: f32) -> Vec<PrimitiveId> {
        // Stacking index breaks ties so the topmost primitive wins
        let mut hits: Vec<(f32, usize, PrimitiveId)> = self
            .primitives
            .iter()
            .enumerate()
            .filter_map(|(index, p)| {
                let distance = distance_to_geometry(pos, &p.geometry);
                (distance <= halo).then_some((distance, index, p.id))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(b.1.cmp(&a.1)));
        hits.into_iter().map(|(_, _, id)| id).collect()
    }

    fn find_with_tag(&self, tag: &str) -> Vec<PrimitiveId> {
        self.primitives
            .iter()
            .filter(|p| p.has_tag(tag))
            .map(|p| p.id)
            .collect()
    }

    fn tags(&self, id: PrimitiveId) -> Result<Vec<String>, SurfaceError> {
        Ok(self.lookup(id)?.tags.clone())
    }
}
