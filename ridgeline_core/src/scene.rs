// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained element tree.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Rect, Vec2};

use crate::element::{Dash, Element, ElementId, ElementKind, Paint};

/// Errors returned by scene mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The element does not exist (never created, or already removed).
    #[error("unknown element {0}")]
    UnknownElement(ElementId),
    /// The element cannot hold children.
    #[error("element {0} is not a container")]
    NotAContainer(ElementId),
    /// The root element cannot be removed.
    #[error("the root element cannot be removed")]
    RemoveRoot,
}

/// A retained tree of elements with a fixed view box.
///
/// The root is a [`ElementKind::Group`] created with the scene. Ids are allocated
/// sequentially and never reused, so a removed id stays invalid.
#[derive(Clone, Debug)]
pub struct Scene {
    view_box: Rect,
    root: ElementId,
    elements: HashMap<ElementId, Element>,
    next_id: u64,
}

impl Scene {
    /// Creates a scene containing only a root group.
    pub fn new(view_box: Rect) -> Self {
        let root = ElementId(0);
        let mut elements = HashMap::new();
        elements.insert(root, Element::new(root, None, ElementKind::Group));
        Self {
            view_box,
            root,
            elements,
            next_id: 1,
        }
    }

    /// Returns the root group.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Returns the view box.
    pub fn view_box(&self) -> Rect {
        self.view_box
    }

    /// Returns the number of live elements (including the root).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if only the root remains.
    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    /// Returns `true` if `id` refers to a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Returns an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Returns an element by id for mutation.
    pub fn get_mut(&mut self, id: ElementId) -> Result<&mut Element, SceneError> {
        self.elements
            .get_mut(&id)
            .ok_or(SceneError::UnknownElement(id))
    }

    /// Appends a new element as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, kind: ElementKind) -> Result<ElementId, SceneError> {
        let id = ElementId(self.next_id);
        let parent_el = self.get_mut(parent)?;
        if !parent_el.kind.is_container() {
            return Err(SceneError::NotAContainer(parent));
        }
        parent_el.children.push(id);
        self.next_id += 1;
        self.elements.insert(id, Element::new(id, Some(parent), kind));
        Ok(id)
    }

    /// Sets an element's translation.
    pub fn set_translate(&mut self, id: ElementId, translate: Vec2) -> Result<(), SceneError> {
        self.get_mut(id)?.translate = translate;
        Ok(())
    }

    /// Sets an element's fill paint.
    pub fn set_fill(&mut self, id: ElementId, fill: Paint) -> Result<(), SceneError> {
        self.get_mut(id)?.fill = fill;
        Ok(())
    }

    /// Sets an element's fill opacity.
    pub fn set_fill_opacity(&mut self, id: ElementId, opacity: f64) -> Result<(), SceneError> {
        self.get_mut(id)?.fill_opacity = Some(opacity);
        Ok(())
    }

    /// Sets an element's stroke paint and width.
    pub fn set_stroke(&mut self, id: ElementId, stroke: Paint, width: f64) -> Result<(), SceneError> {
        let el = self.get_mut(id)?;
        el.stroke = stroke;
        el.stroke_width = Some(width);
        Ok(())
    }

    /// Sets an element's stroke dash pattern.
    pub fn set_dash(&mut self, id: ElementId, dash: Dash) -> Result<(), SceneError> {
        self.get_mut(id)?.dash = Some(dash);
        Ok(())
    }

    /// Masks an element with a clip path element.
    pub fn set_clip(&mut self, id: ElementId, clip: ElementId) -> Result<(), SceneError> {
        if !self.contains(clip) {
            return Err(SceneError::UnknownElement(clip));
        }
        self.get_mut(id)?.clip = Some(clip);
        Ok(())
    }

    /// Removes an element and its whole subtree.
    ///
    /// References ([`ElementKind::Use`]) pointing into the removed subtree are left
    /// in place; they simply resolve to nothing.
    pub fn remove(&mut self, id: ElementId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RemoveRoot);
        }
        let parent = self
            .elements
            .get(&id)
            .ok_or(SceneError::UnknownElement(id))?
            .parent;
        if let Some(parent) = parent.and_then(|p| self.elements.get_mut(&p)) {
            parent.children.retain(|&c| c != id);
        }
        let mut stack = alloc::vec![id];
        while let Some(next) = stack.pop() {
            if let Some(el) = self.elements.remove(&next) {
                stack.extend(el.children);
            }
        }
        Ok(())
    }

    /// Returns the ids of every live element whose geometry is referenced by a
    /// [`ElementKind::Use`] or clip mask.
    pub fn referenced(&self) -> Vec<ElementId> {
        let mut out: Vec<ElementId> = self
            .elements
            .values()
            .flat_map(|el| el.href().into_iter().chain(el.clip))
            .filter(|id| self.contains(*id))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use kurbo::BezPath;

    fn scene() -> Scene {
        Scene::new(Rect::new(0.0, 0.0, 100.0, 50.0))
    }

    #[test]
    fn append_links_parent_and_child() {
        let mut s = scene();
        let g = s.append(s.root(), ElementKind::Group).unwrap();
        let p = s.append(g, ElementKind::Path(BezPath::new())).unwrap();
        assert_eq!(s.get(p).unwrap().parent, Some(g));
        assert_eq!(s.get(g).unwrap().children, alloc::vec![p]);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn leaves_reject_children() {
        let mut s = scene();
        let r = s
            .append(s.root(), ElementKind::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)))
            .unwrap();
        assert_eq!(
            s.append(r, ElementKind::Group),
            Err(SceneError::NotAContainer(r))
        );
    }

    #[test]
    fn remove_drops_subtree_and_detaches() {
        let mut s = scene();
        let g = s.append(s.root(), ElementKind::Group).unwrap();
        let inner = s.append(g, ElementKind::Group).unwrap();
        let leaf = s.append(inner, ElementKind::Path(BezPath::new())).unwrap();
        s.remove(inner).unwrap();
        assert!(!s.contains(inner));
        assert!(!s.contains(leaf));
        assert!(s.get(g).unwrap().children.is_empty());
        assert_eq!(s.remove(inner), Err(SceneError::UnknownElement(inner)));
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut s = scene();
        assert_eq!(s.remove(s.root()), Err(SceneError::RemoveRoot));
    }

    #[test]
    fn ids_are_not_reused() {
        let mut s = scene();
        let a = s.append(s.root(), ElementKind::Group).unwrap();
        s.remove(a).unwrap();
        let b = s.append(s.root(), ElementKind::Group).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn referenced_collects_use_targets_and_clips() {
        let mut s = scene();
        let defs = s.append(s.root(), ElementKind::Defs).unwrap();
        let shape = s.append(defs, ElementKind::Path(BezPath::new())).unwrap();
        let clip = s.append(defs, ElementKind::ClipPath).unwrap();
        let u = s.append(s.root(), ElementKind::Use(shape)).unwrap();
        s.set_clip(u, clip).unwrap();
        assert_eq!(s.referenced(), alloc::vec![shape, clip]);
    }
}
