// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal retained scene graph for ridgeline charts.
//!
//! The scene is a tree of [`Element`]s addressed by stable [`ElementId`]s:
//! - containers (groups, definition blocks, clip paths),
//! - leaves (rectangles, Bézier paths, text), and
//! - references ([`ElementKind::Use`]) that re-draw another element's geometry.
//!
//! Elements carry the handful of presentation attributes the chart animates
//! (translation, fill opacity, stroke dash offset) so an animation driver can
//! mutate them in place. Serialization (SVG or otherwise) is left to hosts.

#![no_std]

extern crate alloc;

mod element;
mod scene;

pub use element::{Dash, Element, ElementId, ElementKind, Paint, TextAnchor, TextContent};
pub use scene::{Scene, SceneError};
