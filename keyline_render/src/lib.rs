// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plans, styling, and damage tracking for keyline.
//!
//! This crate sits between [`keyline_core`]'s layout passes and a host's
//! drawing code. It defines:
//!
//! - [`TimelineStyle`]: stroke widths and colors, with light and dark
//!   variants and the axis palette
//! - [`RenderPlan`]: the ordered visual elements of one layout
//! - [`ElementKey`]: stable identity of a persistent element across passes
//! - [`DamageRegion`]: the part of the view a pass touched

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod damage;
mod element;
mod plan;
mod style;

pub use damage::DamageRegion;
pub use element::{ElementKey, ElementPart};
pub use plan::{Paint, RenderContent, RenderItem, RenderPlan, parts_for};
pub use style::{Appearance, Rgba, TimelineStyle};
