// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Keyline uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! remember which nodes changed between two layout passes. Keys are raw node
//! slot indices. Every channel is local-only: a changed axis does not dirty
//! its siblings or ancestors, because row positions are recomputed by every
//! layout pass anyway.
//!
//! - [`KEYFRAMES`]: an axis gained, lost, or moved a keyframe, or had its
//!   tangents edited or re-solved. Its curve geometry must be rebuilt.
//! - [`LABEL`]: a node was renamed.
//! - [`TOPOLOGY`]: a node was created or detached under the marked parent
//!   (or at the root level, marked on the node itself).
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`Timeline::update_layout`](crate::timeline::Timeline::update_layout) call
//! drains all channels and surfaces the result as
//! [`LayoutChanges`](crate::timeline::LayoutChanges).

use understory_dirty::Channel;

/// Keyframes or tangents of an axis changed.
pub const KEYFRAMES: Channel = Channel::new(0);

/// The display name of a node changed.
pub const LABEL: Channel = Channel::new(1);

/// The child list of a node changed.
pub const TOPOLOGY: Channel = Channel::new(2);
