// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroke and fill styling.

/// A straight (non-premultiplied) sRGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Red, `0.0..=1.0`.
    pub r: f32,
    /// Green, `0.0..=1.0`.
    pub g: f32,
    /// Blue, `0.0..=1.0`.
    pub b: f32,
    /// Alpha, `0.0..=1.0`.
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Returns the same color with alpha replaced.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Scales the color channels by `factor`, keeping alpha.
    #[must_use]
    pub const fn darken(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    /// Converts to 8-bit channels, rounding and clamping each one.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel8(self.r),
            channel8(self.g),
            channel8(self.b),
            channel8(self.a),
        ]
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to 0..=255 before the cast"
)]
fn channel8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Light or dark system appearance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Appearance {
    /// Dark content on a light background.
    #[default]
    Light,
    /// Light content on a dark background.
    Dark,
}

/// Paint settings for every element of the timeline view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineStyle {
    /// Stroke width of the spline.
    pub curve_width: f64,
    /// Stroke width of handle lines and handle tip outlines.
    pub handle_width: f64,
    /// Stroke width of the marker outline.
    pub marker_outline_width: f64,
    /// Stroke color of handle lines and handle tips.
    pub handle_color: Rgba,
    /// Fill of the handle tips.
    pub tip_fill: Rgba,
    /// Fill of the sample markers.
    pub marker_fill: Rgba,
    /// Navigator label text.
    pub label_color: Rgba,
    /// View background.
    pub background: Rgba,
    /// Axis colors, assigned in navigator order and cycled.
    pub palette: [Rgba; 3],
}

impl TimelineStyle {
    /// Axis colors shared by both appearances.
    pub const PALETTE: [Rgba; 3] = [
        Rgba::RED.darken(0.9),
        Rgba::GREEN.darken(0.8),
        Rgba::BLUE.darken(0.9),
    ];

    /// Style for [`Appearance::Light`].
    pub const LIGHT: Self = Self {
        curve_width: 3.0,
        handle_width: 1.0,
        marker_outline_width: 3.0,
        handle_color: Rgba::BLACK.with_alpha(0.2),
        tip_fill: Rgba::WHITE,
        marker_fill: Rgba::WHITE,
        label_color: Rgba::BLACK,
        background: Rgba::rgb(0.949, 0.949, 0.969),
        palette: Self::PALETTE,
    };

    /// Style for [`Appearance::Dark`].
    pub const DARK: Self = Self {
        handle_color: Rgba::WHITE.with_alpha(0.75),
        marker_fill: Rgba::WHITE.darken(0.8),
        label_color: Rgba::WHITE,
        background: Rgba::rgb(0.11, 0.11, 0.118),
        ..Self::LIGHT
    };

    /// Returns the style for an appearance.
    #[must_use]
    pub const fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Light => Self::LIGHT,
            Appearance::Dark => Self::DARK,
        }
    }

    /// Color of the `n`th axis in navigator order.
    #[must_use]
    pub fn axis_color(&self, n: usize) -> Rgba {
        self.palette[n % self.palette.len()]
    }
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self::LIGHT
    }
}
