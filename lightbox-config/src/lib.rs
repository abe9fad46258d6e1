//! Configuration for the lightbox overlay.
//!
//! Options are read from JSON. Every field is optional and falls back to the defaults of the
//! overlay component.

#[macro_use]
extern crate tracing;

use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

mod animations;
mod color;
mod geometry;

pub use animations::{
    Animation, AnimationCurve, AnimationKind, Animations, EasingConfig, SpringConfig,
};
pub use color::Color;
pub use geometry::{Point, Rect, Size};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// On-screen rectangle of the thumbnail the overlay opens from and closes back to.
    pub origin: Rect,
    pub spring_config: SpringConfig,
    pub background_color: Color,
    pub swipe_to_dismiss: bool,
    pub focused_child_index: usize,
    /// Maximum zoom of a single slide.
    pub zoom_scale_factor: f64,
    pub images: Vec<Image>,
    /// Vertical correction added to the origin, to account for a translucent status bar.
    pub status_bar_offset: f64,
    pub animations: Animations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: f64,
    pub height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: Rect::default(),
            spring_config: SpringConfig::default(),
            background_color: Color::BLACK,
            swipe_to_dismiss: true,
            focused_child_index: 0,
            zoom_scale_factor: 1.,
            images: Vec::new(),
            status_bar_offset: 0.,
            animations: Animations::default(),
        }
    }
}

impl Image {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("error reading config file at {path:?}"))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("error parsing config file at {path:?}"))?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option ranges, clamping the ones that can be recovered.
    pub fn validate(&mut self) -> anyhow::Result<()> {
        ensure!(
            self.zoom_scale_factor >= 1.,
            "zoomScaleFactor must be at least 1, got {}",
            self.zoom_scale_factor
        );
        ensure!(
            self.spring_config.tension > 0.,
            "springConfig.tension must be positive, got {}",
            self.spring_config.tension
        );
        ensure!(
            self.spring_config.friction >= 0.,
            "springConfig.friction must not be negative, got {}",
            self.spring_config.friction
        );
        ensure!(
            self.animations.slowdown > 0.,
            "animations.slowdown must be positive, got {}",
            self.animations.slowdown
        );

        for (idx, image) in self.images.iter().enumerate() {
            ensure!(
                image.size().is_finite() && image.width >= 0. && image.height >= 0.,
                "image {idx} ({:?}) has an invalid size {}x{}",
                image.url,
                image.width,
                image.height
            );
        }

        let last = self.images.len().saturating_sub(1);
        if self.focused_child_index > last {
            warn!(
                "focusedChildIndex {} is out of range for {} images, using {last}",
                self.focused_child_index,
                self.images.len()
            );
            self.focused_child_index = last;
        }

        Ok(())
    }

    /// Animation parameters for every overlay channel.
    pub fn animation(&self) -> Animation {
        Animation::resolve(&self.animations, self.spring_config)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn parse_full() {
        let config = Config::parse(
            r##"{
                "origin": { "x": 10, "y": 20, "width": 100, "height": 50 },
                "springConfig": { "tension": 40, "friction": 9 },
                "backgroundColor": "#202020",
                "swipeToDismiss": false,
                "focusedChildIndex": 1,
                "zoomScaleFactor": 3,
                "statusBarOffset": -25,
                "images": [
                    { "url": "a.jpg", "width": 400, "height": 300 },
                    { "url": "b.jpg", "width": 300, "height": 400 }
                ],
                "animations": {
                    "slowdown": 2,
                    "easing": { "durationMs": 100, "curve": "ease-out-quad" }
                }
            }"##,
        )
        .unwrap();

        assert_eq!(config.origin, Rect::new(10., 20., 100., 50.));
        assert_eq!(config.background_color.to_rgba8(), [32, 32, 32, 255]);
        assert!(!config.swipe_to_dismiss);
        assert_eq!(config.focused_child_index, 1);
        assert_eq!(config.images[1].url, "b.jpg");
        assert_eq!(
            config.animation().kind,
            AnimationKind::Easing(EasingConfig {
                duration_ms: 100,
                curve: AnimationCurve::EaseOutQuad,
            })
        );
    }

    #[test]
    fn default_animation_is_spring() {
        let config = Config::default();
        assert_eq!(
            config.animation(),
            Animation {
                off: false,
                kind: AnimationKind::Spring(SpringConfig {
                    tension: 30.,
                    friction: 7.,
                }),
            }
        );
    }

    #[test]
    fn focused_index_is_clamped() {
        let config = Config::parse(
            r#"{
                "focusedChildIndex": 5,
                "images": [{ "url": "a.jpg", "width": 1, "height": 1 }]
            }"#,
        )
        .unwrap();
        assert_eq!(config.focused_child_index, 0);
    }

    #[test]
    fn validation_errors() {
        let err = Config::parse(r#"{ "zoomScaleFactor": 0.5 }"#).unwrap_err();
        assert_snapshot!(err, @"zoomScaleFactor must be at least 1, got 0.5");

        let err = Config::parse(r#"{ "springConfig": { "tension": 0 } }"#).unwrap_err();
        assert_snapshot!(err, @"springConfig.tension must be positive, got 0");

        let err = Config::parse(r#"{ "backgroundColor": "mauve" }"#).unwrap_err();
        assert!(err.to_string().contains("unknown color name"));
    }
}
