//! Gesture-driven fullscreen image overlay.
//!
//! [`lightbox::Lightbox`] expands a thumbnail to fullscreen, pages through a carousel of
//! images with horizontal swipes, and dismisses back to the thumbnail with a vertical swipe.
//! Rendering, touch capture and per-slide zooming stay with the host.

#[macro_use]
extern crate tracing;

pub mod animation;
pub mod cli;
pub mod input;
pub mod lightbox;
pub mod replay;
pub mod utils;

#[cfg(test)]
mod tests;
