use lightbox_config::{Color, Config, Rect, Size};
use serde::Serialize;

use super::{Lifecycle, OverlaySessionState};
use crate::input::PanAxis;
use crate::utils::lerp;

/// Geometry of the overlay for one rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayFrame {
    pub background: Color,
    /// Opacity of the background and header.
    pub opacity: f64,
    /// Outer rectangle of the content, growing from the thumbnail to the viewport.
    pub content: Rect,
    /// Horizontal translation of the slide strip.
    pub carousel_x: f64,
    pub slides: Vec<SlideFrame>,
    pub header: HeaderFrame,
}

/// Bar along the top edge of the viewport, faded with the background.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderFrame {
    pub rect: Rect,
    /// The default close button, absent when the host draws its own header.
    pub close_button: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideFrame {
    pub index: usize,
    /// Slide container, relative to the slide strip.
    pub frame: Rect,
    pub image_size: Size,
    pub max_zoom: f64,
}

/// Side of the default close button.
pub const CLOSE_BUTTON_SIZE: f64 = 40.;

impl OverlayFrame {
    pub fn compute(config: &Config, state: &OverlaySessionState) -> Self {
        let p = state.open_progress;
        let origin = config.origin;
        let target = state.dismiss_target;
        let viewport = state.viewport;
        let offset = config.status_bar_offset;

        let mut content = Rect {
            x: lerp(origin.x, target.x, p),
            y: lerp(origin.y + offset, target.y + offset, p),
            width: lerp(origin.width, viewport.width, p),
            height: lerp(origin.height, viewport.height, p),
        };
        let mut opacity = lerp(0., target.opacity, p);

        if state.pan_axis == Some(PanAxis::Vertical) {
            let dy = state.live_drag.dy;
            content.y = dy;
            opacity = if viewport.height > 0. {
                (1. - dy.abs() / viewport.height).clamp(0., 1.)
            } else {
                0.
            };
        }

        let is_open = state.lifecycle == Lifecycle::Open;
        let carousel_x = if is_open {
            state.carousel_base_offset + state.live_drag.dx
        } else {
            0.
        };

        let container = Size::new(content.width, content.height);
        let slides = config
            .images
            .iter()
            .enumerate()
            .filter(|(idx, _)| is_open || *idx == state.focused_index)
            .map(|(idx, image)| {
                let x = if is_open {
                    idx as f64 * viewport.width
                } else {
                    0.
                };
                SlideFrame {
                    index: idx,
                    frame: Rect::new(x, 0., container.width, container.height),
                    image_size: Size::new(
                        lerp(origin.width, image.width, p),
                        lerp(origin.height, image.height, p),
                    ),
                    max_zoom: config.zoom_scale_factor,
                }
            })
            .collect();

        let header = HeaderFrame {
            rect: Rect::new(0., 0., viewport.width, CLOSE_BUTTON_SIZE),
            close_button: Some(Rect::new(0., 0., CLOSE_BUTTON_SIZE, CLOSE_BUTTON_SIZE)),
        };

        Self {
            background: config.background_color,
            opacity,
            content,
            carousel_x,
            slides,
            header,
        }
    }
}
