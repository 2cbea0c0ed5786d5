//! Top-wins compositor restricted to minimal redraw windows
//!
//! Cost is O(pixels × stack depth) shape probes per window, which is fine
//! because windows only ever cover a moving layer's old and new bounding
//! boxes, never the whole screen (except the one startup pass).

use glam::IVec2;

use super::DisplaySink;
use crate::screen_region;
use crate::sim::{Region, Scene};

/// Resolve and write every pixel of `window`, row-major.
///
/// Each pixel gets the color of the first layer in stack order whose shape
/// contains it at that layer's committed position, or the background. No
/// pixel outside `window` is touched.
pub fn compose_window(scene: &Scene, window: Region, sink: &mut impl DisplaySink) {
    sink.set_active_window(window);
    for row in window.top_left.y..=window.bot_right.y {
        for col in window.top_left.x..=window.bot_right.x {
            sink.write_next_color(scene.color_at(IVec2::new(col, row)));
        }
    }
}

/// Redraw the regions disturbed by this frame's motion.
///
/// For each motion binding the window is the union of the shape's bounds at
/// `pos_last` and at `pos`: the old silhouette gets erased (repainted with
/// whatever static content lies beneath) and the new one drawn, even when a
/// step is larger than the shape.
pub fn draw_moving_layers(scene: &Scene, sink: &mut impl DisplaySink) {
    let screen = screen_region();
    for binding in &scene.bindings {
        let layer = &scene.layers[binding.layer];
        let window = layer
            .shape
            .bounds_at(layer.pos_last)
            .union(&layer.shape.bounds_at(layer.pos));
        if let Some(window) = window.clamp_to(&screen) {
            compose_window(scene, window, sink);
        }
    }
}

/// One compositor pass over the whole screen; used once at startup
pub fn draw_full(scene: &Scene, sink: &mut impl DisplaySink) {
    compose_window(scene, screen_region(), sink);
}
