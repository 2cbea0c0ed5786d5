//! Layer stack, motion bindings, and the double-buffered position model
//!
//! A `Scene` is built once at startup and never grows, shrinks, or reorders
//! afterward. Layer order is the z-order: the compositor probes layers from
//! index 0 and the first containment hit wins. Motion bindings mark the
//! subset of layers that carry a velocity; everything else is static.

use glam::IVec2;

use super::shape::{Region, Shape};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::color;
use crate::tuning::Tuning;

/// A shape placed on the display at a color and z-position
///
/// The three position fields form the double buffer: the interrupt-side
/// integrator writes `pos_next`, the foreground commit moves it into `pos`
/// (saving the old value in `pos_last` for erase bookkeeping), and the
/// compositor only ever reads committed positions.
#[derive(Debug, Clone)]
pub struct Layer {
    pub shape: Shape,
    /// RGB565 color
    pub color: u16,
    /// Currently rendered center
    pub pos: IVec2,
    /// Center at the previous frame, for erasing the old silhouette
    pub pos_last: IVec2,
    /// Center for the upcoming frame, written by the integrator
    pub pos_next: IVec2,
}

impl Layer {
    pub fn new(shape: Shape, color: u16, pos: IVec2) -> Self {
        Self { shape, color, pos, pos_last: pos, pos_next: pos }
    }

    /// Bounding box at the committed position
    #[inline]
    pub fn bounds(&self) -> Region {
        self.shape.bounds_at(self.pos)
    }
}

/// A layer that participates in physics
#[derive(Debug, Clone)]
pub struct MotionBinding {
    /// Index into `Scene::layers`
    pub layer: usize,
    /// Displacement applied per game tick
    pub velocity: IVec2,
}

/// The complete animation state: z-ordered layers, the moving subset, and
/// the fence they bounce inside
#[derive(Debug, Clone)]
pub struct Scene {
    /// Z-ordered stack, index 0 on top
    pub layers: Vec<Layer>,
    /// Moving subset, in integration order
    pub bindings: Vec<MotionBinding>,
    /// Reflecting boundary shared by all bindings
    pub fence: Region,
    /// Color drawn where no layer covers a pixel
    pub bg_color: u16,
    /// Index into `bindings` of the input-driven paddle
    pub paddle_binding: usize,
}

/// Brick grid mirrored from the layer layout this core animates over:
/// three staggered rows across the top of the field.
const BRICKS: [(i32, i32, u16); 10] = [
    (35, 18, color::BLUE),
    (60, 18, color::RED),
    (85, 18, color::GREEN),
    (25, 28, color::ORANGE),
    (50, 28, color::VIOLET),
    (75, 28, color::BLUE),
    (100, 28, color::RED),
    (35, 38, color::GREEN),
    (60, 38, color::ORANGE),
    (85, 38, color::VIOLET),
];

impl Scene {
    /// Build the pong scene: ball on top, playing-field outline, paddle,
    /// then a grid of static bricks. The fence is the field outline's
    /// bounding box, fixed for the whole run.
    pub fn pong(tuning: &Tuning) -> Self {
        let center = IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);
        let field_half = IVec2::new(SCREEN_WIDTH / 2 - 5, SCREEN_HEIGHT / 2 - 10);

        let ball = Layer::new(
            Shape::Circle { radius: tuning.ball_radius },
            color::VIOLET,
            center,
        );
        let field = Layer::new(
            Shape::RectOutline { half: field_half },
            color::BLUE,
            center,
        );
        let paddle = Layer::new(
            Shape::Rect { half: IVec2::new(10, 2) },
            color::BLUE,
            IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT - 15),
        );

        let fence = field.bounds();

        let mut layers = vec![ball, field, paddle];
        for &(x, y, c) in BRICKS.iter() {
            layers.push(Layer::new(
                Shape::Rect { half: IVec2::new(10, 4) },
                c,
                IVec2::new(x, y),
            ));
        }

        let bindings = vec![
            MotionBinding { layer: 0, velocity: tuning.ball_velocity() },
            MotionBinding { layer: 2, velocity: IVec2::ZERO },
        ];

        log::info!(
            "scene built: {} layers, {} moving, fence {:?}..{:?}",
            layers.len(),
            bindings.len(),
            fence.top_left,
            fence.bot_right
        );

        Self { layers, bindings, fence, bg_color: color::BLACK, paddle_binding: 1 }
    }

    /// Flip the position double buffer for every moving layer:
    /// `pos_last <- pos; pos <- pos_next`.
    ///
    /// Callers must hold the scene lock for the whole pass; a commit that
    /// interleaves with the integrator can tear a position across axes.
    pub fn commit_positions(&mut self) {
        for binding in &self.bindings {
            let layer = &mut self.layers[binding.layer];
            layer.pos_last = layer.pos;
            layer.pos = layer.pos_next;
        }
    }

    /// Color visible at `pixel`: the first layer in stack order containing
    /// it, or the background
    pub fn color_at(&self, pixel: IVec2) -> u16 {
        for layer in &self.layers {
            if layer.shape.contains_at(layer.pos, pixel) {
                return layer.color;
            }
        }
        self.bg_color
    }
}
