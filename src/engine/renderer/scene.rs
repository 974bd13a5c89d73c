// Frame draw list
//
// The simulation never touches wgpu. Entities append commands to a `Scene`
// each frame; the renderer consumes the list in order (painter's algorithm).

use crate::core::math::Rect;

/// Logical width of the render surface in world pixels
pub const CANVAS_WIDTH: f32 = 1000.0;

/// Logical height of the render surface in world pixels
pub const CANVAS_HEIGHT: f32 = 500.0;

/// An RGBA color with components in [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const LIGHT_BLUE: Color = Color::rgb(0.678, 0.847, 0.902);
    pub const GREEN: Color = Color::rgb(0.0, 0.502, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const DARK_BLUE: Color = Color::rgb(0.0, 0.0, 0.545);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Components as an array (vertex color layout)
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Logical sprite slots the simulation references
///
/// The catalog resolves a slot to a loaded texture; an unloaded slot makes
/// the renderer skip the blit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteSlot {
    /// One frame of the player's run cycle
    Run(usize),
    /// The cloud sprite
    Cloud,
}

/// A single draw command in canvas coordinates (y-down)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle
    FillRect { rect: Rect, color: Color },

    /// Sprite blit at position + size
    Blit { slot: SpriteSlot, rect: Rect },

    /// Text run; `size` is the glyph height in pixels, `x`/`y` the top-left
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
}

/// Per-frame ordered draw list
///
/// The surface is cleared by the renderer at the start of every pass;
/// `clear()` here only empties the command list for reuse.
#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Empty the list for the next frame
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Append a filled rectangle
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    /// Append a sprite blit
    pub fn blit(&mut self, slot: SpriteSlot, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Blit {
            slot,
            rect: Rect::new(x, y, width, height),
        });
    }

    /// Append a text run
    pub fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }

    /// All commands in submission order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}
