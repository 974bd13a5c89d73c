// Score display and state overlay text

use crate::core::math::Rect;
use crate::engine::renderer::scene::{Color, Scene};
use crate::engine::renderer::text::PixelFont;

/// Score line anchor (the text is centered on this point)
const SCORE_X: f32 = 100.0;
const SCORE_Y: f32 = 50.0;

/// Overlay text position and sizes
const OVERLAY_X: f32 = 150.0;
const OVERLAY_LINE_1_Y: f32 = 150.0;
const OVERLAY_LINE_2_Y: f32 = 200.0;
const SCORE_TEXT_SIZE: f32 = 40.0;
const OVERLAY_TEXT_SIZE: f32 = 40.0;
const HINT_TEXT_SIZE: f32 = 24.0;

/// The world flags the overlay needs, captured once per draw pass
#[derive(Debug, Clone, Copy)]
pub struct HudView {
    pub score: u32,
    pub started: bool,
    pub stopped: bool,
}

/// Heads-up display: score plus state-dependent hint text
#[derive(Debug)]
pub struct Hud {
    x: f32,
    y: f32,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            x: SCORE_X,
            y: SCORE_Y,
        }
    }

    /// Append the score line and, depending on state, the overlay text
    pub fn draw(&self, scene: &mut Scene, view: HudView) {
        let score_line = format!("score: {}", view.score);
        let width = PixelFont::measure(&score_line, SCORE_TEXT_SIZE);
        scene.text(
            &score_line,
            self.x - width / 2.0,
            self.y - SCORE_TEXT_SIZE / 2.0,
            SCORE_TEXT_SIZE,
            Color::BLACK,
        );

        if !view.started {
            scene.text(
                "arrowup to jump",
                OVERLAY_X,
                OVERLAY_LINE_1_Y,
                OVERLAY_TEXT_SIZE,
                Color::BLACK,
            );
            scene.text(
                "esc to start/pause",
                OVERLAY_X,
                OVERLAY_LINE_2_Y,
                OVERLAY_TEXT_SIZE,
                Color::BLACK,
            );
        } else if view.stopped {
            scene.text(
                "game over!",
                OVERLAY_X,
                OVERLAY_LINE_1_Y,
                OVERLAY_TEXT_SIZE,
                Color::BLACK,
            );
            scene.text(
                "press <space> to restart",
                OVERLAY_X,
                OVERLAY_LINE_2_Y,
                HINT_TEXT_SIZE,
                Color::BLACK,
            );
        }
    }

    /// Point box at the anchor; only obstacle bounds ever enter a collision
    /// test, so this is never consulted
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, 0.0, 0.0)
    }

    pub fn x(&self) -> f32 {
        self.x
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::scene::DrawCommand;

    fn texts(scene: &Scene) -> Vec<String> {
        scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_score_line_always_present() {
        let hud = Hud::new();
        let mut scene = Scene::new();
        hud.draw(
            &mut scene,
            HudView {
                score: 12,
                started: true,
                stopped: false,
            },
        );
        assert_eq!(texts(&scene), vec!["score: 12".to_string()]);
    }

    #[test]
    fn test_hints_shown_before_first_start() {
        let hud = Hud::new();
        let mut scene = Scene::new();
        hud.draw(
            &mut scene,
            HudView {
                score: 0,
                started: false,
                stopped: true,
            },
        );
        let texts = texts(&scene);
        assert!(texts.contains(&"arrowup to jump".to_string()));
        assert!(texts.contains(&"esc to start/pause".to_string()));
    }

    #[test]
    fn test_game_over_text_once_started_and_stopped() {
        let hud = Hud::new();
        let mut scene = Scene::new();
        hud.draw(
            &mut scene,
            HudView {
                score: 3,
                started: true,
                stopped: true,
            },
        );
        let texts = texts(&scene);
        assert!(texts.contains(&"game over!".to_string()));
        assert!(texts.contains(&"press <space> to restart".to_string()));
    }

    #[test]
    fn test_hud_anchors_at_the_score_position() {
        let hud = Hud::new();
        let bounds = hud.bounds();
        assert_eq!((bounds.x, bounds.y), (100.0, 50.0));
        assert_eq!((bounds.width, bounds.height), (0.0, 0.0));
    }
}
