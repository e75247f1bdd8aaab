use macroquad::prelude::*;

/// Everything the game cares about from one frame of input.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputModel {
    pub quit_requested: bool,
    /// Where the left button went down this frame, in world coordinates.
    pub click: Option<Vec2>,
    pub fullscreen_toggle_requested: bool,
    pub debug_toggle_requested: bool,
}

impl InputModel {
    /// Polls macroquad. The camera is the one the game is drawn with,
    /// so the click lands where the player sees the objects.
    pub fn capture(camera: &Camera2D) -> Self {
        let quit_requested = is_quit_requested();
        let click = is_mouse_button_pressed(MouseButton::Left).then(|| {
            let (mx, my) = mouse_position();
            camera.screen_to_world(vec2(mx, my))
        });
        let fullscreen_toggle_requested = is_key_pressed(KeyCode::F11);
        let debug_toggle_requested =
            is_key_pressed(KeyCode::GraveAccent) || is_key_pressed(KeyCode::Apostrophe);

        Self {
            quit_requested,
            click,
            fullscreen_toggle_requested,
            debug_toggle_requested,
        }
    }
}
