use lib_game::{
    FallingObject, GameSession, GameState, POWERUP_RECT, PowerupPhase, SessionEvent, WINDOW_HEIGHT,
    WINDOW_WIDTH,
};
use macroquad::prelude::*;
use macroquad_particles::{self as particles, BlendMode, ColorCurve, EmitterConfig};

use crate::assets::{Asset, Assets};
use crate::ui;

const OBJECT_FALLBACK_COLOR: Color = RED;
const POWERUP_COLOR: Color = GREEN;
const CLOUD_OPACITY: f32 = 0.7;
const POWERUP_ICON_SCALE: f32 = 0.6;
const BURST_PARTICLES: usize = 20;

fn catch_burst() -> EmitterConfig {
    EmitterConfig {
        one_shot: true,
        emitting: false,
        lifetime: 0.4,
        lifetime_randomness: 0.7,
        explosiveness: 0.99,
        amount: BURST_PARTICLES as u32,
        initial_direction_spread: 2.0 * std::f32::consts::PI,
        initial_velocity: 220.0,
        size: 3.0,
        gravity: vec2(0.0, 600.0),
        blend_mode: BlendMode::Alpha,
        colors_curve: ColorCurve {
            start: Color::from_hex(0xFFE066),
            mid: Color::from_hex(0xFF8C42),
            end: BLANK,
        },
        ..Default::default()
    }
}

/// Draws the session. All the game coordinates are window pixels,
/// the camera maps them onto whatever the window actually is.
pub struct Render {
    assets: Assets,
    camera: Camera2D,
    burst: particles::Emitter,
}

impl Render {
    pub fn new(assets: Assets) -> Self {
        let mut camera = Camera2D::from_display_rect(Rect {
            x: 0.0,
            y: 0.0,
            w: WINDOW_WIDTH as f32,
            h: WINDOW_HEIGHT as f32,
        });
        camera.zoom.y *= -1.0;

        Self {
            assets,
            camera,
            burst: particles::Emitter::new(catch_burst()),
        }
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn on_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Caught { at, .. } => self.burst.emit(at, BURST_PARTICLES),
            SessionEvent::PowerupActivated | SessionEvent::Lost => (),
        }
    }

    pub fn draw(&mut self, session: &GameSession) {
        set_camera(&self.camera);
        clear_background(WHITE);

        match session.state() {
            GameState::Title => {
                draw_backdrop(&self.assets.solid_sky, 1.0);
                ui::draw_title();
            }
            GameState::Playing => {
                draw_backdrop(&self.assets.clouds, CLOUD_OPACITY);
                if session.powerup().phase() == PowerupPhase::Available {
                    self.draw_powerup();
                }
                session.for_each_object(|obj| self.draw_object(obj));
                self.burst.draw(Vec2::ZERO);

                let powerup = session.powerup();
                ui::draw_hud(
                    session.score(),
                    session.difficulty().percent(),
                    powerup.is_active().then(|| powerup.seconds_left()),
                );
            }
            GameState::GameOver => {
                draw_backdrop(&self.assets.solid_sky, 1.0);
                ui::draw_game_over(session.score(), session.difficulty().percent());
            }
        }
    }

    fn draw_powerup(&self) {
        let rect = POWERUP_RECT;
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, POWERUP_COLOR);

        let Some(icon) = self.assets.powerup_icon.loaded() else {
            ui::draw_powerup_label();
            return;
        };

        let icon_size = (rect.w * POWERUP_ICON_SCALE).floor();
        let offset = ((rect.w - icon_size) / 2.0).floor();
        draw_texture_ex(
            icon,
            rect.x + offset,
            rect.y + offset,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(icon_size, icon_size)),
                ..Default::default()
            },
        );
    }

    fn draw_object(&self, obj: &FallingObject) {
        let rect = obj.rect();
        match self.assets.objects.get(obj.type_index) {
            Some(Asset::Loaded(texture)) => draw_texture_ex(
                texture,
                rect.x,
                rect.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(rect.size()),
                    ..Default::default()
                },
            ),
            _ => draw_rectangle(rect.x, rect.y, rect.w, rect.h, OBJECT_FALLBACK_COLOR),
        }
    }
}

/// Stretches a background over the whole window. A missing
/// background leaves the clear colour showing.
fn draw_backdrop(texture: &Asset<Texture2D>, opacity: f32) {
    let Some(texture) = texture.loaded() else {
        return;
    };

    draw_texture_ex(
        texture,
        0.0,
        0.0,
        Color::new(1.0, 1.0, 1.0, opacity),
        DrawTextureParams {
            dest_size: Some(vec2(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32)),
            ..Default::default()
        },
    );
}
