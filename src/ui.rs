use lib_game::{POWERUP_RECT, WINDOW_WIDTH};
use macroquad::prelude::*;

const MAIN_FONT_SIZE: u16 = 40;
const HINT_FONT_SIZE: u16 = 24;
const HUD_FONT_SIZE: u16 = 22;
const HUD_LEFT: f32 = 10.0;
const HUD_LINE: f32 = 25.0;

static TITLE_TEXT: &str = "ALIEN BUSTER";
static START_TEXT: &str = "Click to Start";
static CATCH_HINT: &str = "Click falling objects to send them back up!";
static POWERUP_HINT: &str = "Snail powerup reduces object size and speed";

static GAMEOVER_TEXT: &str = "Game Over";
static RESTART_HINT: &str = "Click to return to Title";

static POWERUP_LABEL: &str = "P";

pub fn draw_title() {
    draw_centered(TITLE_TEXT, 200.0, MAIN_FONT_SIZE, BLACK);
    draw_centered(START_TEXT, 300.0, HINT_FONT_SIZE, BLACK);
    draw_centered(CATCH_HINT, 350.0, HINT_FONT_SIZE, BLACK);
    draw_centered(POWERUP_HINT, 380.0, HINT_FONT_SIZE, BLACK);
}

pub fn draw_game_over(score: u32, difficulty_percent: u32) {
    draw_centered(GAMEOVER_TEXT, 200.0, MAIN_FONT_SIZE, BLACK);
    draw_centered(&format!("Score: {score}"), 260.0, HINT_FONT_SIZE, BLACK);
    draw_centered(
        &format!("Final Difficulty: {difficulty_percent}%"),
        290.0,
        HINT_FONT_SIZE,
        BLACK,
    );
    draw_centered(RESTART_HINT, 350.0, HINT_FONT_SIZE, BLACK);
}

pub fn draw_hud(score: u32, difficulty_percent: u32, powerup_left: Option<u32>) {
    draw_top_left(&format!("Score: {score}"), HUD_LEFT, 10.0, HUD_FONT_SIZE, BLACK);
    draw_top_left(
        &format!("Difficulty: {difficulty_percent}%"),
        HUD_LEFT,
        10.0 + HUD_LINE,
        HUD_FONT_SIZE,
        BLACK,
    );

    let Some(secs) = powerup_left else { return };
    draw_top_left(
        &format!("POWERUP: {secs}s"),
        HUD_LEFT,
        10.0 + 2.0 * HUD_LINE,
        HUD_FONT_SIZE,
        DARKGREEN,
    );
}

/// Stands in for the snail icon when it failed to load.
pub fn draw_powerup_label() {
    draw_top_left(
        POWERUP_LABEL,
        POWERUP_RECT.x + 15.0,
        POWERUP_RECT.y + 10.0,
        HUD_FONT_SIZE,
        BLACK,
    );
}

/// `top` is where the top of the text goes, not the baseline.
fn draw_top_left(text: &str, left: f32, top: f32, font_size: u16, color: Color) {
    let dims = measure_text(text, None, font_size, 1.0);
    draw_text(text, left, top + dims.offset_y, font_size as f32, color);
}

fn draw_centered(text: &str, top: f32, font_size: u16, color: Color) {
    let dims = measure_text(text, None, font_size, 1.0);
    let left = WINDOW_WIDTH as f32 / 2.0 - (dims.width / 2.0).floor();
    draw_top_left(text, left, top, font_size, color);
}
