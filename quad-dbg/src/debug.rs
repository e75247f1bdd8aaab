use std::fmt::Write;
use std::{
    fmt,
    sync::{LazyLock, Mutex},
};

use log::{Level, Log, Metadata, Record, STATIC_MAX_LEVEL, SetLoggerError};
use macroquad::prelude::*;

use crate::ScreenDump;

const DBG_FONT_SIZE: u16 = 16;
const DBG_MSG_LIFE: f32 = 3.0;
const DBG_MSG_CAP: usize = 30;

#[derive(Clone)]
struct DebugMsg {
    color: Color,
    line: String,
    spawn_time: f32,
}

struct DebugMsgStore {
    dbg_event_cur: usize,
    dbg_events: [DebugMsg; DBG_MSG_CAP],
}

impl DebugMsgStore {
    fn new() -> Self {
        Self {
            dbg_event_cur: 0,
            dbg_events: std::array::from_fn(|_| DebugMsg {
                line: String::with_capacity(255),
                spawn_time: f32::NEG_INFINITY,
                color: WHITE,
            }),
        }
    }

    fn put_event(&mut self, msg: &fmt::Arguments, color: Color, time: f32) {
        let cell = &mut self.dbg_events[self.dbg_event_cur];

        cell.line.clear();
        write!(&mut cell.line, "{}", msg).unwrap();
        cell.spawn_time = time;
        cell.color = color;

        self.dbg_event_cur = (self.dbg_event_cur + 1) % DBG_MSG_CAP;
    }
}

static DEBUG_CELL: LazyLock<Mutex<DebugMsgStore>> =
    LazyLock::new(|| Mutex::new(DebugMsgStore::new()));

/// Keeps the latest log lines around for the overlay and
/// echoes every record to stderr.
#[derive(Clone, Copy, Debug)]
struct OnScreenLog;

static ON_SCREEN_LOG: OnScreenLog = OnScreenLog;

impl Log for OnScreenLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let color = match record.level() {
            Level::Error => RED,
            Level::Warn => YELLOW,
            Level::Info => GREEN,
            Level::Debug => WHITE,
            Level::Trace => GRAY,
        };

        eprintln!(
            "{:<5} {}:{} {}",
            record.level(),
            record.file().unwrap_or("???"),
            record.line().unwrap_or(0),
            record.args(),
        );

        let Ok(mut cell) = DEBUG_CELL.lock() else {
            return;
        };
        cell.put_event(record.args(), color, get_time() as f32);
    }

    fn flush(&self) { /* NOOP */ }
}

pub fn init_on_screen_log() -> Result<(), SetLoggerError> {
    log::set_logger(&ON_SCREEN_LOG)?;
    log::set_max_level(STATIC_MAX_LEVEL);

    Ok(())
}

/// The debug overlay: the `dump!` lines of the current frame
/// and the log lines of the last few seconds.
pub struct Debug {
    enabled: bool,
    text_cursor_x: f32,
    text_cursor_y: f32,
}

impl Debug {
    pub fn new() -> Self {
        Self {
            enabled: false,
            text_cursor_x: 0.0,
            text_cursor_y: DBG_FONT_SIZE as f32,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn draw(&mut self) {
        if !self.enabled {
            return;
        }

        ScreenDump::draw();

        self.text_cursor_x = 0.0;
        self.text_cursor_y = screen_height() / 2.0;
        self.draw_events();
    }

    fn new_dbg_line(&mut self) {
        self.text_cursor_x = 0.0;
        self.text_cursor_y += DBG_FONT_SIZE as f32;
    }

    fn put_debug_text(&mut self, text: &str, color: Color) {
        draw_text(
            text,
            self.text_cursor_x,
            self.text_cursor_y,
            DBG_FONT_SIZE as f32,
            color,
        );

        self.text_cursor_x += measure_text(text, None, DBG_FONT_SIZE, 1.0).width;
    }

    fn draw_events(&mut self) {
        let Ok(dbg_cell) = DEBUG_CELL.lock() else {
            return;
        };

        let time = get_time() as f32;
        for msg in &dbg_cell.dbg_events {
            if msg.spawn_time + DBG_MSG_LIFE < time {
                continue;
            }

            self.put_debug_text(msg.line.as_str(), msg.color);
            self.new_dbg_line();
        }
    }
}

impl Default for Debug {
    fn default() -> Self {
        Self::new()
    }
}
