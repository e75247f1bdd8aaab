use crate::screentext::*;

use std::{
    fmt,
    sync::{LazyLock, Mutex},
};

/// Lines of text written during the current frame.
struct DumpBuffer {
    curr_line: usize,
    text: ScreenText,
}

impl DumpBuffer {
    fn new() -> Self {
        Self {
            curr_line: 0,
            text: ScreenText::new(),
        }
    }

    fn put(&mut self, s: &str) {
        if let Some(line) = self.text.lines.get_mut(self.curr_line) {
            line.put(s);
        }
    }

    fn wipe(&mut self) {
        self.curr_line = 0;
        self.text.lines.iter_mut().for_each(Line::clear);
    }
}

impl fmt::Write for DumpBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if !s.is_ascii() {
            return Err(fmt::Error);
        }

        let mut pieces = s.split('\n');
        if let Some(first) = pieces.next() {
            self.put(first);
        }
        for piece in pieces {
            self.curr_line = (self.curr_line + 1).min(SCREENCON_LINES);
            self.put(piece);
        }

        Ok(())
    }
}

static GLOBAL_DUMP: LazyLock<Mutex<DumpBuffer>> = LazyLock::new(|| Mutex::new(DumpBuffer::new()));

/// Per-frame scratch text, filled with [crate::dump] and
/// wiped at the start of every frame.
pub struct ScreenDump;

impl ScreenDump {
    fn scope<R>(scope: impl FnOnce(&mut DumpBuffer) -> R) -> Option<R> {
        let mut lock = GLOBAL_DUMP.lock().ok()?;
        Some(scope(&mut lock))
    }

    pub fn draw() {
        Self::scope(|con| con.text.draw());
    }

    pub fn new_frame() {
        Self::scope(|con| con.wipe());
    }
}

impl fmt::Write for ScreenDump {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Self::scope(|con| fmt::Write::write_str(con, s)).unwrap_or(Err(fmt::Error))
    }
}

#[macro_export]
macro_rules! dump {
    ($($arg:tt)+) => {
        let _ = std::fmt::write(&mut $crate::ScreenDump,
            std::format_args!(
                "{}\n",
                std::format_args!($($arg)+)
            ),
        );
    };
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;

    fn visible(dump: &DumpBuffer) -> Vec<String> {
        dump.text
            .lines
            .iter()
            .take_while(|line| !line.is_empty())
            .map(|line| line.as_str().to_owned())
            .collect()
    }

    #[test]
    fn test_lines_split_on_newline() {
        let mut dump = DumpBuffer::new();

        write!(&mut dump, "fps: {}\nobjects: {}\n", 60, 3).unwrap();

        assert_eq!(visible(&dump), vec!["fps: 60", "objects: 3"]);

        dump.wipe();
        assert!(visible(&dump).is_empty());
    }

    #[test]
    fn test_non_ascii_is_rejected() {
        let mut dump = DumpBuffer::new();

        assert!(write!(&mut dump, "ok\n").is_ok());
        assert!(write!(&mut dump, "\u{1F47D}").is_err());
    }

    #[test]
    fn test_overflow_lines_are_dropped() {
        let mut dump = DumpBuffer::new();

        for idx in 0..(SCREENCON_LINES * 2) {
            write!(&mut dump, "{idx}\n").unwrap();
        }

        assert_eq!(visible(&dump).len(), SCREENCON_LINES);
    }
}
