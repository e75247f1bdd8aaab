use macroquad::prelude::*;

pub(crate) const SCREENCON_LINES: usize = 32;
pub(crate) const SCREENCON_CHARS_PER_LINE: usize = 255;
pub(crate) const SCREENCON_DEFAULT_BACKGROUND: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.6,
};

#[derive(Clone)]
pub(crate) struct Line {
    buf: String,
    color: Color,
    background: Color,
}

impl Line {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(SCREENCON_CHARS_PER_LINE),
            color: WHITE,
            background: SCREENCON_DEFAULT_BACKGROUND,
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buf
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub(crate) fn put(&mut self, mut s: &str) {
        let used = self.buf.len();
        if used >= SCREENCON_CHARS_PER_LINE {
            return;
        }
        let remaining = SCREENCON_CHARS_PER_LINE - used;

        if s.len() > remaining {
            s = &s[..remaining];
        }

        self.buf.push_str(s);
    }

    pub(crate) fn clear(&mut self) {
        self.buf.clear();
    }
}

pub(crate) struct ScreenText {
    pub(crate) lines: Vec<Line>,
}

impl ScreenText {
    pub(crate) fn new() -> Self {
        Self {
            lines: vec![Line::new(); SCREENCON_LINES],
        }
    }

    fn iter_visible_lines(&'_ self) -> impl Iterator<Item = (usize, &'_ Line)> + '_ {
        self.lines
            .iter()
            .take_while(|line| !line.is_empty())
            .enumerate()
    }

    pub(crate) fn draw(&self) {
        set_default_camera();
        let line_box = screen_height() / (SCREENCON_LINES as f32);
        let (font_size, font_scale, font_scale_aspect) = camera_font_scale(line_box);
        let dims = measure_text("A", None, font_size, font_scale);
        let line_height = dims.height;
        let spacing = (line_box - line_height) / 2.0;

        for (idx, line) in self.iter_visible_lines() {
            let y = idx as f32 * line_box;
            let width = measure_text(line.as_str(), None, font_size, font_scale).width;
            draw_rectangle(0.0, y, width, line_box, line.background);
        }

        for (idx, line) in self.iter_visible_lines() {
            let y = idx as f32 * line_box + line_box - spacing;
            draw_text_ex(
                line.as_str(),
                0.0,
                y,
                TextParams {
                    font: None,
                    font_size,
                    font_scale,
                    font_scale_aspect,
                    rotation: 0.0,
                    color: line.color,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Line, SCREENCON_CHARS_PER_LINE};

    #[test]
    fn test_line_overfill() {
        let mut line = Line::new();

        let samples = ["1"; 3000];

        for (idx, s) in samples.into_iter().enumerate() {
            if idx % 500 == 0 {
                line.clear();
            }

            line.put(s);

            assert!(line.buf.len() <= SCREENCON_CHARS_PER_LINE);
            assert!(line.buf.capacity() <= SCREENCON_CHARS_PER_LINE);
        }
    }

    #[test]
    fn test_line_truncates_long_input() {
        let mut line = Line::new();
        let long = "x".repeat(SCREENCON_CHARS_PER_LINE * 2);

        line.put("ab");
        line.put(&long);

        assert_eq!(line.buf.len(), SCREENCON_CHARS_PER_LINE);
        assert!(line.buf.starts_with("abx"));
    }
}
