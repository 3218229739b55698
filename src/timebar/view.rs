//! Rendering of the time bar.

use super::layout::{Frames, Rect};
use super::model::Model;
use lipgloss_extras::prelude::*;

/// One rendered cell: background, glyph and optional text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell<'a> {
    bg: &'a str,
    ch: char,
    fg: Option<&'a str>,
}

/// Label text laid out inside its rectangle, centered.
struct PlacedLabel {
    rect: Rect,
    start: u16,
    chars: Vec<char>,
}

impl PlacedLabel {
    fn new(rect: Rect, text: &str) -> Self {
        let chars: Vec<char> = text.chars().take(rect.width as usize).collect();
        let start = rect.x + (rect.width - chars.len() as u16) / 2;
        Self { rect, start, chars }
    }

    fn glyph_at(&self, x: u16, y: u16) -> Option<char> {
        if !self.rect.contains(x, y) || x < self.start {
            return None;
        }
        self.chars.get((x - self.start) as usize).copied()
    }
}

impl Model {
    /// Renders the bar as `height` lines of `width` cells.
    ///
    /// Each region is drawn as blank cells on its background color; the
    /// label's digits are drawn in the label color over whatever region lies
    /// beneath them. An unsized bar renders as an empty string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_timebar::timebar::{new, with_size};
    /// use lipgloss_extras::lipgloss;
    ///
    /// let bar = new(&[with_size(12, 4)]);
    /// let view = bar.view();
    /// assert_eq!(view.lines().count(), 4);
    /// for line in view.lines() {
    ///     assert_eq!(lipgloss::width_visible(line), 12);
    /// }
    /// ```
    pub fn view(&self) -> String {
        let frames = self.frames();
        let label = self
            .label_text()
            .zip(frames.label)
            .map(|(text, rect)| PlacedLabel::new(rect, text));

        (0..self.height)
            .map(|y| self.render_row(&frames, label.as_ref(), y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn cell_at(&self, frames: &Frames, label: Option<&PlacedLabel>, x: u16, y: u16) -> Cell<'_> {
        let bg = if frames.fill.contains(x, y) {
            self.fill_color()
        } else if frames.padding.contains(x, y) {
            self.padding_color()
        } else {
            self.boundary_color()
        };

        match label.and_then(|l| l.glyph_at(x, y)) {
            Some(ch) => Cell {
                bg,
                ch,
                fg: Some(self.label_color()),
            },
            None => Cell { bg, ch: ' ', fg: None },
        }
    }

    fn render_row(&self, frames: &Frames, label: Option<&PlacedLabel>, y: u16) -> String {
        let mut out = String::new();
        let mut run: Option<(Cell<'_>, String)> = None;

        for x in 0..self.width {
            let cell = self.cell_at(frames, label, x, y);
            if let Some((head, text)) = run.as_mut() {
                if head.bg == cell.bg && head.fg == cell.fg {
                    text.push(cell.ch);
                    continue;
                }
            }
            if let Some((head, text)) = run.take() {
                out.push_str(&paint(head, &text));
            }
            run = Some((cell, cell.ch.to_string()));
        }
        if let Some((head, text)) = run {
            out.push_str(&paint(head, &text));
        }

        out
    }
}

fn paint(cell: Cell<'_>, text: &str) -> String {
    let mut style = Style::new().background(Color::from(cell.bg));
    if let Some(fg) = cell.fg {
        style = style.foreground(Color::from(fg));
    }
    style.render(text)
}
