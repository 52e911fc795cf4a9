//! Fixed-advance text wrapping and text-block flow.
//!
//! Wrapping is a deterministic approximation of the renderer: full-width glyphs (CJK, kana,
//! hangul, full-width forms, pictographs) advance by one em, everything else by half an em.

use crate::foundation::core::EPSILON;
use crate::layout::flow::LayoutSession;
use crate::model::page::TextBlock;

/// Horizontal advance of `c` at `font_size`.
pub fn glyph_advance(c: char, font_size: f64) -> f64 {
    if is_full_width(c) {
        font_size
    } else {
        font_size * 0.5
    }
}

/// Width of `text` at `font_size`.
pub fn measure(text: &str, font_size: f64) -> f64 {
    text.chars().map(|c| glyph_advance(c, font_size)).sum()
}

fn is_full_width(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F
            | 0x2E80..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x1F300..=0x1F64F
            | 0x1F900..=0x1F9FF
            | 0x20000..=0x3FFFD
    )
}

/// Greedily wrap `text` to `width`.
///
/// Explicit newlines start a new line and blank lines are kept. Latin words are not broken
/// unless a single word is wider than the line. Leading and trailing whitespace of the whole
/// text is ignored, so whitespace-only input yields no lines.
pub fn wrap_text(text: &str, width: f64, font_size: f64) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for paragraph in text.lines() {
        wrap_paragraph(paragraph.trim_end(), width, font_size, &mut out);
    }
    out
}

fn wrap_paragraph(paragraph: &str, width: f64, font_size: f64, out: &mut Vec<String>) {
    if paragraph.is_empty() {
        out.push(String::new());
        return;
    }
    let mut line = String::new();
    let mut line_width = 0.0;
    for c in paragraph.chars() {
        let advance = glyph_advance(c, font_size);
        if line_width + advance > width + EPSILON && !line.is_empty() {
            let mut carry = take_trailing_word(&mut line, c);
            if measure(&carry, font_size) + advance > width {
                line.push_str(&carry);
                carry.clear();
            }
            out.push(line.trim_end().to_string());
            line = carry.trim_start().to_string();
            line_width = measure(&line, font_size);
        }
        if line.is_empty() && c == ' ' {
            continue;
        }
        line.push(c);
        line_width += advance;
    }
    if !line.is_empty() {
        out.push(line);
    }
}

/// Split off the unfinished latin word at the end of `line` when `next` continues it.
fn take_trailing_word(line: &mut String, next: char) -> String {
    if !is_word_char(next) {
        return String::new();
    }
    let Some(cut) = line.rfind(|c: char| !is_word_char(c)) else {
        return String::new();
    };
    let cut = cut + line[cut..].chars().next().map_or(0, char::len_utf8);
    if cut == 0 || cut == line.len() {
        return String::new();
    }
    line.split_off(cut)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '\'' | '-' | '_')
}

impl LayoutSession<'_> {
    /// Flow wrapped lines below the time block, continuing onto new pages as needed.
    ///
    /// Each page the text touches gets one rectangle covering its lines there.
    pub(crate) fn place_text(&mut self, lines: &[String]) {
        let line_height = self.config.text.line_height;
        if self.available_for_block() < line_height {
            self.start_new_page();
        }
        let gap = self.gap_before_block();
        self.advance(gap);

        let mut rest = lines;
        while !rest.is_empty() {
            let mut fit = ((self.remaining() + EPSILON) / line_height).floor().max(0.0) as usize;
            if self.is_fresh() {
                fit = fit.max(1);
            }
            if fit == 0 {
                self.start_new_page();
                continue;
            }
            let (chunk, tail) = rest.split_at(fit.min(rest.len()));
            let height = chunk.len() as f64 * line_height;
            let rect = self.full_width_rect(self.cursor_y(), height);
            let slot = self.entry_slot();
            let block = slot.text.get_or_insert_with(|| TextBlock {
                rects: Vec::new(),
                text: String::new(),
            });
            block.rects.push(rect);
            if !block.text.is_empty() {
                block.text.push('\n');
            }
            block.text.push_str(&chunk.join("\n"));
            self.advance(height);
            rest = tail;
            if !rest.is_empty() {
                tracing::debug!(page = self.page_number(), lines = rest.len(), "text continues");
                self.start_new_page();
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
