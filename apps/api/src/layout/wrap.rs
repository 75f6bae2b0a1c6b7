//! Greedy word wrap shared by the screen estimator and the PDF compositor.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` into lines no wider than `max_width`.
///
/// `size` and `max_width` must share a unit (points or pixels). Each input line is
/// wrapped independently; blank input lines produce no output. A single word wider
/// than `max_width` is broken between characters. Returns an empty vec for blank text.
pub fn wrap_text(text: &str, metrics: &FontMetricTable, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        wrap_paragraph(paragraph, metrics, size, max_width, &mut lines);
    }
    lines
}

fn wrap_paragraph(
    paragraph: &str,
    metrics: &FontMetricTable,
    size: f32,
    max_width: f32,
    out: &mut Vec<String>,
) {
    let space_w = metrics.space_width * size;
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split_whitespace() {
        let word_w = metrics.width(word, size);

        if word_w > max_width {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, metrics, size, max_width);
            // The tail of a broken word can still take following words.
            if let Some(tail) = pieces.pop() {
                out.extend(pieces);
                current_width = metrics.width(&tail, size);
                current = tail;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
}

/// Splits one over-long word into chunks that each fit `max_width`.
/// Every chunk holds at least one character so the loop always advances.
fn break_word(word: &str, metrics: &FontMetricTable, size: f32, max_width: f32) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0.0_f32;

    for c in word.chars() {
        let mut buf = [0u8; 4];
        let w = metrics.width(c.encode_utf8(&mut buf), size);
        if !chunk.is_empty() && chunk_width + w > max_width {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0.0;
        }
        chunk.push(c);
        chunk_width += w;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}
