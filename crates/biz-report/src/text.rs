//! Text preparation for the built-in Helvetica faces.
//!
//! Built-in PDF fonts only cover a Latin-1 style character set, and they
//! carry no layout engine. This module narrows arbitrary text down to what
//! the font can show and breaks it into lines that fit a given width.

/// Points to millimetres.
pub(crate) const PT_TO_MM: f32 = 25.4 / 72.0;

/// Bold glyphs run wider than the regular metrics below.
const BOLD_FACTOR: f32 = 1.08;

/// Fallback advance for characters outside printable ASCII.
const DEFAULT_ADVANCE: u16 = 556;

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_ADVANCES: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Reduce `text` to characters the built-in fonts can render.
///
/// Currency signs become their codes (`₹` becomes `Rs.`), typographic
/// punctuation becomes its ASCII twin, tabs become spaces and anything else
/// outside Latin-1 is dropped. Newlines are kept.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '₹' => out.push_str("Rs."),
            '€' => out.push_str("EUR"),
            '₩' => out.push_str("KRW"),
            '₽' => out.push_str("RUB"),
            '₺' => out.push_str("TRY"),
            '₦' => out.push_str("NGN"),
            '₱' => out.push_str("PHP"),
            '₫' => out.push_str("VND"),
            '₪' => out.push_str("ILS"),
            '‘' | '’' | '‚' | '′' => out.push('\''),
            '“' | '”' | '„' | '″' => out.push('"'),
            '–' | '—' | '−' | '‐' => out.push('-'),
            '…' => out.push_str("..."),
            '•' | '·' => out.push('-'),
            '\t' => out.push_str("    "),
            '\r' => {}
            '\n' => out.push('\n'),
            c if c.is_control() => {}
            c if u32::from(c) <= 0xFF => out.push(c),
            _ => {}
        }
    }
    out
}

/// Rendered width of `text` in millimetres.
pub(crate) fn measure(text: &str, size_pt: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(advance(c))).sum();
    #[allow(clippy::cast_precision_loss)]
    let width = units as f32 / 1000.0 * size_pt * PT_TO_MM;
    if bold { width * BOLD_FACTOR } else { width }
}

fn advance(ch: char) -> u16 {
    let code = u32::from(ch);
    if (32..=126).contains(&code) {
        HELVETICA_ADVANCES[(code - 32) as usize]
    } else {
        DEFAULT_ADVANCE
    }
}

/// Greedy word wrap to `max_width` millimetres.
///
/// Every `\n` starts a new line, blank lines included. Words wider than the
/// line are split between characters.
pub(crate) fn wrap(text: &str, size_pt: f32, bold: bool, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate, size_pt, bold) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure(word, size_pt, bold) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = split_long_word(word, size_pt, bold, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }
    lines
}

fn split_long_word(word: &str, size_pt: f32, bold: bool, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if piece.chars().count() > 1 && measure(&piece, size_pt, bold) > max_width {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    pieces.push(piece);
    pieces
}
