use super::layout::{Cell, FieldLayout};
use super::time::HourMode;

/// Build the candidate display string for typing `ch` over position `pos`,
/// or None when the keystroke is rejected before validation.
///
/// Rules are positional. Hour tens on the 24-hour clock only take 0, 1 or
/// 2; on the 12-hour clock only '1' (when the ones digit can stay) or a
/// blank. Minute and second tens reject digits above 5 unless the whole
/// cell is selected, in which case the typed digit zero-pads to a fresh
/// two-digit cell. The AM/PM cell takes an uppercase A or P on its first
/// character only. Whatever passes here still has to survive full-string
/// validation before it is committed.
pub fn apply_char(
    text: &str,
    pos: usize,
    ch: char,
    whole_cell: bool,
    layout: &FieldLayout,
) -> Option<String> {
    let cell = layout.cell_at(pos)?;
    if text.len() != layout.display_len() {
        return None;
    }
    let bytes = text.as_bytes();

    match cell {
        Cell::Hour if pos == 0 => match layout.mode() {
            HourMode::Hour24 => {
                if !matches!(ch, '0' | '1' | '2') {
                    return None;
                }
                Some(replace_char(text, pos, ch))
            }
            HourMode::Hour12 => {
                if !matches!(ch, '1' | ' ') {
                    return None;
                }
                // With tens set, the ones digit must still form 10..12.
                if !matches!(bytes[1], b'0' | b'1' | b'2') {
                    return None;
                }
                if ch == ' ' && (whole_cell || bytes[1] == b'0') {
                    return None;
                }
                Some(replace_char(text, pos, ch))
            }
        },
        Cell::Hour => {
            if !ch.is_ascii_digit() {
                return None;
            }
            if layout.mode() == HourMode::Hour12
                && bytes[0] == b'1'
                && !matches!(ch, '0' | '1' | '2')
            {
                return None;
            }
            Some(replace_char(text, pos, ch))
        }
        Cell::Minute | Cell::Second => {
            if !ch.is_ascii_digit() {
                return None;
            }
            let (start, _) = layout.range(cell);
            if pos == start {
                if whole_cell {
                    // Replacing a selected cell zero-pads the typed digit.
                    let tens = replace_char(text, start, '0');
                    return Some(replace_char(&tens, start + 1, ch));
                }
                if ch > '5' {
                    return None;
                }
            }
            Some(replace_char(text, pos, ch))
        }
        Cell::Meridiem => {
            if pos == layout.start(Cell::Meridiem) && matches!(ch, 'A' | 'P') {
                Some(replace_char(text, pos, ch))
            } else {
                None
            }
        }
    }
}

/// Replace the single character at `pos`. The display string is plain
/// ASCII, so byte splicing is safe.
fn replace_char(text: &str, pos: usize, ch: char) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..pos]);
    out.push(ch);
    out.push_str(&text[pos + 1..]);
    out
}
