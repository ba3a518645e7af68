use super::cursor::CursorState;
use super::layout::{Cell, FieldLayout};
use super::time::{HourMode, TimeValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinDirection {
    Up,
    Down,
}

/// How an Up/Down key applies at the current cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPlan {
    /// Step the whole cell: the replacement canonical value.
    Cell(TimeValue),
    /// Step the single digit under the cursor: the replacement character,
    /// still subject to the positional typing rules.
    Digit(char),
}

/// Decide what spinning in `dir` does for the current state, or None when
/// nothing can change.
///
/// The whole cell steps whenever there is no single-character selection,
/// the cursor sits on a blank, stepping the lone digit of a blank-padded
/// hour would leave the valid range, or the cursor is in the AM/PM cell.
/// Otherwise the one selected digit steps through the values that keep its
/// position valid.
pub fn plan(
    value: TimeValue,
    text: &str,
    state: &CursorState,
    dir: SpinDirection,
    layout: &FieldLayout,
) -> Option<SpinPlan> {
    let pos = state.pos();
    let cell = layout.cell_at(pos)?;
    if text.len() != layout.display_len() {
        return None;
    }
    if whole_cell_spin(text, pos, state, dir, cell) {
        Some(SpinPlan::Cell(spin_cell(value, cell, dir)))
    } else {
        spin_digit(text, pos, dir, layout).map(SpinPlan::Digit)
    }
}

fn whole_cell_spin(
    text: &str,
    pos: usize,
    state: &CursorState,
    dir: SpinDirection,
    cell: Cell,
) -> bool {
    if cell == Cell::Meridiem {
        return true;
    }
    if state.selection_len() != 1 {
        return true;
    }
    let bytes = text.as_bytes();
    if bytes[pos] == b' ' {
        return true;
    }
    // On a blank-padded hour the ones digit wraps 1..=9, so stepping off
    // either end has to roll the whole cell.
    let boundary = match dir {
        SpinDirection::Up => b'9',
        SpinDirection::Down => b'1',
    };
    bytes[pos] == boundary && pos > 0 && bytes[pos - 1] == b' '
}

fn spin_cell(value: TimeValue, cell: Cell, dir: SpinDirection) -> TimeValue {
    let delta = match dir {
        SpinDirection::Up => 1,
        SpinDirection::Down => -1,
    };
    match cell {
        Cell::Hour => value.offset_hours(delta),
        Cell::Minute => value.offset_minutes(delta),
        Cell::Second => value.offset_seconds(delta),
        Cell::Meridiem => value.toggle_meridiem(),
    }
}

fn spin_digit(text: &str, pos: usize, dir: SpinDirection, layout: &FieldLayout) -> Option<char> {
    let cell = layout.cell_at(pos)?;
    let bytes = text.as_bytes();
    let tens = pos == layout.start(cell);

    // The 12-hour tens place only has two states, blank and '1'.
    if cell == Cell::Hour && tens && layout.mode() == HourMode::Hour12 {
        return Some(if bytes[pos] == b' ' { '1' } else { ' ' });
    }

    let digit = (bytes[pos] as char).to_digit(10)?;
    let modulus = match cell {
        Cell::Hour if tens => {
            if bytes[1] > b'3' {
                2
            } else {
                3
            }
        }
        Cell::Hour => match layout.mode() {
            HourMode::Hour24 => {
                if bytes[0] == b'2' {
                    4
                } else {
                    10
                }
            }
            HourMode::Hour12 => {
                if bytes[0] == b'1' {
                    3
                } else {
                    10
                }
            }
        },
        Cell::Minute | Cell::Second if tens => 6,
        _ => 10,
    };
    let delta = match dir {
        SpinDirection::Up => 1,
        SpinDirection::Down => -1,
    };
    let next = (digit as i32 + delta).rem_euclid(modulus);
    char::from_digit(next as u32, 10)
}
