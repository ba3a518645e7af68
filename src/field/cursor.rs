use super::layout::{Cell, FieldLayout};

/// Selection endpoints as character offsets. `anchor` is the fixed end,
/// `extent` the end that moves as the selection grows or shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    anchor: usize,
    extent: usize,
}

impl Selection {
    fn span(self) -> (usize, usize) {
        (self.anchor.min(self.extent), self.anchor.max(self.extent))
    }
}

/// Cursor position plus optional selection, always inside one cell.
///
/// `pos` is the index of the character the next edit replaces. Navigation
/// produces a replacement state rather than mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pos: usize,
    sel: Option<Selection>,
}

impl CursorState {
    pub fn at(pos: usize) -> Self {
        Self { pos, sel: None }
    }

    /// Cursor at the start of `cell` with the whole cell selected.
    pub fn cell_selection(layout: &FieldLayout, cell: Cell) -> Self {
        let (start, end) = layout.range(cell);
        Self {
            pos: start,
            sel: Some(Selection {
                anchor: start,
                extent: end + 1,
            }),
        }
    }

    /// Cursor on `pos` with exactly that character selected.
    pub fn char_selection(pos: usize) -> Self {
        Self {
            pos,
            sel: Some(Selection {
                anchor: pos,
                extent: pos + 1,
            }),
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Normalized (start, end) selection span, end exclusive.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.sel.map(Selection::span)
    }

    pub fn selection_len(&self) -> usize {
        self.selection().map_or(0, |(start, end)| end - start)
    }

    pub fn is_whole_cell(&self, layout: &FieldLayout) -> bool {
        let Some(span) = self.selection() else {
            return false;
        };
        let Some(cell) = layout.cell_at(self.pos) else {
            return false;
        };
        let (start, end) = layout.range(cell);
        span == (start, end + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Tab,
    BackTab,
}

/// What a navigation key did with the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Key consumed, state replaced.
    Moved(CursorState),
    /// Key consumed, nothing changed.
    Swallowed,
    /// Not handled here, host default behavior applies.
    PassThrough,
}

/// Apply a navigation key to the cursor state.
///
/// Plain arrows collapse any selection and step one character, skipping
/// over delimiters so the cursor only ever rests on cell characters.
/// Shifted arrows grow or shrink a selection inside the current cell.
/// Tab and BackTab jump between cells, pre-selecting the target cell, and
/// pass through at either end of the field so the host can move focus.
pub fn navigate(state: CursorState, layout: &FieldLayout, key: NavKey, select: bool) -> NavOutcome {
    match (key, select) {
        (NavKey::Left, false) => move_left(state, layout),
        (NavKey::Left, true) => extend_left(state, layout),
        (NavKey::Right, false) => move_right(state, layout),
        (NavKey::Right, true) => extend_right(state, layout),
        (NavKey::Tab, _) => jump_cell(state, layout, true),
        (NavKey::BackTab, _) => jump_cell(state, layout, false),
    }
}

fn move_left(state: CursorState, layout: &FieldLayout) -> NavOutcome {
    let pos = state.pos;
    if pos == 0 {
        return if state.sel.is_some() {
            NavOutcome::Moved(CursorState::at(0))
        } else {
            NavOutcome::PassThrough
        };
    }
    let Some(cell) = layout.cell_at(pos) else {
        return NavOutcome::Swallowed;
    };
    // Cell starts are preceded by a delimiter, so step over both.
    let new_pos = if pos == layout.start(cell) {
        pos - 2
    } else {
        pos - 1
    };
    NavOutcome::Moved(CursorState::at(new_pos))
}

fn move_right(state: CursorState, layout: &FieldLayout) -> NavOutcome {
    // A selection collapses to its start before the cursor moves.
    let pos = match state.selection() {
        Some((start, _)) => start,
        None => state.pos,
    };
    if pos == layout.last_position() {
        return if state.sel.is_some() {
            NavOutcome::Moved(CursorState::at(pos))
        } else {
            NavOutcome::Swallowed
        };
    }
    let Some(cell) = layout.cell_at(pos) else {
        return NavOutcome::Swallowed;
    };
    let new_pos = if pos == layout.end(cell) { pos + 2 } else { pos + 1 };
    NavOutcome::Moved(CursorState::at(new_pos))
}

fn extend_left(state: CursorState, layout: &FieldLayout) -> NavOutcome {
    let Some(cell) = layout.cell_at(state.pos) else {
        return NavOutcome::Swallowed;
    };
    let (start, _) = layout.range(cell);
    match state.sel {
        None => NavOutcome::Moved(CursorState {
            pos: state.pos,
            sel: Some(Selection {
                anchor: state.pos + 1,
                extent: state.pos,
            }),
        }),
        Some(sel) if sel.extent < sel.anchor => {
            if sel.extent == start {
                return NavOutcome::Swallowed;
            }
            let extent = sel.extent - 1;
            NavOutcome::Moved(CursorState {
                pos: extent,
                sel: Some(Selection { extent, ..sel }),
            })
        }
        Some(sel) => {
            let extent = sel.extent - 1;
            if extent == sel.anchor {
                NavOutcome::Moved(CursorState::at(sel.anchor))
            } else {
                NavOutcome::Moved(CursorState {
                    pos: extent - 1,
                    sel: Some(Selection { extent, ..sel }),
                })
            }
        }
    }
}

fn extend_right(state: CursorState, layout: &FieldLayout) -> NavOutcome {
    let Some(cell) = layout.cell_at(state.pos) else {
        return NavOutcome::Swallowed;
    };
    let (start, end) = layout.range(cell);
    match state.sel {
        None => NavOutcome::Moved(CursorState::char_selection(state.pos)),
        Some(sel) if sel.extent > sel.anchor => {
            if state.is_whole_cell(layout) {
                return NavOutcome::Swallowed;
            }
            // Crossing the cell end snaps to the whole cell instead of
            // bleeding into the delimiter.
            if sel.extent == end + 1 {
                return NavOutcome::Moved(CursorState {
                    pos: end,
                    sel: Some(Selection {
                        anchor: start,
                        extent: end + 1,
                    }),
                });
            }
            let extent = sel.extent + 1;
            NavOutcome::Moved(CursorState {
                pos: extent - 1,
                sel: Some(Selection { extent, ..sel }),
            })
        }
        Some(sel) => {
            let extent = sel.extent + 1;
            if extent == sel.anchor {
                NavOutcome::Moved(CursorState::at(sel.anchor.min(end)))
            } else {
                NavOutcome::Moved(CursorState {
                    pos: extent,
                    sel: Some(Selection { extent, ..sel }),
                })
            }
        }
    }
}

fn jump_cell(state: CursorState, layout: &FieldLayout, forward: bool) -> NavOutcome {
    let Some(cell) = layout.cell_at(state.pos) else {
        return NavOutcome::Swallowed;
    };
    let target = if forward {
        layout.next_cell(cell)
    } else {
        layout.prev_cell(cell)
    };
    match target {
        Some(next) => NavOutcome::Moved(CursorState::cell_selection(layout, next)),
        None => NavOutcome::PassThrough,
    }
}
