use super::time::HourMode;

/// One editable unit of the display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Hour,
    Minute,
    Second,
    Meridiem,
}

const CELLS_24: [Cell; 3] = [Cell::Hour, Cell::Minute, Cell::Second];
const CELLS_12: [Cell; 4] = [Cell::Hour, Cell::Minute, Cell::Second, Cell::Meridiem];

const LEN_24: usize = 8;
const LEN_12: usize = 11;

/// Fixed geometry of the display string for one hour mode.
///
/// `"hh:mm:ss"` in 24-hour mode, `"hh:mm:ss xM"` in 12-hour mode. Cell
/// ranges are inclusive character index pairs; positions 2 and 5 are the
/// colon delimiters and position 8 the space before the AM/PM cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    mode: HourMode,
}

impl FieldLayout {
    pub fn new(mode: HourMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> HourMode {
        self.mode
    }

    pub fn display_len(&self) -> usize {
        match self.mode {
            HourMode::Hour24 => LEN_24,
            HourMode::Hour12 => LEN_12,
        }
    }

    pub fn cells(&self) -> &'static [Cell] {
        match self.mode {
            HourMode::Hour24 => &CELLS_24,
            HourMode::Hour12 => &CELLS_12,
        }
    }

    /// Inclusive (start, end) character range of a cell.
    pub fn range(&self, cell: Cell) -> (usize, usize) {
        match cell {
            Cell::Hour => (0, 1),
            Cell::Minute => (3, 4),
            Cell::Second => (6, 7),
            Cell::Meridiem => (9, 10),
        }
    }

    pub fn start(&self, cell: Cell) -> usize {
        self.range(cell).0
    }

    pub fn end(&self, cell: Cell) -> usize {
        self.range(cell).1
    }

    /// The cell owning a character position, or None on a delimiter or out
    /// of range.
    pub fn cell_at(&self, pos: usize) -> Option<Cell> {
        self.cells()
            .iter()
            .copied()
            .find(|&cell| {
                let (start, end) = self.range(cell);
                pos >= start && pos <= end
            })
    }

    pub fn is_delimiter(&self, pos: usize) -> bool {
        pos < self.display_len() && self.cell_at(pos).is_none()
    }

    pub fn next_cell(&self, cell: Cell) -> Option<Cell> {
        let cells = self.cells();
        let idx = cells.iter().position(|&c| c == cell)?;
        cells.get(idx + 1).copied()
    }

    pub fn prev_cell(&self, cell: Cell) -> Option<Cell> {
        let cells = self.cells();
        let idx = cells.iter().position(|&c| c == cell)?;
        idx.checked_sub(1).map(|i| cells[i])
    }

    pub fn first_cell(&self) -> Cell {
        Cell::Hour
    }

    pub fn last_cell(&self) -> Cell {
        match self.mode {
            HourMode::Hour24 => Cell::Second,
            HourMode::Hour12 => Cell::Meridiem,
        }
    }

    /// Last position the cursor may occupy.
    pub fn last_position(&self) -> usize {
        self.end(self.last_cell())
    }
}
