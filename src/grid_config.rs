//! The static description of a grid: which slots exist, where they sit, and where they cross.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::path::Path;

use smallvec::SmallVec;

use crate::error::ParseError;
use crate::{MAX_SLOT_COUNT, MAX_SLOT_LENGTH};

/// An identifier for a given slot, based on its index in the Grid's `slot_configs` field.
pub type SlotId = usize;

/// Zero-indexed (row, column) coords for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Across,
    Down,
}

/// The letter positions at which two crossing slots must agree: `first` indexes into the slot
/// the overlap was requested for, `second` into the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub first: usize,
    pub second: usize,
}

impl Overlap {
    /// The same overlap seen from the other slot.
    pub fn mirrored(self) -> Overlap {
        Overlap { first: self.second, second: self.first }
    }
}

/// A struct representing a crossing between one slot and another, referencing the other slot's id
/// and the location of the intersection within the other slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub other_slot_id: SlotId,
    pub other_slot_cell: usize,
}

/// A slot in the grid. Two slots are the same slot iff start cell, direction and length match.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SlotConfig {
    pub start_cell: GridCoord,
    pub direction: Direction,
    pub length: usize,
}

impl Debug for SlotConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (row, col) = self.start_cell;
        write!(f, "({}, {}) {:?} {}", row, col, self.direction, self.length)
    }
}

impl SlotConfig {
    /// Generate the coords for each cell of this slot, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.length).map(move |cell_idx| {
            let (row, col) = self.start_cell;
            match self.direction {
                Direction::Across => (row, col + cell_idx),
                Direction::Down => (row + cell_idx, col),
            }
        })
    }
}

/// An across or down entry in the input to `GridConfig::from_entries`.
#[derive(Debug, Clone)]
pub struct GridEntry {
    pub loc: GridCoord,
    pub len: usize,
    pub dir: Direction,
}

/// A struct representing the aspects of a grid that are static during filling.
pub struct GridConfig {
    height: usize,
    width: usize,

    /// Row-major open/blocked flags, `true` meaning a letter goes in the cell.
    open_cells: Vec<bool>,

    slot_configs: SmallVec<[SlotConfig; MAX_SLOT_COUNT]>,

    /// For each slot, the crossing at each of its cells (if any).
    crossings: Vec<SmallVec<[Option<Crossing>; MAX_SLOT_LENGTH]>>,

    /// For each slot, every other slot it crosses, in ascending id order.
    neighbors: Vec<SmallVec<[SlotId; MAX_SLOT_LENGTH]>>,
}

impl Debug for GridConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridConfig")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("slot_configs", &self.slot_configs)
            .finish()
    }
}

impl GridConfig {
    /// Generate a GridConfig from explicit entries on a grid of the given size. Cells not covered
    /// by any entry are treated as blocked.
    pub fn from_entries(
        height: usize,
        width: usize,
        entries: &[GridEntry],
    ) -> Result<GridConfig, ParseError> {
        let mut open_cells = vec![false; height * width];
        let slot_configs: SmallVec<[SlotConfig; MAX_SLOT_COUNT]> = entries
            .iter()
            .map(|entry| SlotConfig {
                start_cell: entry.loc,
                direction: entry.dir,
                length: entry.len,
            })
            .collect();

        // Build a map from cell location to entries involved, which we can then use to calculate
        // crossings. Each value is a list of (slot id, cell index within slot).
        let mut entries_by_loc: HashMap<GridCoord, SmallVec<[(SlotId, usize); 2]>> =
            HashMap::new();

        for (slot_id, slot_config) in slot_configs.iter().enumerate() {
            for (cell_idx, (row, col)) in slot_config.cells().enumerate() {
                if row >= height || col >= width {
                    return Err(ParseError::EntryOutOfBounds { entry: slot_id, height, width });
                }
                open_cells[row * width + col] = true;

                let cell_entries = entries_by_loc.entry((row, col)).or_default();
                if cell_entries.len() == 2 {
                    return Err(ParseError::OvercrowdedCell { row, col });
                }
                cell_entries.push((slot_id, cell_idx));
            }
        }

        let mut crossings = Vec::with_capacity(slot_configs.len());
        let mut neighbors = Vec::with_capacity(slot_configs.len());

        for (slot_id, slot_config) in slot_configs.iter().enumerate() {
            let slot_crossings: SmallVec<[Option<Crossing>; MAX_SLOT_LENGTH]> = slot_config
                .cells()
                .map(|loc| {
                    entries_by_loc[&loc]
                        .iter()
                        .find(|&&(other_slot_id, _)| other_slot_id != slot_id)
                        .map(|&(other_slot_id, other_slot_cell)| Crossing {
                            other_slot_id,
                            other_slot_cell,
                        })
                })
                .collect();

            let mut slot_neighbors: SmallVec<[SlotId; MAX_SLOT_LENGTH]> = slot_crossings
                .iter()
                .flatten()
                .map(|crossing| crossing.other_slot_id)
                .collect();
            slot_neighbors.sort_unstable();
            slot_neighbors.dedup();

            crossings.push(slot_crossings);
            neighbors.push(slot_neighbors);
        }

        Ok(GridConfig {
            height,
            width,
            open_cells,
            slot_configs,
            crossings,
            neighbors,
        })
    }

    /// Generate a grid config from a string template, with `#` representing blocks and `_` or `.`
    /// representing open cells. Blank lines are skipped and surrounding whitespace is ignored.
    pub fn from_template_str(template: &str) -> Result<GridConfig, ParseError> {
        let rows: Vec<Vec<char>> = template
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();

        let width = rows.first().map(|row| row.len()).ok_or(ParseError::EmptyTemplate)?;
        let height = rows.len();

        let mut open_cells = Vec::with_capacity(height * width);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ParseError::RaggedRow {
                    row: row_idx,
                    expected: width,
                    found: row.len(),
                });
            }
            for (col_idx, &cell) in row.iter().enumerate() {
                open_cells.push(match cell {
                    '#' => false,
                    '_' | '.' => true,
                    found => {
                        return Err(ParseError::UnexpectedChar { row: row_idx, col: col_idx, found })
                    }
                });
            }
        }

        let is_open = |row: usize, col: usize| open_cells[row * width + col];
        let mut entries: Vec<GridEntry> = vec![];

        // Maximal runs of open cells, scanning each line along its direction.
        let mut push_runs = |line_count: usize, line_len: usize, dir: Direction| {
            for line in 0..line_count {
                let mut run_start: Option<usize> = None;
                for pos in 0..=line_len {
                    let open = pos < line_len && {
                        match dir {
                            Direction::Across => is_open(line, pos),
                            Direction::Down => is_open(pos, line),
                        }
                    };
                    match (open, run_start) {
                        (true, None) => run_start = Some(pos),
                        (false, Some(start)) => {
                            if pos - start > 1 {
                                let loc = match dir {
                                    Direction::Across => (line, start),
                                    Direction::Down => (start, line),
                                };
                                entries.push(GridEntry { loc, len: pos - start, dir });
                            }
                            run_start = None;
                        }
                        _ => {}
                    }
                }
            }
        };
        push_runs(height, width, Direction::Across);
        push_runs(width, height, Direction::Down);

        let mut config = GridConfig::from_entries(height, width, &entries)?;
        // Isolated open cells belong to no slot but still render as open.
        config.open_cells = open_cells;
        Ok(config)
    }

    /// Read a structure file and parse it with `from_template_str`.
    pub fn load(path: impl AsRef<Path>) -> Result<GridConfig, ParseError> {
        let contents = std::fs::read_to_string(path)?;
        GridConfig::from_template_str(&contents)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Is the given cell one that takes a letter? Out-of-range cells are blocked.
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.open_cells[row * self.width + col]
    }

    pub fn slot_count(&self) -> usize {
        self.slot_configs.len()
    }

    pub fn slots(&self) -> &[SlotConfig] {
        &self.slot_configs
    }

    pub fn slot(&self, slot_id: SlotId) -> &SlotConfig {
        &self.slot_configs[slot_id]
    }

    /// Look up a slot's id by its defining fields.
    pub fn slot_id(&self, slot: &SlotConfig) -> Option<SlotId> {
        self.slot_configs.iter().position(|candidate| candidate == slot)
    }

    pub fn crossings(&self, slot_id: SlotId) -> &[Option<Crossing>] {
        &self.crossings[slot_id]
    }

    /// Every slot sharing a cell with `slot_id`.
    pub fn neighbors(&self, slot_id: SlotId) -> &[SlotId] {
        &self.neighbors[slot_id]
    }

    /// The letter positions where `first` and `second` cross, or `None` if they don't.
    pub fn overlap(&self, first: SlotId, second: SlotId) -> Option<Overlap> {
        if first == second {
            return None;
        }
        self.crossings[first]
            .iter()
            .enumerate()
            .find_map(|(cell_idx, crossing)| match crossing {
                Some(crossing) if crossing.other_slot_id == second => Some(Overlap {
                    first: cell_idx,
                    second: crossing.other_slot_cell,
                }),
                _ => None,
            })
    }

    /// All ordered pairs of distinct slots, which is the starting worklist for a global AC-3 pass.
    pub fn all_arcs(&self) -> Vec<(SlotId, SlotId)> {
        let slot_count = self.slot_count();
        let mut arcs = Vec::with_capacity(slot_count * slot_count.saturating_sub(1));
        for first in 0..slot_count {
            for second in 0..slot_count {
                if first != second {
                    arcs.push((first, second));
                }
            }
        }
        arcs
    }
}

/// Generate a GridConfig representing an open square grid, which has `size` across and `size`
/// down slots that all cross each other.
pub fn generate_square_grid_config(size: usize) -> Result<GridConfig, ParseError> {
    let entries: Vec<GridEntry> = (0..size)
        .map(|idx| GridEntry { loc: (idx, 0), len: size, dir: Direction::Across })
        .chain((0..size).map(|idx| GridEntry { loc: (0, idx), len: size, dir: Direction::Down }))
        .collect();

    GridConfig::from_entries(size, size, &entries)
}
