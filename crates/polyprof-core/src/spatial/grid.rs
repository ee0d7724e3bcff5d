//! Regular super-grid over the profile domain
//!
//! Each cell lists the bins whose bounding box overlaps it, so a fill only
//! runs the containment test against a handful of candidates. Cells store
//! positions into the profile's bin vector and never own the bins.

use super::bbox::BoundingBox;

#[derive(Debug, Clone)]
pub struct CellGrid {
    x_min: f64,
    y_min: f64,
    step_x: f64,
    step_y: f64,
    cells_x: usize,
    cells_y: usize,
    cells: Vec<Vec<usize>>,
}

impl CellGrid {
    /// Create an empty grid of `cells_x × cells_y` cells spanning `domain`.
    ///
    /// Both cell counts must be non-zero.
    pub fn new(domain: &BoundingBox, cells_x: usize, cells_y: usize) -> Self {
        Self {
            x_min: domain.x_min,
            y_min: domain.y_min,
            step_x: (domain.x_max - domain.x_min) / cells_x as f64,
            step_y: (domain.y_max - domain.y_min) / cells_y as f64,
            cells_x,
            cells_y,
            cells: vec![Vec::new(); cells_x * cells_y],
        }
    }

    pub fn cells_x(&self) -> usize {
        self.cells_x
    }

    pub fn cells_y(&self) -> usize {
        self.cells_y
    }

    /// Cell containing a point, clamped to the grid edge.
    pub fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        (
            clamp_cell((x - self.x_min) / self.step_x, self.cells_x),
            clamp_cell((y - self.y_min) / self.step_y, self.cells_y),
        )
    }

    /// Register a bin in every cell its bounding box overlaps
    pub fn insert(&mut self, position: usize, bbox: &BoundingBox) {
        if bbox.is_empty() {
            return;
        }
        let (n_lo, m_lo) = self.cell_of(bbox.x_min, bbox.y_min);
        let (n_hi, m_hi) = self.cell_of(bbox.x_max, bbox.y_max);

        for m in m_lo..=m_hi {
            for n in n_lo..=n_hi {
                self.cells[n + self.cells_x * m].push(position);
            }
        }
    }

    /// Bins registered in the cell containing the point
    pub fn candidates(&self, x: f64, y: f64) -> &[usize] {
        let (n, m) = self.cell_of(x, y);
        &self.cells[n + self.cells_x * m]
    }

    /// Number of (cell, bin) registrations
    pub fn registrations(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}

// Float to usize casts saturate: negatives and NaN land on 0.
fn clamp_cell(offset: f64, cells: usize) -> usize {
    (offset.floor() as usize).min(cells - 1)
}
