//! Strip layout: which strip index sits under which canvas cell.
//!
//! The layout asset is a CSV grid with one row per canvas row. Each cell holds
//! the position of that LED along the strip, so wiring order (serpentine,
//! panels chained in any direction) never leaks into the canvas.

use std::path::Path;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    columns: u16,
    rows: u16,
    /// Strip index per canvas cell, row-major
    indices: Vec<usize>,
}

impl Layout {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read strip layout {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("malformed strip layout {}", path.display()))
    }

    /// Parse and validate a layout grid.
    ///
    /// Rows must be equally wide and every index must be below the LED count
    /// and used exactly once.
    pub fn parse(source: &str) -> Result<Self> {
        let rows: Vec<Vec<&str>> = source
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split(',').map(str::trim).collect())
            .collect();

        let Some(first) = rows.first() else {
            bail!("strip layout is empty");
        };
        let columns = first.len();
        if let Some(n) = rows.iter().position(|row| row.len() != columns) {
            bail!(
                "layout row {} has {} cells, expected {}",
                n + 1,
                rows[n].len(),
                columns
            );
        }

        let count = columns * rows.len();
        let mut seen = vec![false; count];
        let mut indices = Vec::with_capacity(count);
        for (n, row) in rows.iter().enumerate() {
            for (column, cell) in row.iter().enumerate() {
                let index: usize = cell.parse().with_context(|| {
                    format!("layout cell ({}, {}) is not an index: {:?}", column, n, cell)
                })?;
                if index >= count {
                    bail!(
                        "layout cell ({}, {}) index {} is past the last LED ({})",
                        column,
                        n,
                        index,
                        count - 1
                    );
                }
                if std::mem::replace(&mut seen[index], true) {
                    bail!("layout index {} appears more than once", index);
                }
                indices.push(index);
            }
        }

        let (Ok(columns), Ok(rows)) = (u16::try_from(columns), u16::try_from(rows.len())) else {
            bail!("strip layout is too large");
        };
        Ok(Self {
            columns,
            rows,
            indices,
        })
    }

    /// Plain serpentine wiring: even rows run left to right, odd rows back.
    pub fn serpentine(columns: u16, rows: u16) -> Self {
        let width = columns as usize;
        let mut indices = Vec::with_capacity(width * rows as usize);
        for row in 0..rows as usize {
            for column in 0..width {
                let along = if row % 2 == 0 { column } else { width - 1 - column };
                indices.push(row * width + along);
            }
        }
        Self {
            columns,
            rows,
            indices,
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn led_count(&self) -> usize {
        self.indices.len()
    }

    /// Strip index of (column, row)
    pub fn index(&self, column: u16, row: u16) -> Option<usize> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(self.indices[row as usize * self.columns as usize + column as usize])
    }
}
