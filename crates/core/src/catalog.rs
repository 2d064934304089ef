//! Sprite catalog - parses the tabular sprite asset
//!
//! The asset is a comma-separated grid of single-letter color codes (see
//! [`Color::from_letter`]). Blank rows separate sprite kinds; inside a kind,
//! columns that are empty in every row separate animation frames:
//!
//! ```text
//! R,,Y,Y      <- kind 0: frame 0 is "R", frame 1 is "YY/YY"
//! R,,Y,Y
//!
//! W           <- kind 1: a single white cell
//! ```
//!
//! Loading is all-or-nothing: any malformed group fails the whole catalog.

use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::definition::{SpriteDefinition, SpriteFrame};
use crate::sprite::Sprite;
use crate::types::Color;

/// The immutable set of sprite definitions, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: Vec<Arc<SpriteDefinition>>,
}

impl Catalog {
    /// Load and parse an asset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read sprite catalog {}", path.display()))?;
        let catalog = Self::parse(&source)
            .with_context(|| format!("malformed sprite catalog {}", path.display()))?;
        log::info!(
            "loaded {} sprite definitions from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse asset text.
    pub fn parse(source: &str) -> Result<Self> {
        let mut definitions = Vec::new();
        let mut group: Vec<Vec<&str>> = Vec::new();
        let mut group_line = 0;

        for (n, line) in source.lines().enumerate() {
            let cells = split_row(line);
            if row_width(&cells) == 0 {
                if !group.is_empty() {
                    definitions.push(Arc::new(parse_group(&group, group_line)?));
                    group.clear();
                }
                continue;
            }
            if group.is_empty() {
                group_line = n + 1;
            }
            group.push(cells);
        }
        if !group.is_empty() {
            definitions.push(Arc::new(parse_group(&group, group_line)?));
        }

        if definitions.is_empty() {
            bail!("sprite catalog contains no sprites");
        }

        Ok(Self { definitions })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Shared definition by id, `None` if unknown
    pub fn definition(&self, id: impl Into<usize>) -> Option<&Arc<SpriteDefinition>> {
        self.definitions.get(id.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SpriteDefinition>> {
        self.definitions.iter()
    }

    /// Fresh, undrawn sprite of kind `id`.
    ///
    /// Panics if `id` is not in the catalog: asking for a sprite kind the
    /// asset does not have is a bug in the caller.
    pub fn get(&self, id: impl Into<usize>) -> Sprite {
        let id = id.into();
        match self.definitions.get(id) {
            Some(definition) => Sprite::new(Arc::clone(definition)),
            None => panic!(
                "unknown sprite id {} (catalog has {} definitions)",
                id,
                self.definitions.len()
            ),
        }
    }
}

fn split_row(line: &str) -> Vec<&str> {
    line.trim_end_matches('\r').split(',').map(str::trim).collect()
}

/// 1 + index of the last non-empty cell, 0 for a blank row
fn row_width(cells: &[&str]) -> usize {
    cells
        .iter()
        .rposition(|c| !c.is_empty())
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// Cell text, empty past the end of a short row
fn cell<'a>(row: &[&'a str], column: usize) -> &'a str {
    row.get(column).copied().unwrap_or("")
}

/// Turn one row-group into a definition.
///
/// `line` is the 1-based line of the group's first row, for error messages.
fn parse_group(rows: &[Vec<&str>], line: usize) -> Result<SpriteDefinition> {
    let width = rows.iter().map(|r| row_width(r)).max().unwrap_or(0);
    if width == 0 {
        bail!("sprite at line {} has no usable width", line);
    }

    let column_empty = |column: usize| rows.iter().all(|r| cell(r, column).is_empty());

    let mut frames = Vec::new();
    let mut start = 0;
    for column in 0..=width {
        if column == width || column_empty(column) {
            frames.push(parse_frame(rows, start..column, line)?);
            start = column + 1;
        }
    }

    Ok(SpriteDefinition::new(frames))
}

fn parse_frame(rows: &[Vec<&str>], span: Range<usize>, line: usize) -> Result<SpriteFrame> {
    let mut frame_rows = Vec::new();

    for (n, row) in rows.iter().enumerate() {
        let cells: Vec<&str> = span.clone().map(|c| cell(row, c)).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }

        let colors = cells
            .iter()
            .enumerate()
            .map(|(offset, text)| {
                let color = Color::from_letter(text);
                if !text.is_empty() && !color.is_lit() {
                    log::warn!(
                        "unknown color {:?} at line {}, column {}; treating as off",
                        text,
                        line + n,
                        span.start + offset + 1
                    );
                }
                color
            })
            .collect();
        frame_rows.push(colors);
    }

    if frame_rows.is_empty() {
        bail!(
            "sprite at line {} has an empty frame at columns {}..{}",
            line,
            span.start + 1,
            span.end + 1
        );
    }

    Ok(SpriteFrame::from_rows(frame_rows))
}
