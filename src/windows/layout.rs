use serde::{Deserialize, Serialize};

use crate::model::DocumentId;

/// Area available to document windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub document: DocumentId,
    pub rect: Rect,
}

fn split(total: u32, parts: usize, index: usize) -> (u32, u32) {
    let total = u64::from(total);
    let (parts, index) = (parts as u64, index as u64);
    let start = index * total / parts;
    let end = (index + 1) * total / parts;
    (start as u32, (end - start) as u32)
}

/// Grid layout with `ceil(sqrt(n))` columns.
///
/// The last row may hold fewer windows and is stretched over the full width.
/// Boundaries are integer splits of the canvas, so the placements partition it.
/// A canvas narrower than the column count (or shorter than the row count)
/// leaves some placements with zero area; they still never overlap.
pub fn tile(documents: &[DocumentId], canvas: Canvas) -> Vec<Placement> {
    let count = documents.len();
    if count == 0 {
        return Vec::new();
    }
    let columns = (1..=count).find(|c| c * c >= count).unwrap_or(count);
    let rows = count.div_ceil(columns);

    documents
        .iter()
        .enumerate()
        .map(|(index, document)| {
            let row = index / columns;
            let in_row = if row + 1 == rows {
                count - columns * (rows - 1)
            } else {
                columns
            };
            let (y, height) = split(canvas.height, rows, row);
            let (x, width) = split(canvas.width, in_row, index % columns);
            Placement {
                document: *document,
                rect: Rect {
                    x,
                    y,
                    width,
                    height,
                },
            }
        })
        .collect()
}

/// Overlapping layout; each window is offset by `step` from the previous one.
///
/// Offsets wrap back to the origin once a window would leave the canvas.
pub fn cascade(documents: &[DocumentId], canvas: Canvas, step: u32) -> Vec<Placement> {
    let count = documents.len() as u32;
    if count == 0 {
        return Vec::new();
    }
    let step = step.max(1);
    let spread = step.saturating_mul(count - 1);
    let width = canvas.width.saturating_sub(spread).max(canvas.width / 2).max(1);
    let height = canvas.height.saturating_sub(spread).max(canvas.height / 2).max(1);
    let slots = ((canvas.width - width.min(canvas.width)) / step)
        .min((canvas.height - height.min(canvas.height)) / step)
        + 1;

    documents
        .iter()
        .enumerate()
        .map(|(index, document)| {
            let offset = (index as u32 % slots) * step;
            Placement {
                document: *document,
                rect: Rect {
                    x: offset,
                    y: offset,
                    width,
                    height,
                },
            }
        })
        .collect()
}
