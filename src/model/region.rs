use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CoreError, Result};

/// Width and height of a buffer. Both are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Extent {
    width: usize,
    height: usize,
}

impl Extent {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidBuffer(format!(
                "extent {width}x{height} has a zero dimension"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Signed rectangle as requested by an interactive drag or a spin box.
///
/// It may straddle or even lie outside the buffer; [`Region::clamped`] turns it
/// into a valid [`Region`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl SelectionRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl FromStr for SelectionRect {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        let parts = raw
            .split(',')
            .map(|part| part.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|error| format!("invalid rectangle `{raw}`: {error}"))?;
        match parts.as_slice() {
            [x, y, width, height] => Ok(Self::new(*x, *y, *width, *height)),
            _ => Err(format!("expected `x,y,width,height`, found `{raw}`")),
        }
    }
}

/// Axis-aligned rectangle guaranteed to lie inside the extent it was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl Region {
    /// Strict constructor: anything empty or outside `bounds` is rejected.
    pub fn new(x: usize, y: usize, width: usize, height: usize, bounds: Extent) -> Result<Self> {
        let reject = |reason| {
            CoreError::invalid_region(x as i64, y as i64, width as i64, height as i64, reason)
        };
        if width == 0 || height == 0 {
            return Err(reject("width and height must be at least 1"));
        }
        let right = x.checked_add(width).ok_or_else(|| reject("overflow"))?;
        let bottom = y.checked_add(height).ok_or_else(|| reject("overflow"))?;
        if right > bounds.width || bottom > bounds.height {
            return Err(reject("region exceeds buffer bounds"));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn full(bounds: Extent) -> Self {
        Self {
            x: 0,
            y: 0,
            width: bounds.width,
            height: bounds.height,
        }
    }

    /// Intersects `rect` with `bounds`.
    ///
    /// Non-positive extents are rejected before clamping. A rectangle lying
    /// entirely outside the bounds is rejected too, since its intersection is
    /// empty.
    pub fn clamped(rect: SelectionRect, bounds: Extent) -> Result<Self> {
        let reject =
            |reason| CoreError::invalid_region(rect.x, rect.y, rect.width, rect.height, reason);
        if rect.width <= 0 || rect.height <= 0 {
            return Err(reject("width and height must be at least 1"));
        }
        let left = rect.x.max(0);
        let top = rect.y.max(0);
        let right = rect.x.saturating_add(rect.width).min(bounds.width as i64);
        let bottom = rect.y.saturating_add(rect.height).min(bounds.height as i64);
        if right <= left || bottom <= top {
            return Err(reject("region lies outside the buffer"));
        }
        Ok(Self {
            x: left as usize,
            y: top as usize,
            width: (right - left) as usize,
            height: (bottom - top) as usize,
        })
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn rows(&self) -> Range<usize> {
        self.y..self.y + self.height
    }

    pub fn columns(&self) -> Range<usize> {
        self.x..self.x + self.width
    }

    pub fn fits(&self, bounds: Extent) -> bool {
        self.x + self.width <= bounds.width && self.y + self.height <= bounds.height
    }

    pub fn extent(&self) -> Extent {
        Extent {
            width: self.width,
            height: self.height,
        }
    }
}
