use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::{Array3, ArrayView1, ArrayView3, s};
use serde::Serialize;

use super::{ChannelKind, CoreError, Extent, Region, Result, SUPPORTED_CHANNEL_COUNTS, channel_layout};

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BufferId(u64);

impl BufferId {
    fn next() -> Self {
        Self(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Immutable 8-bit image stored as `[y, x, channel]`.
///
/// Buffers are never mutated after construction; every derived image is a new
/// buffer with a new [`BufferId`].
#[derive(Debug)]
pub struct PixelBuffer {
    id: BufferId,
    data: Array3<u8>,
}

impl PixelBuffer {
    pub fn new(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        Extent::new(width, height)?;
        if !SUPPORTED_CHANNEL_COUNTS.contains(&channels) {
            return Err(CoreError::InvalidBuffer(format!(
                "unsupported channel count {channels}, expected one of {SUPPORTED_CHANNEL_COUNTS:?}"
            )));
        }
        Ok(Self {
            id: BufferId::next(),
            data,
        })
    }

    /// Builds a buffer from interleaved row-major samples.
    pub fn from_raw(width: usize, height: usize, channels: usize, samples: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(channels))
            .ok_or_else(|| {
                CoreError::InvalidBuffer(format!("{width}x{height}x{channels} overflows"))
            })?;
        if samples.len() != expected {
            return Err(CoreError::InvalidBuffer(format!(
                "expected {expected} samples for {width}x{height}x{channels}, found {}",
                samples.len()
            )));
        }
        let data = Array3::from_shape_vec((height, width, channels), samples)
            .map_err(|error| CoreError::InvalidBuffer(error.to_string()))?;
        Self::new(data)
    }

    pub fn from_fn(
        width: usize,
        height: usize,
        channels: usize,
        sample: impl Fn(usize, usize, usize) -> u8,
    ) -> Result<Self> {
        let data = Array3::from_shape_fn((height, width, channels), |(y, x, c)| sample(x, y, c));
        Self::new(data)
    }

    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Result<Self> {
        Self::new(Array3::from_elem((height, width, channels), value))
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn extent(&self) -> Extent {
        let (height, width, _) = self.data.dim();
        Extent::new(width, height).expect("validated at construction")
    }

    pub fn full_region(&self) -> Region {
        Region::full(self.extent())
    }

    pub fn layout(&self) -> &'static [ChannelKind] {
        channel_layout(self.channels()).expect("validated at construction")
    }

    pub fn has_alpha(&self) -> bool {
        self.channels() == 4
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    pub fn sample(&self, x: usize, y: usize, channel: usize) -> Option<u8> {
        self.data.get((y, x, channel)).copied()
    }

    /// All channel samples of one pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<ArrayView1<'_, u8>> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.data.slice(s![y, x, ..]))
    }

    pub fn view(&self, region: &Region) -> Result<ArrayView3<'_, u8>> {
        self.check_region(region)?;
        Ok(self.data.slice(s![region.rows(), region.columns(), ..]))
    }

    /// Copies the samples inside `region` into a new standalone buffer.
    pub fn crop(&self, region: &Region) -> Result<PixelBuffer> {
        let view = self.view(region)?;
        Self::new(view.to_owned())
    }

    pub fn to_raw(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    pub fn content_eq(&self, other: &PixelBuffer) -> bool {
        self.data == other.data
    }

    pub(crate) fn check_region(&self, region: &Region) -> Result<()> {
        if region.fits(self.extent()) {
            return Ok(());
        }
        Err(CoreError::invalid_region(
            region.x() as i64,
            region.y() as i64,
            region.width() as i64,
            region.height() as i64,
            "region exceeds buffer bounds",
        ))
    }
}
