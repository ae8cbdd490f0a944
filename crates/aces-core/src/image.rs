//! Frame and batch tensors.
//!
//! A host hands images over as a float tensor shaped `[N, H, W, C]` (a
//! batch of frames, e.g. a video) or `[H, W, C]` (a single image). Values
//! are interleaved row-major, top row first.
//!
//! ```rust
//! use aces_core::ImageBatch;
//!
//! let batch = ImageBatch::from_tensor(&[2, 1, 2, 3], vec![0.5; 12]).unwrap();
//! assert_eq!(batch.len(), 2);
//! let frame = batch.frame(1).unwrap();
//! assert_eq!((frame.width(), frame.height()), (2, 1));
//! ```

use rayon::prelude::*;

use crate::{Error, Result};

/// A single RGB or RGBA frame of f32 samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<f32>,
}

impl Frame {
    /// Creates a frame from interleaved samples.
    ///
    /// # Errors
    ///
    /// Fails on zero dimensions, a channel count other than 3 or 4, or a
    /// buffer whose length does not equal `width * height * channels`.
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
        validate_dims(width, height)?;
        if channels != 3 && channels != 4 {
            return Err(Error::unsupported_channels(channels));
        }
        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Creates a frame filled with a constant RGB(A) value.
    pub fn filled(width: usize, height: usize, pixel: &[f32]) -> Result<Self> {
        validate_dims(width, height)?;
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(sample_count(width, height, pixel.len())?)
            .collect();
        Self::new(width, height, pixel.len(), data)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channels per pixel (3 or 4).
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Whether the frame carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Interleaved samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Samples of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[f32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * self.channels;
        self.data.get(start..start + self.channels)
    }

    /// Mutable rows, for parallel per-pixel work.
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, f32> {
        let row_len = self.width * self.channels;
        self.data.par_chunks_mut(row_len)
    }

    /// Values of one channel, in pixel order.
    pub fn channel(&self, index: usize) -> Vec<f32> {
        self.data
            .iter()
            .skip(index)
            .step_by(self.channels)
            .copied()
            .collect()
    }

    /// Clamps negative samples to zero. Values above 1.0 are kept.
    pub fn clip_negative(&mut self) {
        self.data.par_iter_mut().for_each(|v| {
            if *v < 0.0 || v.is_nan() {
                *v = 0.0;
            }
        });
    }

    /// Minimum and maximum over all samples.
    pub fn range(&self) -> (f32, f32) {
        self.data
            .par_iter()
            .fold(
                || (f32::INFINITY, f32::NEG_INFINITY),
                |(lo, hi), &v| (lo.min(v), hi.max(v)),
            )
            .reduce(
                || (f32::INFINITY, f32::NEG_INFINITY),
                |a, b| (a.0.min(b.0), a.1.max(b.1)),
            )
    }
}

/// A batch of equally sized frames, as supplied by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBatch {
    len: usize,
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<f32>,
}

impl ImageBatch {
    /// Builds a batch from a host tensor.
    ///
    /// `shape` is `[N, H, W, C]` or `[H, W, C]`; a rank-3 tensor is a batch
    /// of one. `N` may be zero.
    pub fn from_tensor(shape: &[usize], data: Vec<f32>) -> Result<Self> {
        let (len, height, width, channels) = match *shape {
            [n, h, w, c] => (n, h, w, c),
            [h, w, c] => (1, h, w, c),
            _ => {
                return Err(Error::InvalidShape {
                    shape: shape.to_vec(),
                })
            }
        };
        validate_dims(width, height)?;
        if channels != 3 && channels != 4 {
            return Err(Error::unsupported_channels(channels));
        }
        let expected = sample_count(width, height, channels)?
            .checked_mul(len)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "batch size overflow"))?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            len,
            height,
            width,
            channels,
            data,
        })
    }

    /// Builds a batch from frames of identical size and channel count.
    pub fn from_frames(frames: Vec<Frame>) -> Result<Self> {
        let Some(first) = frames.first() else {
            return Err(Error::other("cannot build a batch from zero frames"));
        };
        let (width, height, channels) = (first.width, first.height, first.channels);
        let mut data = Vec::with_capacity(frames.len() * first.data.len());
        for frame in &frames {
            if frame.width != width || frame.height != height {
                return Err(Error::invalid_dimensions(
                    frame.width,
                    frame.height,
                    format!("expected {width}x{height} like the first frame"),
                ));
            }
            if frame.channels != channels {
                return Err(Error::unsupported_channels(frame.channels));
            }
            data.extend_from_slice(&frame.data);
        }
        Ok(Self {
            len: frames.len(),
            height,
            width,
            channels,
            data,
        })
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the batch holds no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tensor shape `[N, H, W, C]`.
    pub fn shape(&self) -> [usize; 4] {
        [self.len, self.height, self.width, self.channels]
    }

    /// Copies frame `index` out of the batch.
    pub fn frame(&self, index: usize) -> Result<Frame> {
        if index >= self.len {
            return Err(Error::FrameOutOfRange {
                index,
                len: self.len,
            });
        }
        let stride = self.width * self.height * self.channels;
        let start = index * stride;
        Frame::new(
            self.width,
            self.height,
            self.channels,
            self.data[start..start + stride].to_vec(),
        )
    }

    /// Iterates over all frames in order.
    pub fn frames(&self) -> impl Iterator<Item = Result<Frame>> + '_ {
        (0..self.len).map(|i| self.frame(i))
    }
}

fn validate_dims(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "zero size"));
    }
    Ok(())
}

fn sample_count(width: usize, height: usize, channels: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|p| p.checked_mul(channels))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflow"))
}
