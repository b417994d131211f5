//! Pixel buffers and letterbox preprocessing.
//!
//! `PixelBuffer` is a borrowed 2D view into a byte buffer with an explicit
//! row stride in bytes, so buffers with padded rows (as handed out by most
//! platform bitmap APIs) can be read without copying. Only `Rgba8888` input
//! is accepted by the preprocessing step; other formats are rejected before
//! any work is done.

use crate::util::{YoloPostError, YoloPostResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod preprocess;
pub(crate) mod resize;

pub use preprocess::{letterbox_tensor, NORM_SCALE};

/// Channel layout of a pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit red, green, blue, alpha.
    Rgba8888,
    /// 8-bit red, green, blue.
    Rgb888,
    /// Packed 5-6-5 RGB.
    Rgb565,
    /// 8-bit alpha mask.
    Alpha8,
}

impl PixelFormat {
    /// The only layout the preprocessing step consumes.
    pub const SUPPORTED: PixelFormat = PixelFormat::Rgba8888;

    /// Bytes occupied by one pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8888 => 4,
            PixelFormat::Rgb888 => 3,
            PixelFormat::Rgb565 => 2,
            PixelFormat::Alpha8 => 1,
        }
    }

    /// Fails with `UnsupportedPixelFormat` unless this is [`Self::SUPPORTED`].
    pub fn ensure_supported(self) -> YoloPostResult<()> {
        if self == Self::SUPPORTED {
            Ok(())
        } else {
            Err(YoloPostError::UnsupportedPixelFormat { format: self })
        }
    }
}

/// Borrowed pixel view with an explicit row stride in bytes.
#[derive(Copy, Clone, Debug)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> PixelBuffer<'a> {
    /// Creates a view over tightly packed rows.
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> YoloPostResult<Self> {
        let stride = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or(YoloPostError::InvalidDimensions { width, height })?;
        Self::new(data, width, height, stride, format)
    }

    /// Creates a view with an explicit row stride in bytes.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> YoloPostResult<Self> {
        let needed = required_len(width, height, stride, format)?;
        if data.len() < needed {
            return Err(YoloPostError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the bytes of row `y` without trailing padding.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.format.bytes_per_pixel())?;
        self.data.get(start..end)
    }

    /// Returns the bytes of pixel `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [u8]> {
        if x >= self.width {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let row = self.row(y)?;
        row.get(x * bpp..(x + 1) * bpp)
    }
}

/// Owned, tightly packed pixel storage.
#[derive(Clone, Debug)]
pub struct OwnedPixels {
    data: Vec<u8>,
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl OwnedPixels {
    /// Wraps a tightly packed buffer; the length must match exactly.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> YoloPostResult<Self> {
        let stride = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or(YoloPostError::InvalidDimensions { width, height })?;
        let needed = required_len(width, height, stride, format)?;
        if data.len() < needed {
            return Err(YoloPostError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(YoloPostError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the pixels.
    pub fn view(&self) -> PixelBuffer<'_> {
        PixelBuffer {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width * self.format.bytes_per_pixel(),
            format: self.format,
        }
    }
}

fn required_len(
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
) -> YoloPostResult<usize> {
    if width == 0 || height == 0 {
        return Err(YoloPostError::InvalidDimensions { width, height });
    }
    let row_bytes = width
        .checked_mul(format.bytes_per_pixel())
        .ok_or(YoloPostError::InvalidDimensions { width, height })?;
    if stride < row_bytes {
        return Err(YoloPostError::InvalidStride { row_bytes, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or(YoloPostError::InvalidDimensions { width, height })
}
