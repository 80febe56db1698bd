//! Video sink for rendered frames.
use anyhow::Result;

/// An owned RGB24 frame, row-major.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,

    /// Pixel data, `3 * width * height` bytes.
    pub data: Vec<u8>,
}

impl Frame {
    /// Constructs a frame from raw RGB24 data.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }
}

/// Consumes rendered frames, one stream per evaluation episode.
///
/// Encoding is the sink's concern; the evaluation loop only forwards
/// frames in display order.
pub trait FrameSink {
    /// Opens the stream of the episode with the given index.
    fn begin_episode(&mut self, ix: usize) -> Result<()>;

    /// Appends a frame to the open episode.
    fn push(&mut self, frame: Frame) -> Result<()>;

    /// Finalizes the open episode.
    fn end_episode(&mut self) -> Result<()>;
}

/// A sink that discards all frames.
pub struct NullSink;

impl FrameSink for NullSink {
    fn begin_episode(&mut self, _ix: usize) -> Result<()> {
        Ok(())
    }

    fn push(&mut self, _frame: Frame) -> Result<()> {
        Ok(())
    }

    fn end_episode(&mut self) -> Result<()> {
        Ok(())
    }
}
