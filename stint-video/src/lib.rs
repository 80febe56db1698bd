#![warn(missing_docs)]
//! Video sinks for evaluation episodes.
//!
//! [`GifSink`] encodes the rendered frames of each evaluation episode into
//! one animated GIF per episode, named `eval-episode-{ix}.gif`.
use anyhow::{anyhow, Result};
use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, RgbaImage,
};
use log::info;
use std::{
    fs::{self, File},
    path::PathBuf,
};
use stint_core::{Frame, FrameSink};

// 50 fps, the render cadence of the classic-control environments.
const FRAME_DELAY_MS: u32 = 20;

/// Writes one GIF file per evaluation episode into a folder.
///
/// The folder is created lazily on the first episode, so a run with zero
/// evaluation episodes leaves nothing behind.
pub struct GifSink {
    dir: PathBuf,
    encoder: Option<GifEncoder<File>>,
}

impl GifSink {
    /// Constructs a sink writing into the given folder.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            encoder: None,
        }
    }
}

impl FrameSink for GifSink {
    fn begin_episode(&mut self, ix: usize) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("eval-episode-{}.gif", ix));
        let file = File::create(&path)?;
        let mut encoder = GifEncoder::new(file);
        encoder.set_repeat(Repeat::Infinite)?;
        self.encoder = Some(encoder);
        info!("Recording episode {} to {:?}", ix, path);
        Ok(())
    }

    fn push(&mut self, frame: Frame) -> Result<()> {
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| anyhow!("no episode is open"))?;
        let rgba = rgb_to_rgba(&frame);
        let buffer = RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| anyhow!("frame buffer does not match its dimensions"))?;
        let delay = Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1);
        encoder.encode_frame(image::Frame::from_parts(buffer, 0, 0, delay))?;
        Ok(())
    }

    fn end_episode(&mut self) -> Result<()> {
        // Dropping the encoder flushes and closes the file.
        self.encoder = None;
        Ok(())
    }
}

fn rgb_to_rgba(frame: &Frame) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(frame.data.len() / 3 * 4);
    for px in frame.data.chunks(3) {
        rgba.extend_from_slice(px);
        rgba.push(0xff);
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::GifSink;
    use anyhow::Result;
    use stint_core::{Frame, FrameSink};
    use tempdir::TempDir;

    fn frame() -> Frame {
        Frame::new(4, 2, vec![0x7f; 4 * 2 * 3])
    }

    #[test]
    fn writes_one_file_per_episode() -> Result<()> {
        let tmp = TempDir::new("stint_video")?;
        let dir = tmp.path().join("video");
        let mut sink = GifSink::new(&dir);

        for ix in 0..2 {
            sink.begin_episode(ix)?;
            sink.push(frame())?;
            sink.push(frame())?;
            sink.end_episode()?;
        }

        assert!(dir.join("eval-episode-0.gif").is_file());
        assert!(dir.join("eval-episode-1.gif").is_file());
        Ok(())
    }

    #[test]
    fn no_episodes_leave_no_folder() -> Result<()> {
        let tmp = TempDir::new("stint_video")?;
        let dir = tmp.path().join("video");
        let _sink = GifSink::new(&dir);
        assert!(!dir.exists());
        Ok(())
    }

    #[test]
    fn push_without_open_episode_fails() {
        let mut sink = GifSink::new("unused");
        assert!(sink.push(frame()).is_err());
    }
}
