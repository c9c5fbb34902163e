use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Decodes a looping video to raw RGBA frames through an `ffmpeg` child
/// process. Frames are read on a worker thread and handed over through a
/// bounded channel, so a slow render loop simply drops stale frames.
pub struct VideoDecoder {
    process: Child,
    frames: Option<Receiver<Vec<u8>>>,
    reader: Option<JoinHandle<()>>,
    finished: bool,
    width: i32,
    height: i32,
}

impl VideoDecoder {
    pub fn spawn(ffmpeg: &str, video: &Path, width: i32, height: i32) -> Result<VideoDecoder> {
        if !video.is_file() {
            anyhow::bail!("video {} not found", video.display());
        }

        let scale = format!(
            "scale={width}:{height}:force_original_aspect_ratio=increase,crop={width}:{height}"
        );
        let mut process = Command::new(ffmpeg)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .args(["-loglevel", "error"])
            .arg("-re")
            .args(["-stream_loop", "-1"])
            .arg("-i")
            .arg(video)
            .arg("-an")
            .args(["-vf", &scale])
            .args(["-f", "rawvideo"])
            .args(["-pix_fmt", "rgba"])
            .arg("-")
            .spawn()
            .with_context(|| format!("failed to start {ffmpeg}"))?;

        let mut stdout = process
            .stdout
            .take()
            .context("ffmpeg stdout was not captured")?;

        let frame_len = frame_len(width, height);
        let (tx, frames) = mpsc::sync_channel(2);
        let reader = std::thread::Builder::new()
            .name("video-frames".into())
            .spawn(move || {
                loop {
                    let mut frame = vec![0u8; frame_len];
                    match stdout.read_exact(&mut frame) {
                        Ok(()) => {
                            if tx.send(frame).is_err() {
                                break;
                            }
                        }
                        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                            debug!("video stream ended");
                            break;
                        }
                        Err(e) => {
                            warn!(error = %e, "video stream read failed");
                            break;
                        }
                    }
                }
            })
            .context("failed to start video reader thread")?;

        info!(video = %video.display(), width, height, "decoding background video");
        Ok(VideoDecoder {
            process,
            frames: Some(frames),
            reader: Some(reader),
            finished: false,
            width,
            height,
        })
    }

    /// Newest decoded frame since the last call, if any.
    pub fn latest_frame(&mut self) -> Option<Vec<u8>> {
        let frames = self.frames.as_ref()?;
        let mut latest = None;
        loop {
            match frames.try_recv() {
                Ok(frame) => latest = Some(frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.finished {
                        warn!("background video stopped, keeping the fallback");
                        self.finished = true;
                    }
                    break;
                }
            }
        }
        latest
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

impl Drop for VideoDecoder {
    fn drop(&mut self) {
        // Killing ffmpeg closes the pipe, which ends the reader thread
        if let Err(e) = self.process.kill() {
            debug!(error = %e, "ffmpeg already exited");
        }
        if let Err(e) = self.process.wait() {
            warn!(error = %e, "failed to wait for ffmpeg process");
        }
        // Unblocks a reader waiting on a full channel
        drop(self.frames.take());
        if let Some(reader) = self.reader.take() {
            if reader.join().is_err() {
                warn!("video reader thread panicked");
            }
        }
    }
}

/// Bytes in one RGBA frame.
pub fn frame_len(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize * 4
}
