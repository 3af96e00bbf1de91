//! Best-effort front camera snapshot.
//!
//! Waits until the picture stops moving (or a deadline passes), grabs one
//! full frame and encodes it as a JPEG data URL. Any failure just means "no
//! photo"; the camera is released on every path, including cancellation.

use std::fmt;
use std::ops::{Deref, DerefMut};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::codecs::jpeg::JpegEncoder;
use tokio::time::{Duration, Instant, sleep};

pub const TARGET_WIDTH: u32 = 640;
pub const TARGET_HEIGHT: u32 = 480;
pub const PROBE_WIDTH: u32 = 96;
pub const PROBE_HEIGHT: u32 = 72;
pub const PROBE_INTERVAL: Duration = Duration::from_millis(110);
pub const MAX_WAIT: Duration = Duration::from_millis(4_500);
pub const STABLE_WINDOW: Duration = Duration::from_millis(650);
pub const MOTION_THRESHOLD: f64 = 6.2;
pub const SAMPLE_STRIDE: usize = 16;
pub const JPEG_QUALITY: u8 = 72;

/// Raw RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    PermissionDenied,
    Unavailable,
    Frame(String),
    Encode(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "camera permission denied"),
            CameraError::Unavailable => write!(f, "no camera available"),
            CameraError::Frame(e) => write!(f, "frame grab failed: {e}"),
            CameraError::Encode(e) => write!(f, "encoding failed: {e}"),
        }
    }
}

impl std::error::Error for CameraError {}

/// A front-facing video source.
#[async_trait]
pub trait Camera: Send {
    /// Start the stream at (roughly) the requested resolution.
    async fn open(&mut self, width: u32, height: u32) -> Result<(), CameraError>;

    /// A downscaled frame for motion checks.
    async fn probe_frame(&mut self, width: u32, height: u32) -> Result<Frame, CameraError>;

    /// A frame at the stream's native resolution.
    async fn capture_frame(&mut self) -> Result<Frame, CameraError>;

    /// Stop every track. Must be safe to call on a camera that never opened.
    fn release(&mut self);
}

/// Mean absolute difference over every `SAMPLE_STRIDE`-th byte.
pub fn motion_metric(previous: &[u8], current: &[u8]) -> f64 {
    let len = previous.len().min(current.len());
    if len == 0 {
        return 0.0;
    }
    let sum: u64 = (0..len)
        .step_by(SAMPLE_STRIDE)
        .map(|i| u64::from(previous[i].abs_diff(current[i])))
        .sum();
    sum as f64 / (len as f64 / SAMPLE_STRIDE as f64)
}

/// Tracks how long the picture has been still.
#[derive(Debug)]
pub struct MotionProbe {
    last: Option<Vec<u8>>,
    stable_since: Instant,
}

impl MotionProbe {
    pub fn new(start: Instant) -> Self {
        Self { last: None, stable_since: start }
    }

    /// Feed the next probe frame. Returns true once the picture has stayed
    /// under the motion threshold for the whole stability window.
    pub fn observe(&mut self, rgba: &[u8], now: Instant) -> bool {
        let mut stable = false;
        if let Some(last) = &self.last {
            if motion_metric(last, rgba) > MOTION_THRESHOLD {
                self.stable_since = now;
            }
            stable = now.saturating_duration_since(self.stable_since) >= STABLE_WINDOW;
        }
        self.last = Some(rgba.to_vec());
        stable
    }
}

/// Encode a frame as `data:image/jpeg;base64,...`.
pub fn encode_data_url(frame: &Frame, quality: u8) -> Result<String, CameraError> {
    let rgba = image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone())
        .ok_or_else(|| CameraError::Encode("pixel buffer does not match dimensions".to_string()))?;
    let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, quality))
        .map_err(|e| CameraError::Encode(e.to_string()))?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg)))
}

struct Released<'a, C: Camera>(&'a mut C);

impl<C: Camera> Deref for Released<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.0
    }
}

impl<C: Camera> DerefMut for Released<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.0
    }
}

impl<C: Camera> Drop for Released<'_, C> {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// Try to take a selfie. `None` on any failure (no camera, denied, ...).
pub async fn capture_selfie<C: Camera>(camera: &mut C) -> Option<String> {
    let mut camera = Released(camera);
    log::debug!("[selfie] requesting front camera");
    match capture(&mut *camera).await {
        Ok(url) => {
            log::debug!("[selfie] captured {} bytes", url.len());
            Some(url)
        }
        Err(e) => {
            log::debug!("[selfie] capture failed: {e}");
            None
        }
    }
}

async fn capture<C: Camera>(camera: &mut C) -> Result<String, CameraError> {
    camera.open(TARGET_WIDTH, TARGET_HEIGHT).await?;

    let started = Instant::now();
    let mut probe = MotionProbe::new(started);
    while started.elapsed() < MAX_WAIT {
        let frame = camera.probe_frame(PROBE_WIDTH, PROBE_HEIGHT).await?;
        if probe.observe(&frame.rgba, Instant::now()) {
            break;
        }
        sleep(PROBE_INTERVAL).await;
    }

    let frame = camera.capture_frame().await?;
    encode_data_url(&frame, JPEG_QUALITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_is_zero_for_identical_frames() {
        let a = vec![10u8; 96 * 72 * 4];
        assert_eq!(motion_metric(&a, &a), 0.0);
    }

    #[test]
    fn metric_only_samples_the_stride() {
        let a = vec![0u8; 64];
        let mut b = vec![0u8; 64];
        b[1] = 255;
        assert_eq!(motion_metric(&a, &b), 0.0);
        b[16] = 40;
        assert_eq!(motion_metric(&a, &b), 10.0);
    }

    #[test]
    fn encoded_selfie_is_a_jpeg_data_url() {
        let frame = Frame { width: 8, height: 6, rgba: vec![200u8; 8 * 6 * 4] };
        let url = encode_data_url(&frame, JPEG_QUALITY).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        let raw = STANDARD.decode(&url["data:image/jpeg;base64,".len()..]).unwrap();
        assert_eq!(&raw[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn mismatched_buffer_fails_to_encode() {
        let frame = Frame { width: 8, height: 6, rgba: vec![0u8; 10] };
        assert!(matches!(encode_data_url(&frame, 72), Err(CameraError::Encode(_))));
    }
}
