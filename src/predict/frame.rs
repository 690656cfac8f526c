use anyhow::{anyhow, Context, Result};

/// Decoded upload, packed RGB8.
#[derive(Clone, Debug)]
pub struct RgbFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbFrame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = expected_rgb_len(width, height)?;
        if pixels.len() != expected {
            return Err(anyhow!(
                "expected {} RGB bytes for {}x{}, received {}",
                expected,
                width,
                height,
                pixels.len()
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Decode an uploaded JPEG or PNG into RGB8, dropping any alpha channel.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbFrame> {
    if bytes.is_empty() {
        return Err(anyhow!("uploaded image is empty"));
    }
    let image = image::load_from_memory(bytes).context("failed to decode uploaded image")?;
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    RgbFrame::new(width, height, rgb.into_raw())
}

pub(crate) fn expected_rgb_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(3))
        .ok_or_else(|| anyhow!("image dimensions overflow"))
}
