//! Still-photo ingestion: file decode with embedded-orientation correction,
//! plus the encoded-size budget applied to accepted photos.

use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage};
use thiserror::Error;

use crate::shared::frame::{now_millis, Frame};

#[derive(Error, Debug)]
pub enum StillLoadError {
    #[error("could not open photo: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode photo: {0}")]
    Decode(#[from] image::ImageError),
}

/// Loads a still image and applies its embedded orientation metadata.
///
/// No camera rotation or mirroring applies here — a file on disk already
/// carries its own orientation tag.
pub fn load_oriented(path: &Path) -> Result<Frame, StillLoadError> {
    let mut decoder = ImageReader::open(path)?.with_guessed_format()?.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);

    let rgb = img.into_rgb8();
    let (w, h) = (rgb.width(), rgb.height());
    Ok(Frame::new(rgb.into_raw(), w, h, now_millis()))
}

/// Shrinks a frame toward the encoded-size cap with a single scaling pass.
///
/// If the JPEG encoding already fits, the frame passes through untouched.
/// Otherwise both axes scale by `sqrt(limit / encoded_size)` — area tracks
/// byte size roughly linearly — and the result is returned without
/// re-checking; one pass is the contract.
pub fn fit_byte_budget(frame: Frame, limit: usize) -> Frame {
    let encoded_len = match encoded_jpeg_len(&frame) {
        Some(len) => len,
        None => return frame,
    };
    if encoded_len <= limit {
        return frame;
    }

    let scale = (limit as f64 / encoded_len as f64).sqrt();
    let new_w = ((frame.width() as f64 * scale).round() as u32).max(1);
    let new_h = ((frame.height() as f64 * scale).round() as u32).max(1);
    log::debug!(
        "photo over byte budget ({encoded_len} > {limit}), rescaling {}x{} -> {new_w}x{new_h}",
        frame.width(),
        frame.height()
    );

    let (w, h, ts) = (frame.width(), frame.height(), frame.timestamp_ms());
    let rgb = RgbImage::from_raw(w, h, frame.into_data())
        .expect("Frame data length must match dimensions");
    let resized = imageops::resize(&rgb, new_w, new_h, FilterType::Triangle);
    Frame::new(resized.into_raw(), new_w, new_h, ts)
}

fn encoded_jpeg_len(frame: &Frame) -> Option<usize> {
    let rgb = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())?;
    let mut buf = Vec::new();
    match DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
    {
        Ok(()) => Some(buf.len()),
        Err(e) => {
            log::warn!("could not probe encoded photo size: {e}");
            None
        }
    }
}
