//! Image source client for the cataas.com random-cat endpoint.
//!
//! Every request URL embeds a millisecond timestamp plus a per-card counter
//! so intermediaries cannot serve the same bitmap twice. The endpoint is
//! best-effort: no latency or availability guarantees, so every fetch carries
//! a timeout and failures are reported per image.

use std::time::Duration;

use image::imageops::FilterType;
use thiserror::Error;

pub const IMAGE_ENDPOINT: &str = "https://cataas.com/cat";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

// Previews are kept small; the terminal resamples them down further.
const PREVIEW_MAX_WIDTH: u32 = 160;
const PREVIEW_MAX_HEIGHT: u32 = 120;

/// Failures the image source can produce. An `ImageLoad` is local to one
/// card and never removes it from the deck; a `BatchLoad` means the load as a
/// whole could not even start.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not load image {url}: {message}")]
    ImageLoad { url: String, message: String },
    #[error("batch load failed: {0}")]
    BatchLoad(String),
}

/// A decoded, downscaled RGB image ready for terminal rendering.
#[derive(Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triples, `width * height` of them.
    pub pixels: Vec<[u8; 3]>,
}

impl Preview {
    /// Nearest-neighbor sample at normalized coordinates in `[0, 1)`.
    pub fn sample(&self, u: f32, v: f32) -> [u8; 3] {
        let x = ((u * self.width as f32) as u32).min(self.width.saturating_sub(1));
        let y = ((v * self.height as f32) as u32).min(self.height.saturating_sub(1));
        self.pixels[(y * self.width + x) as usize]
    }
}

/// HTTP client for the cat image endpoint.
#[derive(Clone)]
pub struct CatClient {
    http: reqwest::Client,
}

impl CatClient {
    pub fn new() -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("catswipe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::BatchLoad(e.to_string()))?;
        Ok(Self { http })
    }

    /// A URL guaranteed to resolve to a fresh bitmap: the timestamp-and-counter
    /// query string defeats caches between us and the endpoint.
    pub fn fresh_url(&self, seq: usize) -> String {
        let ts = chrono::Utc::now().timestamp_millis();
        format!("{IMAGE_ENDPOINT}?{ts}-{seq}")
    }

    /// Fetch and decode one image. Confirms the image is actually retrievable
    /// and produces the preview the stack renders.
    pub async fn preload(&self, url: &str) -> Result<Preview, SourceError> {
        let image_load = |message: String| SourceError::ImageLoad {
            url: url.to_string(),
            message,
        };

        tracing::debug!(url, "Fetching image");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| image_load(e.to_string()))?
            .error_for_status()
            .map_err(|e| image_load(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| image_load(e.to_string()))?;

        decode_preview(&bytes).map_err(image_load)
    }
}

fn decode_preview(bytes: &[u8]) -> Result<Preview, String> {
    let decoded = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let scaled = decoded.resize(PREVIEW_MAX_WIDTH, PREVIEW_MAX_HEIGHT, FilterType::Triangle);
    let rgb = scaled.to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels = rgb.pixels().map(|p| p.0).collect();
    Ok(Preview {
        width,
        height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn fresh_urls_are_distinct_per_card() {
        let client = CatClient::new().unwrap();
        let a = client.fresh_url(0);
        let b = client.fresh_url(1);
        assert!(a.starts_with(IMAGE_ENDPOINT));
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_bytes_do_not_decode() {
        assert!(decode_preview(b"definitely not an image").is_err());
    }

    #[test]
    fn preview_decodes_and_downscales() {
        let mut png = Vec::new();
        let img = image::RgbImage::from_pixel(400, 300, image::Rgb([200, 40, 40]));
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let preview = decode_preview(&png).unwrap();
        assert!(preview.width <= PREVIEW_MAX_WIDTH);
        assert!(preview.height <= PREVIEW_MAX_HEIGHT);
        assert_eq!(preview.pixels.len(), (preview.width * preview.height) as usize);
        assert_eq!(preview.sample(0.5, 0.5), [200, 40, 40]);
    }
}
