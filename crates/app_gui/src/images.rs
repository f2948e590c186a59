//! Data URIs from the service turned into egui image sources.

use eframe::egui;
use scope_core::data_url;
use std::sync::Arc;

/// A decoded image registered under a unique `bytes://` URI.
#[derive(Clone)]
pub struct ShownImage {
    pub uri: String,
    bytes: Arc<[u8]>,
}

impl ShownImage {
    pub fn from_data_url(kind: &str, generation: u64, url: &str) -> Option<Self> {
        let decoded = data_url::decode(url)?;
        let uri = format!(
            "bytes://{kind}-{generation}.{}",
            extension_for(&decoded.media_type)
        );
        Some(Self {
            uri,
            bytes: Arc::from(decoded.bytes),
        })
    }

    pub fn source(&self) -> egui::Image<'static> {
        egui::Image::from_bytes(self.uri.clone(), self.bytes.clone())
    }
}

/// The loaders pick a decoder by URI extension.
fn extension_for(media_type: &str) -> &'static str {
    match media_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/svg+xml" => "svg",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/webp" => "webp",
        "image/tiff" => "tiff",
        _ => "png",
    }
}
