use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// A decoded `data:{mime};base64,{payload}` URL
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    pub fn parse(url: &str) -> Result<Self, CliError> {
        let invalid = || CliError::InvalidInput("not a base64 data URL".to_string());

        let rest = url.strip_prefix("data:").ok_or_else(invalid)?;
        let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
        let mime_type = header.strip_suffix(";base64").ok_or_else(invalid)?;

        let bytes = BASE64
            .decode(payload.as_bytes())
            .map_err(|e| CliError::InvalidInput(format!("invalid base64 payload: {}", e)))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    /// Usual file extension for the mime type
    pub fn extension(&self) -> &str {
        match self.mime_type.as_str() {
            "image/svg+xml" => "svg",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

/// Write the image in `data_url` to `out`. When `out` has no extension, the
/// one matching the image type is added. Returns the path written.
pub fn write_image(data_url: &str, out: &Path) -> Result<PathBuf, CliError> {
    let image = DataUrl::parse(data_url)?;
    let out = match out.extension() {
        Some(_) => out.to_path_buf(),
        None => out.with_extension(image.extension()),
    };

    std::fs::write(&out, &image.bytes)?;
    eprintln!(
        "🖼  Wrote {} ({}, {} bytes)",
        out.display(),
        image.mime_type,
        image.bytes.len()
    );
    Ok(out)
}
