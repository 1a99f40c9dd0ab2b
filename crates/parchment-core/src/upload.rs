//! Submission payload for publishing a finished drawing.
//!
//! The front end renders the canvas to PNG, the board packages it with the
//! document, and an [`Uploader`] sends it somewhere.

use crate::document::{CanvasDocument, DocumentError};
use crate::storage::BoxFuture;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Upload errors.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Not a PNG image: {0}")]
    InvalidRaster(&'static str),
    #[error("Invalid image data URL: {0}")]
    DataUrl(#[from] base64::DecodeError),
    #[error("Failed to encode canvas document: {0}")]
    Document(#[from] DocumentError),
    #[error("Upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Upload failed: {0}")]
    Transport(String),
}

pub type UploadResult<T> = Result<T, UploadError>;

/// A rendered PNG of the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSnapshot {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterSnapshot {
    /// Wrap PNG bytes, reading the pixel size from the IHDR chunk.
    pub fn png(bytes: Vec<u8>) -> UploadResult<Self> {
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(UploadError::InvalidRaster("missing PNG signature"));
        }
        // signature, chunk length, "IHDR", width, height
        let header = bytes
            .get(8..24)
            .filter(|h| &h[4..8] == b"IHDR")
            .ok_or(UploadError::InvalidRaster("missing IHDR chunk"))?;
        let width = u32::from_be_bytes([header[8], header[9], header[10], header[11]]);
        let height = u32::from_be_bytes([header[12], header[13], header[14], header[15]]);
        if width == 0 || height == 0 {
            return Err(UploadError::InvalidRaster("zero image size"));
        }

        Ok(Self {
            bytes,
            width,
            height,
        })
    }

    /// Decode a `data:image/png;base64,...` URL, as produced by a canvas export.
    pub fn from_data_url(url: &str) -> UploadResult<Self> {
        let payload = url
            .strip_prefix(PNG_DATA_URL_PREFIX)
            .ok_or(UploadError::InvalidRaster("not a PNG data URL"))?;
        Self::png(STANDARD.decode(payload)?)
    }

    pub fn to_data_url(&self) -> String {
        format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(&self.bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Everything needed to publish a drawing.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Client-side id, for matching receipts to submissions.
    pub id: Uuid,
    pub document: CanvasDocument,
    pub raster: RasterSnapshot,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Submission {
    /// Build a submission. Title and description are trimmed and dropped when blank.
    pub fn new(
        document: CanvasDocument,
        raster: RasterSnapshot,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document,
            raster,
            title: non_blank(title),
            description: non_blank(description),
        }
    }

    /// Text fields of the multipart upload form. The PNG itself goes in a
    /// separate `file` part.
    pub fn form_fields(&self) -> UploadResult<Vec<(&'static str, String)>> {
        let mut fields = vec![
            ("canvas_data", self.document.to_json()?),
            ("width", self.document.width.to_string()),
            ("height", self.document.height.to_string()),
        ];
        if let Some(title) = &self.title {
            fields.push(("title", title.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        Ok(fields)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// What the server answered for an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub submission_id: Uuid,
    /// Server-side id of the published artwork.
    pub artwork_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Sends submissions to a gallery backend.
pub trait Uploader: Send + Sync {
    fn upload<'a>(&'a self, submission: &'a Submission) -> BoxFuture<'a, UploadResult<UploadReceipt>>;
}
