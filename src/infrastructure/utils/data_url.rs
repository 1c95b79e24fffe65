use base64::{engine::general_purpose::STANDARD, Engine};
use derive_more::Display;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Image formats accepted inline, keyed by sniffed media type.
const ALLOWED_IMAGES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// A decoded `data:image/<type>;base64,<payload>` string.
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
    extension: &'static str,
}

impl DataUrl {
    /// Parses and decodes an inline image payload.
    ///
    /// The declared media type must be an image, and the decoded bytes must
    /// sniff as one of the allowed formats. The stored media type and
    /// extension always come from the bytes, never from the declaration.
    pub fn parse(input: &str) -> Result<Self, DataUrlError> {
        let rest = input
            .trim()
            .strip_prefix(DATA_PREFIX)
            .ok_or(DataUrlError::NotADataUrl)?;

        let (declared, payload) = rest
            .split_once(BASE64_MARKER)
            .ok_or(DataUrlError::NotBase64)?;

        let declared = declared.to_ascii_lowercase();
        if !declared.starts_with("image/") {
            return Err(DataUrlError::NotAnImage(declared));
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| DataUrlError::InvalidPayload(e.to_string()))?;

        if bytes.is_empty() {
            return Err(DataUrlError::Empty);
        }

        let sniffed = infer::get(&bytes).ok_or(DataUrlError::Unrecognized)?;
        let (mime_type, extension) = ALLOWED_IMAGES
            .iter()
            .find(|(mime, _)| *mime == sniffed.mime_type())
            .copied()
            .ok_or_else(|| DataUrlError::NotAnImage(sniffed.mime_type().to_string()))?;

        Ok(DataUrl {
            mime_type: mime_type.to_string(),
            bytes,
            extension,
        })
    }

    /// File extension used when naming the stored object.
    pub fn extension(&self) -> &'static str {
        self.extension
    }
}

#[derive(Debug, Display, PartialEq)]
pub enum DataUrlError {
    #[display("Image data must be a data URL")]
    NotADataUrl,

    #[display("Image data must be base64 encoded")]
    NotBase64,

    #[display("Unsupported media type: {_0}")]
    NotAnImage(String),

    #[display("Image data is not valid base64: {_0}")]
    InvalidPayload(String),

    #[display("Image data is empty")]
    Empty,

    #[display("Image format not recognised")]
    Unrecognized,
}
