use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Binary output of an image or speech call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl MediaAsset {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Self-contained `data:` locator for the asset
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}
