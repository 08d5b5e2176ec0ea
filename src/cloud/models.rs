//! Data models for the media cloud upload API

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Resource type hint sent with uploads and used in delivery URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Image,
    Video,
    Raw,
    Auto,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Video => "video",
            ResourceType::Raw => "raw",
            ResourceType::Auto => "auto",
        }
    }
}

/// A file selected for upload: raw bytes plus the metadata the
/// pre-flight validation needs.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub data: Bytes,
    pub file_name: String,
    pub mime_type: String,
}

impl FileSource {
    pub fn new(data: impl Into<Bytes>, file_name: &str, mime_type: &str) -> Self {
        FileSource {
            data: data.into(),
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
        }
    }

    /// File size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Flat string parameters accompanying an upload request
#[derive(Debug, Clone)]
pub struct UploadParams {
    pub resource_type: ResourceType,
    pub folder: Option<String>,
    pub public_id: Option<String>,
    pub tags: Vec<String>,
}

impl UploadParams {
    pub fn new(resource_type: ResourceType) -> Self {
        UploadParams {
            resource_type,
            folder: None,
            public_id: None,
            tags: Vec::new(),
        }
    }

    /// The optional text fields of the multipart form, in wire order.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(folder) = &self.folder {
            fields.push(("folder", folder.clone()));
        }
        if let Some(public_id) = &self.public_id {
            fields.push(("public_id", public_id.clone()));
        }
        if !self.tags.is_empty() {
            fields.push(("tags", self.tags.join(",")));
        }
        fields
    }
}

/// Successful upload result returned by the remote service.
/// Metadata is stored verbatim as returned.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UploadResponse {
    pub secure_url: String,
    pub public_id: String,
    pub bytes: u64,
    pub resource_type: String,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub duration: Option<f64>,
}
