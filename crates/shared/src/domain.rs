use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// A user-selected file: raw bytes plus the name it was picked under.
///
/// Both halves are empty until an upload completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    #[serde(default, with = "base64_bytes")]
    pub data: Option<Vec<u8>>,
    pub name: Option<String>,
}

impl FileUpload {
    pub fn new(data: impl Into<Vec<u8>>, name: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            name: Some(name.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none() && self.name.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Zip,
    PlainText,
    Other(String),
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Zip => "application/zip",
            MediaType::PlainText => "text/plain",
            MediaType::Other(raw) => raw,
        }
    }
}

impl From<String> for MediaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "application/zip" => MediaType::Zip,
            "text/plain" => MediaType::PlainText,
            _ => MediaType::Other(value),
        }
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        match value {
            MediaType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Downloadable content tagged with the media type it should be served as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BlobRecord", try_from = "BlobRecord")]
pub struct BlobDescriptor {
    content: Vec<u8>,
    media_type: MediaType,
}

impl BlobDescriptor {
    pub fn new(content: impl Into<Vec<u8>>, media_type: MediaType) -> Self {
        Self {
            content: content.into(),
            media_type,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
struct BlobRecord {
    media_type: MediaType,
    #[serde(default)]
    size: usize,
    data_b64: String,
}

impl From<BlobDescriptor> for BlobRecord {
    fn from(value: BlobDescriptor) -> Self {
        Self {
            size: value.content.len(),
            data_b64: STANDARD.encode(&value.content),
            media_type: value.media_type,
        }
    }
}

impl TryFrom<BlobRecord> for BlobDescriptor {
    type Error = base64::DecodeError;

    // `size` is derived from the content and ignored on the way in.
    fn try_from(value: BlobRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            content: STANDARD.decode(value.data_b64)?,
            media_type: value.media_type,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactUrls {
    pub contents: Option<BlobDescriptor>,
    pub ppk: Option<BlobDescriptor>,
}

/// Output of a finished packaging run: the plugin id and its two downloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginArtifacts {
    pub id: Option<String>,
    pub url: ArtifactUrls,
}

impl PluginArtifacts {
    pub fn is_complete(&self) -> bool {
        self.url.contents.is_some() && self.url.ppk.is_some()
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| STANDARD.decode(raw).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
