//! Actions dispatched into the packer state and their JSON record form.
//!
//! On the wire an action is `{ "type": KIND, "payload": ... }`. Byte fields are
//! standard base64; the private key travels as text.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use shared::{domain::FileUpload, error::ActionError};

pub const UPLOAD_PPK: &str = "UPLOAD_PPK";
pub const UPLOAD_PLUGIN_START: &str = "UPLOAD_PLUGIN_START";
pub const UPLOAD_PLUGIN: &str = "UPLOAD_PLUGIN";
pub const UPLOAD_PLUGIN_FAILURE: &str = "UPLOAD_PLUGIN_FAILURE";
pub const CREATE_PLUGIN_ZIP_START: &str = "CREATE_PLUGIN_ZIP_START";
pub const CREATE_PLUGIN_ZIP: &str = "CREATE_PLUGIN_ZIP";
pub const CREATE_PLUGIN_ZIP_FAILURE: &str = "CREATE_PLUGIN_ZIP_FAILURE";
pub const RESET: &str = "RESET";

/// Result of a successful build: the signing key, the packaged zip, and the
/// plugin id derived from the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedPlugin {
    pub private_key: String,
    pub plugin: Vec<u8>,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    UploadPpk(FileUpload),
    UploadPluginStart,
    UploadPlugin(FileUpload),
    UploadPluginFailure(String),
    CreatePluginZipStart,
    CreatePluginZip(PackagedPlugin),
    CreatePluginZipFailure(String),
    Reset,
    /// Any kind outside the set above. The reducer leaves state untouched.
    Other(String),
}

impl Action {
    pub fn kind(&self) -> &str {
        match self {
            Action::UploadPpk(_) => UPLOAD_PPK,
            Action::UploadPluginStart => UPLOAD_PLUGIN_START,
            Action::UploadPlugin(_) => UPLOAD_PLUGIN,
            Action::UploadPluginFailure(_) => UPLOAD_PLUGIN_FAILURE,
            Action::CreatePluginZipStart => CREATE_PLUGIN_ZIP_START,
            Action::CreatePluginZip(_) => CREATE_PLUGIN_ZIP,
            Action::CreatePluginZipFailure(_) => CREATE_PLUGIN_ZIP_FAILURE,
            Action::Reset => RESET,
            Action::Other(kind) => kind.as_str(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Action::UploadPluginFailure(_) | Action::CreatePluginZipFailure(_)
        )
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ActionError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self, ActionError> {
        let Value::Object(mut record) = value else {
            return Err(ActionError::NotAnObject);
        };
        let kind = match record.remove("type") {
            Some(Value::String(kind)) => kind,
            _ => return Err(ActionError::MissingType),
        };
        let payload = record.remove("payload").filter(|payload| !payload.is_null());

        // Payload-less and unknown kinds ignore whatever payload came along.
        match kind.as_str() {
            UPLOAD_PLUGIN_START => return Ok(Action::UploadPluginStart),
            CREATE_PLUGIN_ZIP_START => return Ok(Action::CreatePluginZipStart),
            RESET => return Ok(Action::Reset),
            UPLOAD_PPK | UPLOAD_PLUGIN | UPLOAD_PLUGIN_FAILURE | CREATE_PLUGIN_ZIP
            | CREATE_PLUGIN_ZIP_FAILURE => {}
            _ => return Ok(Action::Other(kind)),
        }

        let Some(payload) = payload else {
            return Err(ActionError::missing_payload(kind));
        };
        let record: ActionRecord =
            serde_json::from_value(json!({ "type": kind, "payload": payload }))
                .map_err(|source| ActionError::invalid_payload(kind, source))?;
        Action::try_from(record)
    }

    pub fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn to_record(&self) -> Option<ActionRecord> {
        let record = match self {
            Action::UploadPpk(upload) => ActionRecord::UploadPpk(UploadRecord::from(upload)),
            Action::UploadPluginStart => ActionRecord::UploadPluginStart,
            Action::UploadPlugin(upload) => ActionRecord::UploadPlugin(UploadRecord::from(upload)),
            Action::UploadPluginFailure(message) => {
                ActionRecord::UploadPluginFailure(Value::String(message.clone()))
            }
            Action::CreatePluginZipStart => ActionRecord::CreatePluginZipStart,
            Action::CreatePluginZip(packaged) => {
                ActionRecord::CreatePluginZip(PackagedRecord::from(packaged))
            }
            Action::CreatePluginZipFailure(message) => {
                ActionRecord::CreatePluginZipFailure(Value::String(message.clone()))
            }
            Action::Reset => ActionRecord::Reset,
            Action::Other(_) => return None,
        };
        Some(record)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_record() {
            Some(record) => record.serialize(serializer),
            None => KindOnly { kind: self.kind() }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Action::from_json_value(value).map_err(D::Error::custom)
    }
}

/// Wire form of every known kind.
#[derive(Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
enum ActionRecord {
    UploadPpk(UploadRecord),
    UploadPluginStart,
    UploadPlugin(UploadRecord),
    UploadPluginFailure(Value),
    CreatePluginZipStart,
    CreatePluginZip(PackagedRecord),
    CreatePluginZipFailure(Value),
    Reset,
}

#[derive(Serialize)]
struct KindOnly<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Serialize, Deserialize)]
struct UploadRecord {
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl From<&FileUpload> for UploadRecord {
    fn from(value: &FileUpload) -> Self {
        Self {
            data: value.data.as_ref().map(|data| STANDARD.encode(data)),
            name: value.name.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackagedRecord {
    private_key: String,
    plugin: String,
    id: String,
}

impl From<&PackagedPlugin> for PackagedRecord {
    fn from(value: &PackagedPlugin) -> Self {
        Self {
            private_key: value.private_key.clone(),
            plugin: STANDARD.encode(&value.plugin),
            id: value.id.clone(),
        }
    }
}

impl TryFrom<ActionRecord> for Action {
    type Error = ActionError;

    fn try_from(value: ActionRecord) -> Result<Self, Self::Error> {
        let action = match value {
            ActionRecord::UploadPpk(upload) => Action::UploadPpk(decode_upload(upload)?),
            ActionRecord::UploadPluginStart => Action::UploadPluginStart,
            ActionRecord::UploadPlugin(upload) => Action::UploadPlugin(decode_upload(upload)?),
            ActionRecord::UploadPluginFailure(payload) => {
                Action::UploadPluginFailure(failure_message(payload))
            }
            ActionRecord::CreatePluginZipStart => Action::CreatePluginZipStart,
            ActionRecord::CreatePluginZip(packaged) => Action::CreatePluginZip(PackagedPlugin {
                plugin: decode_base64("plugin", &packaged.plugin)?,
                private_key: packaged.private_key,
                id: packaged.id,
            }),
            ActionRecord::CreatePluginZipFailure(payload) => {
                Action::CreatePluginZipFailure(failure_message(payload))
            }
            ActionRecord::Reset => Action::Reset,
        };
        Ok(action)
    }
}

fn decode_base64(field: &'static str, raw: &str) -> Result<Vec<u8>, ActionError> {
    STANDARD
        .decode(raw)
        .map_err(|source| ActionError::InvalidBase64 { field, source })
}

fn decode_upload(record: UploadRecord) -> Result<FileUpload, ActionError> {
    let data = record
        .data
        .map(|raw| decode_base64("data", &raw))
        .transpose()?;
    Ok(FileUpload {
        data,
        name: record.name,
    })
}

// Failure payloads are stored verbatim: strings as-is, error-shaped objects by
// their `message`, anything else as its JSON text.
fn failure_message(payload: Value) -> String {
    match payload {
        Value::String(message) => message,
        Value::Object(ref fields) => match fields.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => payload.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/action_tests.rs"]
mod tests;
