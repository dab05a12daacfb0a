//! Typed view of the chat service's request and reply bodies.
//!
//! The service speaks a Gemini-style history: entries with a `role` of
//! `user` or `model` and a list of `parts`, each carrying text, a file
//! reference, or inline base64 data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

pub const SESSION_ID_LENGTH: usize = 8;

/// Shown when the reply carries neither history nor a message.
pub const FALLBACK_REPLY: &str = "No pude obtener la respuesta, intenta nuevamente.";

const DEFAULT_ATTACHMENT_NAME: &str = "Archivo adjunto";

/// Fresh chat session id.
pub fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()[..SESSION_ID_LENGTH].to_string()
}

/// Body posted to the chat service.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: session_id.into(),
            kind: None,
            email: None,
            data: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Attach a normalized (trimmed, lowercased) email.
    pub fn with_email(mut self, email: &str) -> Self {
        let email = email.trim().to_lowercase();
        self.email = (!email.is_empty()).then_some(email);
        self
    }

    /// Attach extra context. Only non-empty JSON objects are sent.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = match data {
            serde_json::Value::Object(map) if !map.is_empty() => Some(map),
            _ => None,
        };
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    fn from_wire(role: &str) -> Option<Self> {
        match role {
            "user" => Some(ChatRole::User),
            "model" => Some(ChatRole::Assistant),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AttachmentKind {
    Image,
    File,
}

impl AttachmentKind {
    fn from_mime(mime_type: &str) -> Self {
        if mime_type.to_lowercase().starts_with("image/") {
            AttachmentKind::Image
        } else {
            AttachmentKind::File
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Attachment {
    pub id: String,
    pub kind: AttachmentKind,
    pub mime_type: String,
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub attachments: Vec<Attachment>,
}

/// A parsed chat service reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Full conversation so far, oldest first. Empty when the service
    /// returned no history.
    pub messages: Vec<ChatMessage>,
    /// The reply's plain `message`, or the stock fallback text.
    pub fallback: String,
}

impl ChatReply {
    pub fn last_assistant(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.role == ChatRole::Assistant)
    }

    /// Text to show for the assistant turn.
    pub fn assistant_text(&self) -> &str {
        match self.last_assistant() {
            Some(message) => &message.content,
            None => &self.fallback,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReply {
    #[serde(default)]
    conversation_history: Option<Vec<WireEntry>>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct WireEntry {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WirePart {
    text: Option<String>,
    file_data: Option<WireFileData>,
    inline_data: Option<WireInlineData>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireFileData {
    file_uri: Option<String>,
    mime_type: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireInlineData {
    data: Option<String>,
    mime_type: Option<String>,
}

/// Parse a chat service reply body.
///
/// Message ids are derived from `now` and the entry index, so parsing the
/// same body at the same instant yields the same ids.
pub fn parse_chat_reply(body: &str, now: jiff::Timestamp) -> Result<ChatReply, CoreError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(CoreError::Malformed("chat reply is not a JSON object".to_string()));
    }
    let reply: WireReply = serde_json::from_value(value)
        .map_err(|e| CoreError::Malformed(format!("chat reply: {e}")))?;

    let stamp = now.as_millisecond();
    let messages = reply
        .conversation_history
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let role = ChatRole::from_wire(entry.role.as_deref()?)?;
            let id = format!("{}-{stamp}-{index}", role.as_str());
            Some(build_message(id, role, &entry.parts))
        })
        .collect();

    let fallback = reply
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_REPLY.to_string());

    Ok(ChatReply { messages, fallback })
}

fn build_message(id: String, role: ChatRole, parts: &[WirePart]) -> ChatMessage {
    let content = parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let attachments = parts
        .iter()
        .enumerate()
        .filter_map(|(index, part)| {
            file_attachment(part.file_data.as_ref(), &id, index)
                .or_else(|| inline_attachment(part.inline_data.as_ref(), &id, index))
        })
        .collect();

    ChatMessage {
        id,
        role,
        content,
        attachments,
    }
}

fn file_attachment(file: Option<&WireFileData>, base_id: &str, index: usize) -> Option<Attachment> {
    let file = file?;
    let url = file.file_uri.clone().filter(|u| !u.is_empty())?;
    let mime_type = file.mime_type.clone().unwrap_or_default();
    let name = file_name_from_uri(&url);
    Some(Attachment {
        id: format!("{base_id}-file-{index}"),
        kind: AttachmentKind::from_mime(&mime_type),
        mime_type,
        url,
        name: if name.is_empty() {
            DEFAULT_ATTACHMENT_NAME.to_string()
        } else {
            name
        },
    })
}

fn inline_attachment(
    inline: Option<&WireInlineData>,
    base_id: &str,
    index: usize,
) -> Option<Attachment> {
    let inline = inline?;
    let data = inline.data.as_deref().filter(|d| !d.is_empty())?;
    let mime_type = inline.mime_type.clone().unwrap_or_default();
    let url = if data.starts_with("data:") {
        data.to_string()
    } else {
        let mime = if mime_type.is_empty() {
            "application/octet-stream"
        } else {
            mime_type.as_str()
        };
        format!("data:{mime};base64,{data}")
    };
    Some(Attachment {
        id: format!("{base_id}-inline-{index}"),
        kind: AttachmentKind::from_mime(&mime_type),
        mime_type,
        url,
        name: DEFAULT_ATTACHMENT_NAME.to_string(),
    })
}

/// Last non-empty path segment of a URI, ignoring query and fragment.
fn file_name_from_uri(uri: &str) -> String {
    let path = uri.split(['?', '#']).next().unwrap_or_default();
    let path = path.split_once("://").map(|(_, rest)| rest).unwrap_or(path);
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    // the first segment of an absolute URI is the host
    if uri.contains("://") {
        segments.next();
    }
    segments.last().unwrap_or_default().to_string()
}
