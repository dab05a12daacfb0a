use docseb_core::error::CoreError;
use docseb_core::models::conversation::{
    new_session_id, parse_chat_reply, AttachmentKind, ChatRequest, ChatRole, FALLBACK_REPLY,
    SESSION_ID_LENGTH,
};
use jiff::Timestamp;
use serde_json::json;

fn now() -> Timestamp {
    Timestamp::from_millisecond(1_700_000_000_123).unwrap()
}

#[test]
fn history_maps_roles_and_joins_text_parts() {
    let body = json!({
        "conversationHistory": [
            { "role": "user", "parts": [{ "text": "  Hola  " }, { "text": "" }, { "text": "¿Qué tal?" }] },
            { "role": "system", "parts": [{ "text": "ignored" }] },
            { "role": "model", "parts": [{ "text": "Bien." }] }
        ]
    })
    .to_string();

    let reply = parse_chat_reply(&body, now()).unwrap();
    assert_eq!(reply.messages.len(), 2);
    assert_eq!(reply.messages[0].role, ChatRole::User);
    assert_eq!(reply.messages[0].content, "Hola\n¿Qué tal?");
    assert_eq!(reply.messages[0].id, "user-1700000000123-0");
    assert_eq!(reply.messages[1].role, ChatRole::Assistant);
    assert_eq!(reply.messages[1].id, "assistant-1700000000123-2");
    assert_eq!(reply.assistant_text(), "Bien.");
}

#[test]
fn file_and_inline_parts_become_attachments() {
    let body = json!({
        "conversationHistory": [{
            "role": "user",
            "parts": [
                { "text": "mira" },
                { "fileData": { "fileUri": "https://files.example.com/uploads/rx.png?sig=1", "mimeType": "image/png" } },
                { "inlineData": { "data": "QUJD", "mimeType": "application/pdf" } },
                { "inlineData": { "data": "data:text/plain;base64,QUJD" } },
                { "fileData": { "fileUri": "https://files.example.com/" } }
            ]
        }]
    })
    .to_string();

    let reply = parse_chat_reply(&body, now()).unwrap();
    let attachments = &reply.messages[0].attachments;
    assert_eq!(attachments.len(), 4);

    assert_eq!(attachments[0].kind, AttachmentKind::Image);
    assert_eq!(attachments[0].name, "rx.png");
    assert_eq!(attachments[0].id, "user-1700000000123-0-file-1");

    assert_eq!(attachments[1].kind, AttachmentKind::File);
    assert_eq!(attachments[1].url, "data:application/pdf;base64,QUJD");
    assert_eq!(attachments[1].name, "Archivo adjunto");

    assert_eq!(attachments[2].url, "data:text/plain;base64,QUJD");
    assert_eq!(attachments[2].mime_type, "");

    assert_eq!(attachments[3].name, "Archivo adjunto");
}

#[test]
fn reply_without_history_uses_message_or_fallback() {
    let reply = parse_chat_reply(r#"{"message": "  listo  "}"#, now()).unwrap();
    assert!(reply.messages.is_empty());
    assert_eq!(reply.assistant_text(), "listo");

    let reply = parse_chat_reply(r#"{"conversationHistory": null, "message": " "}"#, now()).unwrap();
    assert_eq!(reply.assistant_text(), FALLBACK_REPLY);
}

#[test]
fn history_without_assistant_falls_back() {
    let body = r#"{"conversationHistory": [{"role": "user", "parts": [{"text": "hola"}]}]}"#;
    let reply = parse_chat_reply(body, now()).unwrap();
    assert!(reply.last_assistant().is_none());
    assert_eq!(reply.assistant_text(), FALLBACK_REPLY);
}

#[test]
fn malformed_replies_are_tagged() {
    assert!(matches!(
        parse_chat_reply("[1, 2]", now()),
        Err(CoreError::Malformed(_))
    ));
    assert!(matches!(
        parse_chat_reply(r#"{"conversationHistory": "nope"}"#, now()),
        Err(CoreError::Malformed(_))
    ));
    assert!(matches!(
        parse_chat_reply("not json", now()),
        Err(CoreError::Serialization(_))
    ));
}

#[test]
fn request_omits_unset_fields() {
    let request = ChatRequest::new("hola", "abcd1234");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "message": "hola", "session_id": "abcd1234" })
    );

    let request = ChatRequest::new("hola", "abcd1234")
        .with_kind("specific")
        .with_email("  Doc@Example.COM ")
        .with_data(json!({ "patient": "p-1" }));
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "message": "hola",
            "session_id": "abcd1234",
            "type": "specific",
            "email": "doc@example.com",
            "data": { "patient": "p-1" }
        })
    );
}

#[test]
fn empty_or_non_object_data_is_dropped() {
    let request = ChatRequest::new("x", "y").with_data(json!({})).with_email(" ");
    assert!(request.data.is_none());
    assert!(request.email.is_none());
    assert!(ChatRequest::new("x", "y").with_data(json!([1])).data.is_none());
}

#[test]
fn session_ids_are_short_and_alphanumeric() {
    let id = new_session_id();
    assert_eq!(id.len(), SESSION_ID_LENGTH);
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(id, new_session_id());
}
