use openai_api::payload::{ChatMessage, ChatResponse, ROLE_ASSISTANT, ROLE_SYSTEM, ROLE_USER};
use openai_api::ChatRequest;
use serde_json::{json, Value};

#[test]
fn request_serializes_model_and_role_tagged_messages() {
    let request = ChatRequest::new(
        "gpt-4o-mini",
        vec![
            ChatMessage::system("You are the game master."),
            ChatMessage::assistant("The house exhales dust."),
            ChatMessage::user("go north"),
        ],
    );

    let value = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(
        value,
        json!({
            "model": "gpt-4o-mini",
            "messages": [
                { "role": "system", "content": "You are the game master." },
                { "role": "assistant", "content": "The house exhales dust." },
                { "role": "user", "content": "go north" },
            ],
        })
    );
}

#[test]
fn temperature_is_omitted_until_set() {
    let bare = ChatRequest::new("gpt-4o-mini", vec![ChatMessage::user("wait")]);
    let bare_value = serde_json::to_value(&bare).expect("request should serialize");
    assert!(bare_value.get("temperature").is_none());

    let warm = bare.with_temperature(0.8);
    let warm_value = serde_json::to_value(&warm).expect("request should serialize");
    assert_eq!(warm_value.get("temperature"), Some(&json!(0.8)));
}

#[test]
fn role_constants_match_the_wire_contract() {
    assert_eq!(ROLE_SYSTEM, "system");
    assert_eq!(ROLE_USER, "user");
    assert_eq!(ROLE_ASSISTANT, "assistant");
}

#[test]
fn response_first_content_reads_the_first_choice() {
    let body = json!({
        "id": "chatcmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": "A corridor." } },
            { "index": 1, "message": { "role": "assistant", "content": "Ignored." } },
        ],
    });

    let response: ChatResponse =
        serde_json::from_value(body).expect("response should deserialize");
    assert_eq!(response.first_content(), Some("A corridor."));
}

#[test]
fn response_without_choices_or_content_yields_none() {
    let empty: ChatResponse =
        serde_json::from_value(json!({ "id": "chatcmpl-2" })).expect("should deserialize");
    assert_eq!(empty.first_content(), None);

    let null_content: ChatResponse = serde_json::from_value(json!({
        "choices": [ { "message": { "role": "assistant", "content": Value::Null } } ],
    }))
    .expect("should deserialize");
    assert_eq!(null_content.first_content(), None);
}

#[test]
fn unknown_response_fields_are_ignored() {
    let body = json!({
        "object": "chat.completion",
        "usage": { "total_tokens": 42 },
        "choices": [
            { "message": { "role": "assistant", "content": "Still here." }, "finish_reason": "stop" },
        ],
    });

    let response: ChatResponse =
        serde_json::from_value(body).expect("extra fields should not break decoding");
    assert_eq!(response.first_content(), Some("Still here."));
}
