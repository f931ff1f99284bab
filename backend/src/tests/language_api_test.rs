use serde_json::json;

use crate::Config;
use crate::tests::common::{create_test_app, create_test_app_with, get_json, post_json, post_raw};

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(create_test_app(), "/api/health", &[]).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_language_defaults_to_english() {
    let (status, body) = get_json(create_test_app(), "/api/language", &[]).await;
    assert_eq!(status, 200);
    assert_eq!(body["language"], "en");
    assert_eq!(body["instruction"], "Use English for all output.");
}

#[tokio::test]
async fn test_language_from_accept_language() {
    let cases = [
        ("zh-CN,en;q=0.9", "zh-CN"),
        ("ZH-TW", "zh-CN"),
        ("  zh  ,en", "zh-CN"),
        ("fr-FR,en;q=0.8", "en"),
        ("en-US,zh-CN;q=0.8", "en"),
        (",,,", "en"),
    ];

    for (header, expected) in cases {
        let (status, body) =
            get_json(create_test_app(), "/api/language", &[("accept-language", header)]).await;
        assert_eq!(status, 200);
        assert_eq!(body["language"], expected, "Accept-Language: {header:?}");
    }

    let (_, body) =
        get_json(create_test_app(), "/api/language", &[("accept-language", "zh-CN")]).await;
    assert_eq!(body["instruction"], "Use Simplified Chinese (zh-CN) for all output.");
}

#[tokio::test]
async fn test_cookie_overrides_header() {
    let headers = [("accept-language", "en-US"), ("cookie", "theme=dark; language=zh-CN")];
    let (_, body) = get_json(create_test_app(), "/api/language", &headers).await;
    assert_eq!(body["language"], "zh-CN");

    // Invalid cookie value is ignored
    let headers = [("accept-language", "zh-CN"), ("cookie", "language=fr")];
    let (_, body) = get_json(create_test_app(), "/api/language", &headers).await;
    assert_eq!(body["language"], "zh-CN");
}

#[tokio::test]
async fn test_cookie_ignored_when_disabled() {
    let mut config = Config::default();
    config.language.honor_cookie = false;

    let headers = [("accept-language", "en-US"), ("cookie", "language=zh-CN")];
    let (_, body) = get_json(create_test_app_with(config), "/api/language", &headers).await;
    assert_eq!(body["language"], "en");
}

#[tokio::test]
async fn test_custom_cookie_name() {
    let mut config = Config::default();
    config.language.cookie_name = "lang".to_string();

    let headers = [("cookie", "language=en; lang=zh-CN")];
    let (_, body) = get_json(create_test_app_with(config), "/api/language", &headers).await;
    assert_eq!(body["language"], "zh-CN");
}

#[tokio::test]
async fn test_instruction_uses_request_language() {
    let (status, body) = post_json(
        create_test_app(),
        "/api/language/instruction",
        &[("accept-language", "zh-TW,zh;q=0.9")],
        json!({}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["language"], "zh-CN");
    assert_eq!(body["instruction"], "Use Simplified Chinese (zh-CN) for all output.");
    assert!(body.get("prompt").is_none());
}

#[tokio::test]
async fn test_instruction_explicit_language_and_prompt() {
    let (status, body) = post_json(
        create_test_app(),
        "/api/language/instruction",
        &[("accept-language", "zh-CN")],
        json!({ "language": "en", "prompt": "Summarize the source." }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["language"], "en");
    assert_eq!(body["instruction"], "Use English for all output.");
    assert_eq!(body["prompt"], "Summarize the source.\n\nUse English for all output.");
}

#[tokio::test]
async fn test_instruction_rejects_unknown_language() {
    let (status, body) = post_json(
        create_test_app(),
        "/api/language/instruction",
        &[],
        json!({ "language": "fr" }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], 4001);
    assert_eq!(body["message"], "Unsupported language: fr (expected \"en\" or \"zh-CN\")");
}

#[tokio::test]
async fn test_error_message_follows_request_language() {
    let (status, body) = post_json(
        create_test_app(),
        "/api/language/instruction",
        &[("accept-language", "zh-CN")],
        json!({ "language": "zh-TW" }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], "不支持的语言：zh-TW（仅支持 \"en\" 或 \"zh-CN\"）");
}

#[tokio::test]
async fn test_instruction_malformed_body() {
    let (status, body) = post_raw(
        create_test_app(),
        "/api/language/instruction",
        &[("accept-language", "zh-CN")],
        "{not json",
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], 4002);
    let message = body["message"].as_str().expect("message is a string");
    assert!(message.starts_with("参数校验失败："), "{message}");

    let (status, body) =
        post_raw(create_test_app(), "/api/language/instruction", &[], "[1, 2]").await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], 4002);
    let message = body["message"].as_str().expect("message is a string");
    assert!(message.starts_with("Validation failed: "), "{message}");
}

#[tokio::test]
async fn test_instruction_trims_explicit_language() {
    let (status, body) = post_json(
        create_test_app(),
        "/api/language/instruction",
        &[("accept-language", "en-US")],
        json!({ "language": " zh-CN " }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["language"], "zh-CN");
}

#[tokio::test]
async fn test_cookie_tag_is_case_sensitive() {
    let headers = [("accept-language", "en-US"), ("cookie", "language=ZH-cn")];
    let (_, body) = get_json(create_test_app(), "/api/language", &headers).await;
    assert_eq!(body["language"], "en");
}

#[tokio::test]
async fn test_openapi_document() {
    let (status, body) = get_json(create_test_app(), "/api-docs/openapi.json", &[]).await;
    assert_eq!(status, 200);
    assert!(body["paths"]["/api/language"].is_object());
    assert!(body["paths"]["/api/language/instruction"].is_object());
}
