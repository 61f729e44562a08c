use settings_search_core::contract::{
    NavigationRequest, ParentContext, QueryChangeRequest, ScreenRequest, ScreenResponse,
    SelectRequest,
};

#[test]
fn serializes_and_deserializes_query_change() {
    let request = ScreenRequest::QueryChange(QueryChangeRequest {
        query: Some("icon".to_string()),
    });

    let encoded = serde_json::to_string(&request).unwrap();
    assert_eq!(
        encoded,
        r#"{"kind":"query_change","payload":{"query":"icon"}}"#
    );
    let decoded: ScreenRequest = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, request);
}

#[test]
fn accepts_null_query() {
    let decoded: ScreenRequest =
        serde_json::from_str(r#"{"kind":"query_change","payload":{"query":null}}"#).unwrap();
    assert_eq!(
        decoded,
        ScreenRequest::QueryChange(QueryChangeRequest { query: None })
    );
}

#[test]
fn parses_select_request() {
    let decoded: ScreenRequest =
        serde_json::from_str(r#"{"kind":"select","payload":{"position":2}}"#).unwrap();
    assert_eq!(decoded, ScreenRequest::Select(SelectRequest { position: 2 }));
}

#[test]
fn navigation_response_carries_parent_context() {
    let response = ScreenResponse::Navigate(NavigationRequest {
        key: "pref_iconPack".to_string(),
        parent: Some(ParentContext {
            title: "Desktop".to_string(),
            content_ref: "desktop_prefs".to_string(),
            has_preview: true,
        }),
    });

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["kind"], "navigate");
    assert_eq!(value["payload"]["key"], "pref_iconPack");
    assert_eq!(value["payload"]["parent"]["has_preview"], true);
}

#[test]
fn submitted_response_has_no_payload() {
    let encoded = serde_json::to_string(&ScreenResponse::Submitted).unwrap();
    assert_eq!(encoded, r#"{"kind":"submitted"}"#);
}
