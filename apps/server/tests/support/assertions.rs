use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "{context}: unexpected status");
}

/// Product ids of a listing response, in response order.
pub fn product_ids(body: &Value) -> anyhow::Result<Vec<String>> {
    body.get("products")
        .and_then(|v| v.as_array())
        .context("products is array")?
        .iter()
        .map(|p| {
            p.get("id")
                .and_then(|v| v.as_str())
                .map(String::from)
                .context("product id is string")
        })
        .collect()
}

pub fn pagination(body: &Value) -> anyhow::Result<&Value> {
    body.get("pagination").context("pagination object")
}

/// Next-page cursor, `None` when the response says there is no next page.
pub fn next_cursor(body: &Value) -> anyhow::Result<Option<String>> {
    let pagination = pagination(body)?;
    let has_next = pagination["hasNext"].as_bool().context("hasNext is bool")?;
    let cursor = pagination["cursor"].as_str().map(String::from);
    assert_eq!(
        has_next,
        cursor.is_some(),
        "cursor must be present exactly when hasNext"
    );
    Ok(cursor)
}

/// Assert a JSON error body with the given machine code.
pub fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["code"].as_str(), Some(code), "error code in {body}");
    assert!(body["error"].is_string(), "error message in {body}");
    assert!(body.get("products").is_none(), "no partial results in {body}");
}
