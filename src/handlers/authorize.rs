use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;

/// Fixed code handed back to the platform on successful login.
const AUTHORIZATION_CODE: &str = "1234567890";

#[derive(Deserialize)]
pub struct AuthorizeQuery {
    pub account_linking_token: Option<String>,
    pub redirect_uri: Option<String>,
}

/// Account-linking login page targeted by the account-linking button.
pub async fn authorize(Query(query): Query<AuthorizeQuery>) -> Html<String> {
    let token = query.account_linking_token.unwrap_or_default();
    let redirect_uri = query.redirect_uri.unwrap_or_default();
    let success_uri = format!("{redirect_uri}&authorization_code={AUTHORIZATION_CODE}");

    tracing::info!(account_linking_token = %token, "serving account linking page");

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Link your account</title></head>
<body>
  <p>Account linking token: {token}</p>
  <p><a href="{success}">Complete account link</a></p>
  <p><a href="{cancel}">Cancel</a></p>
</body>
</html>"#,
        token = escape_html(&token),
        success = escape_html(&success_uri),
        cancel = escape_html(&redirect_uri),
    ))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
