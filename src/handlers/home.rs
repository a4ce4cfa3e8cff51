//! Home page handler.

use axum::{
    http::Method,
    response::{Html, IntoResponse, Response},
};

use crate::http::response::method_not_supported;

/// Form rendered at `/`.
pub const INDEX_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8" />
</head>
<body>
<div>
  <form method="POST" action="/create">
      <label>Domain Name</label><input name="domain" type="text" value="" />
      <input type="submit" value="Request Certificate" />
  </form>
</div>
</body>
</html>
"#;

/// Handler for GET /
#[tracing::instrument(skip_all, name = "certinator.home")]
pub async fn home_page(method: Method) -> Response {
    if method != Method::GET {
        return method_not_supported();
    }
    Html(INDEX_HTML).into_response()
}
