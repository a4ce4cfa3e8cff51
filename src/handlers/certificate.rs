//! Certificate request handler.
//!
//! Acknowledges a domain submitted from the home page form. No certificate
//! is issued; the submitted name is echoed back into the page as-is.
//!
//! Form values come from the urlencoded body followed by the URL query, so
//! a repeated `domain` field keeps every value in submission order.

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Form, Query,
    },
    http::Method,
    response::{Html, IntoResponse, Response},
};

use crate::http::response::method_not_supported;

/// Name of the form field carrying the requested domain.
pub const DOMAIN_FIELD: &str = "domain";

/// Decoded `name=value` pairs of a form or query string.
pub type FormPairs = Vec<(String, String)>;

/// A certificate request assembled from the submitted form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    /// Every `domain` value submitted, body values first.
    pub domains: Vec<String>,
}

impl CertificateRequest {
    /// Collect the `domain` values from the body pairs, then the query pairs.
    pub fn from_pairs(body: &[(String, String)], query: &[(String, String)]) -> Self {
        let domains = body
            .iter()
            .chain(query)
            .filter(|(name, _)| name == DOMAIN_FIELD)
            .map(|(_, value)| value.clone())
            .collect();
        Self { domains }
    }

    /// The submitted domains as shown to the user, space separated.
    pub fn domain(&self) -> String {
        self.domains.join(" ")
    }
}

/// Render the acknowledgement page for `domain`.
///
/// The value is inserted without HTML escaping.
pub fn render_acknowledgement(domain: &str) -> String {
    format!(
        r#"
<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8" />
</head>
<body>
	<div>
		<h1>Request for domain {domain} generated successfully<h1>
	</div>
</body>
</html>
"#
    )
}

/// Handler for POST /create
#[tracing::instrument(skip_all, name = "certinator.certificate.request")]
pub async fn issue_certificate(
    method: Method,
    query: Result<Query<FormPairs>, QueryRejection>,
    form: Result<Form<FormPairs>, FormRejection>,
) -> Response {
    if method != Method::POST {
        return method_not_supported();
    }

    let body = form.map(|Form(pairs)| pairs).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable certificate request form");
        Vec::new()
    });
    let query = query.map(|Query(pairs)| pairs).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable certificate request query");
        Vec::new()
    });

    let request = CertificateRequest::from_pairs(&body, &query);
    let domain = request.domain();

    tracing::info!(domain = %domain, "Certificate requested");
    Html(render_acknowledgement(&domain)).into_response()
}
