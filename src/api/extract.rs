//! Request extractors.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Header set by htmx on every request it issues.
pub const HX_REQUEST: &str = "hx-request";

/// Whether the request came from an enhanced client (`HX-Request: true`).
///
/// Never rejects: a missing or unexpected header value means a plain request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HxRequest(pub bool);

impl HxRequest {
    pub fn is_enhanced(self) -> bool {
        self.0
    }
}

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let enhanced = parts
            .headers
            .get(HX_REQUEST)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
        Ok(HxRequest(enhanced))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use rstest::rstest;

    async fn extract(header: Option<&str>) -> HxRequest {
        let mut builder = Request::builder().uri("/tasks");
        if let Some(value) = header {
            builder = builder.header("HX-Request", value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        HxRequest::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[rstest]
    #[case(Some("true"), true)]
    #[case(Some("TRUE"), true)]
    #[case(Some("false"), false)]
    #[case(Some(""), false)]
    #[case(None, false)]
    #[tokio::test]
    async fn detects_enhanced_requests(#[case] header: Option<&str>, #[case] expected: bool) {
        assert_eq!(extract(header).await.is_enhanced(), expected);
    }
}
