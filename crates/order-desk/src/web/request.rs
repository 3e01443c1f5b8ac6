//! Request-side extractors: response format negotiation and allow-listed payloads.

use super::error::WebError;
use crate::model::{CustomerParams, OrderParams};
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::{header, request::Parts, HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::convert::Infallible;
use url::form_urlencoded;

/// What the client asked to get back.
///
/// A `.json` path suffix wins over the `Accept` header; the router strips the suffix and leaves
/// `Format::Json` in the request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
}

impl Format {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wants_json = headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|accept| accept.contains("application/json"));
        if wants_json {
            Format::Json
        } else {
            Format::Html
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Format {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Format>()
            .copied()
            .unwrap_or_else(|| Self::from_headers(&parts.headers)))
    }
}

/// A parameter struct that arrives nested under a root key, `order[...]` or `{"order": {..}}`.
pub trait ParamRoot: DeserializeOwned + Send {
    const ROOT: &'static str;
}

impl ParamRoot for OrderParams {
    const ROOT: &'static str = "order";
}

impl ParamRoot for CustomerParams {
    const ROOT: &'static str = "customer";
}

/// The permitted attributes under `P::ROOT`, from a JSON or urlencoded form body.
///
/// `None` when the root is absent or empty; handlers answer that with 400. Keys outside the
/// root and attributes `P` does not declare are dropped.
pub struct Submission<P>(pub Option<P>);

impl<S, P> FromRequest<S> for Submission<P>
where
    S: Send + Sync,
    P: ParamRoot,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(req.headers());
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| WebError::BadRequest(e.body_text()))?;

        let root = if json {
            json_root(&body, P::ROOT)?
        } else {
            form_root(&body, P::ROOT)
        };

        match root {
            None => Ok(Self(None)),
            Some(fields) => serde_json::from_value(fields)
                .map(|params| Self(Some(params)))
                .map_err(|e| WebError::BadRequest(format!("invalid {} params: {}", P::ROOT, e))),
        }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

fn json_root(body: &[u8], root: &str) -> Result<Option<Value>, WebError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let mut value: Value = serde_json::from_slice(body)
        .map_err(|e| WebError::BadRequest(format!("malformed JSON body: {}", e)))?;
    Ok(match value.get_mut(root).map(Value::take) {
        Some(Value::Object(fields)) if !fields.is_empty() => Some(Value::Object(fields)),
        _ => None,
    })
}

fn form_root(body: &[u8], root: &str) -> Option<Value> {
    let prefix = format!("{}[", root);
    let fields: Map<String, Value> = form_urlencoded::parse(body)
        .filter_map(|(key, value)| {
            let field = key.strip_prefix(prefix.as_str())?.strip_suffix(']')?;
            Some((field.to_string(), Value::String(value.into_owned())))
        })
        .collect();
    (!fields.is_empty()).then_some(Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;
    use axum::body::Body;

    async fn submit<P: ParamRoot>(content_type: &str, body: &str) -> Result<Option<P>, WebError> {
        let request = Request::builder()
            .method("POST")
            .uri("/orders")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        Submission::<P>::from_request(request, &())
            .await
            .map(|Submission(params)| params)
    }

    #[tokio::test]
    async fn test_form_fields_under_root() {
        let params: Option<OrderParams> = submit(
            "application/x-www-form-urlencoded",
            "order%5Bproduct_name%5D=Desk+Lamp&order[product_count]=3&order[id]=9&_method=patch&authenticity_token=x",
        )
        .await
        .unwrap();
        assert_eq!(
            params,
            Some(OrderParams {
                product_name: Some(FieldValue::from("Desk Lamp")),
                product_count: Some(FieldValue::from("3")),
                customer_id: None,
            })
        );
    }

    #[tokio::test]
    async fn test_json_root() {
        let params: Option<OrderParams> = submit(
            "application/json",
            r#"{"order": {"product_count": 50, "admin": true}, "other": 1}"#,
        )
        .await
        .unwrap();
        assert_eq!(
            params.unwrap().product_count,
            Some(FieldValue::Integer(50))
        );
    }

    #[tokio::test]
    async fn test_missing_root_is_none() {
        let form: Option<OrderParams> =
            submit("application/x-www-form-urlencoded", "product_name=Lamp")
                .await
                .unwrap();
        assert!(form.is_none());

        let json: Option<OrderParams> = submit("application/json", r#"{"order": {}}"#)
            .await
            .unwrap();
        assert!(json.is_none());

        let empty: Option<CustomerParams> = submit("application/json", "").await.unwrap();
        assert!(empty.is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let result: Result<Option<OrderParams>, _> = submit("application/json", "{order").await;
        assert!(matches!(result, Err(WebError::BadRequest(_))));
    }

    #[test]
    fn test_format_negotiation() {
        let mut headers = HeaderMap::new();
        assert_eq!(Format::from_headers(&headers), Format::Html);
        headers.insert(
            header::ACCEPT,
            "application/json, text/plain".parse().unwrap(),
        );
        assert_eq!(Format::from_headers(&headers), Format::Json);
    }

    #[tokio::test]
    async fn test_format_from_extension_beats_accept() {
        let request = Request::builder()
            .uri("/orders/1")
            .header(header::ACCEPT, "text/html")
            .extension(Format::Json)
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let format = Format::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(format, Format::Json);
    }
}
