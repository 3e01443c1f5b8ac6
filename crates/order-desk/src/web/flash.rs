//! One-shot messages carried across a redirect in the `flash` cookie.
//!
//! A redirect sets the cookie; the next HTML page shows the message and clears it.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use std::convert::Infallible;
use url::form_urlencoded;

pub const COOKIE_NAME: &str = "flash";

/// Expires the cookie.
pub const CLEAR_COOKIE: &str = "flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Notice,
    Alert,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashKind::Notice => "notice",
            FlashKind::Alert => "alert",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "notice" => Some(FlashKind::Notice),
            "alert" => Some(FlashKind::Alert),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Notice,
            message: message.into(),
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Alert,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value carrying this flash to the next request.
    pub fn set_cookie(&self) -> String {
        let value = form_urlencoded::Serializer::new(String::new())
            .append_pair("kind", self.kind.as_str())
            .append_pair("message", &self.message)
            .finish();
        format!("{}={}; Path=/; HttpOnly; SameSite=Lax", COOKIE_NAME, value)
    }

    /// Reads the flash from a request's `Cookie` headers, ignoring anything malformed.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .and_then(|(_, value)| Self::decode(value))
    }

    fn decode(value: &str) -> Option<Self> {
        let mut kind = None;
        let mut message = None;
        for (key, v) in form_urlencoded::parse(value.as_bytes()) {
            match key.as_ref() {
                "kind" => kind = FlashKind::parse(&v),
                "message" => message = Some(v.into_owned()),
                _ => {}
            }
        }
        Some(Self {
            kind: kind?,
            message: message?,
        })
    }
}

/// The flash left by the previous response, if any.
pub struct PendingFlash(pub Option<Flash>);

impl<S: Send + Sync> FromRequestParts<S> for PendingFlash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(Flash::from_headers(&parts.headers)))
    }
}
