//! Manual cookie handling for the session token and one-shot flash
//! messages.
//!
//! Kept at the header level on purpose: the only cookies are the opaque
//! session token and the flash payload, both set and consumed here.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{AppendHeaders, Html, IntoResponse, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use estoque_auth::SessionToken;

const SESSION_COOKIE: &str = "sessao";
const FLASH_COOKIE: &str = "aviso";

/// Severity of a flash message; doubles as its CSS class in the views.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Danger,
    Warning,
    Info,
}

impl FlashLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
            FlashLevel::Warning => "warning",
            FlashLevel::Info => "info",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "success" => Some(FlashLevel::Success),
            "danger" => Some(FlashLevel::Danger),
            "warning" => Some(FlashLevel::Warning),
            "info" => Some(FlashLevel::Info),
            _ => None,
        }
    }
}

/// One-shot notification shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Success, message: message.into() }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Danger, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Warning, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Info, message: message.into() }
    }
}

fn cookie_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Session token from the request, if the cookie parses.
pub fn session_token(headers: &HeaderMap) -> Option<SessionToken> {
    cookie_value(headers, SESSION_COOKIE)?.parse().ok()
}

/// Decode the pending flash, if any.
pub fn pending_flash(headers: &HeaderMap) -> Option<Flash> {
    let raw = cookie_value(headers, FLASH_COOKIE)?;
    let decoded = String::from_utf8(URL_SAFE_NO_PAD.decode(raw).ok()?).ok()?;
    let (tag, message) = decoded.split_once('\t')?;
    Some(Flash {
        level: FlashLevel::from_tag(tag)?,
        message: message.to_string(),
    })
}

/// Render an HTML page; when `consume_flash` is set, the flash cookie is
/// cleared so the notification shows exactly once.
pub fn html(body: String, consume_flash: bool) -> Response {
    let mut response = Html(body).into_response();
    if consume_flash {
        response
            .headers_mut()
            .append(header::SET_COOKIE, clear_cookie(FLASH_COOKIE));
    }
    response
}

/// Redirect that carries a flash for the next rendered page.
pub fn redirect_with_flash(location: &str, flash: Flash) -> Response {
    (
        StatusCode::SEE_OTHER,
        AppendHeaders([
            (header::LOCATION, location_value(location)),
            (header::SET_COOKIE, flash_cookie(&flash)),
        ]),
    )
        .into_response()
}

/// Redirect after a successful login: session cookie plus flash.
pub fn login_redirect(token: SessionToken, flash: Flash) -> Response {
    (
        StatusCode::SEE_OTHER,
        AppendHeaders([
            (header::LOCATION, location_value("/")),
            (header::SET_COOKIE, session_cookie(token)),
            (header::SET_COOKIE, flash_cookie(&flash)),
        ]),
    )
        .into_response()
}

/// Redirect after logout: the session cookie is dropped.
pub fn logout_redirect(flash: Flash) -> Response {
    (
        StatusCode::SEE_OTHER,
        AppendHeaders([
            (header::LOCATION, location_value("/login")),
            (header::SET_COOKIE, clear_cookie(SESSION_COOKIE)),
            (header::SET_COOKIE, flash_cookie(&flash)),
        ]),
    )
        .into_response()
}

fn location_value(location: &str) -> HeaderValue {
    HeaderValue::from_str(location).unwrap_or_else(|_| HeaderValue::from_static("/"))
}

fn session_cookie(token: SessionToken) -> HeaderValue {
    // The token is a uuid; always header-safe.
    HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax"))
        .unwrap_or_else(|_| clear_cookie(SESSION_COOKIE))
}

fn flash_cookie(flash: &Flash) -> HeaderValue {
    let payload = URL_SAFE_NO_PAD.encode(format!("{}\t{}", flash.level.css_class(), flash.message));
    // base64 output is always header-safe.
    HeaderValue::from_str(&format!("{FLASH_COOKIE}={payload}; Path=/; HttpOnly"))
        .unwrap_or_else(|_| clear_cookie(FLASH_COOKIE))
}

fn clear_cookie(name: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{name}=; Path=/; HttpOnly; Max-Age=0"))
        .unwrap_or_else(|_| HeaderValue::from_static(""))
}
