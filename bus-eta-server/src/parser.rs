//! Free-text SMS parser.
//!
//! Users text a location followed by a route number. Three shapes are
//! accepted, tried in this order; the first that matches wins:
//!
//! 1. `Central Station Route 45` - the word "route" (any case) before the digits
//! 2. `Bus Stop A R12` - an `r`/`R` prefix glued to the digits
//! 3. `MG Road 23` - bare trailing digits
//!
//! The route token is always the final whitespace-separated token and the
//! location is everything before it, trimmed. The order matters for inputs
//! that fit more than one shape: `Depot Route 9` yields location `Depot`,
//! never `Depot Route`. A location never spans lines, and route digits may
//! be any Unicode decimal digits (`MG Road २३` is a valid request).

use std::panic;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::error;

/// Reply sent when the text has no recognisable shape.
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid format. Send: Location RouteNumber";

/// Reply sent when processing fails internally.
pub const PROCESSING_ERROR_MESSAGE: &str = "Error processing your request. Please try again.";

/// Outcome of parsing one inbound message.
///
/// `valid` implies both `location` and `route` are non-empty and `error`
/// is empty; otherwise `error` is non-empty and the other two are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub location: String,
    pub route: String,
    pub valid: bool,
    pub error: String,
}

impl ParseResult {
    fn matched(location: &str, route: &str) -> Self {
        Self {
            location: location.to_string(),
            route: route.to_string(),
            valid: true,
            error: String::new(),
        }
    }

    fn rejected(error: &str) -> Self {
        Self {
            location: String::new(),
            route: String::new(),
            valid: false,
            error: error.to_string(),
        }
    }
}

/// Parse an inbound SMS into a location and route number.
pub fn parse_sms_input(message_text: &str) -> ParseResult {
    panic::catch_unwind(|| parse_shapes(message_text)).unwrap_or_else(|_| {
        error!("panic while parsing SMS input");
        ParseResult::rejected(PROCESSING_ERROR_MESSAGE)
    })
}

fn parse_shapes(message_text: &str) -> ParseResult {
    let text = message_text.trim();
    if text.is_empty() {
        return ParseResult::rejected(INVALID_FORMAT_MESSAGE);
    }

    // Every shape needs whitespace between the location and the route token.
    let Some((head, token)) = split_last_token(text) else {
        return ParseResult::rejected(INVALID_FORMAT_MESSAGE);
    };

    if let Some((location, route)) = match_route_keyword(head, token) {
        return ParseResult::matched(location, route);
    }

    let location = head.trim();
    if !is_single_line(location) {
        return ParseResult::rejected(INVALID_FORMAT_MESSAGE);
    }

    if let Some(route) = match_prefixed_route(token) {
        return ParseResult::matched(location, route);
    }

    if is_digits(token) {
        return ParseResult::matched(location, token);
    }

    ParseResult::rejected(INVALID_FORMAT_MESSAGE)
}

/// Split trimmed text into everything before the last whitespace run and the
/// final token. `None` if the text is a single token.
fn split_last_token(text: &str) -> Option<(&str, &str)> {
    let (head, token) = text.rsplit_once(char::is_whitespace)?;
    let head = head.trim_end();
    if head.is_empty() {
        return None;
    }
    Some((head, token))
}

/// `<location> route <digits>`
fn match_route_keyword<'a>(head: &'a str, token: &'a str) -> Option<(&'a str, &'a str)> {
    if !is_digits(token) {
        return None;
    }
    let (location, keyword) = head.rsplit_once(char::is_whitespace)?;
    let location = location.trim();
    if !keyword.eq_ignore_ascii_case("route") || location.is_empty() {
        return None;
    }
    if !is_single_line(location) {
        return None;
    }
    Some((location, token))
}

/// `r<digits>` or `R<digits>`, returning the digits.
fn match_prefixed_route(token: &str) -> Option<&str> {
    let digits = token
        .strip_prefix('r')
        .or_else(|| token.strip_prefix('R'))?;
    is_digits(digits).then_some(digits)
}

/// One or more Unicode decimal digits (general category `Nd`).
static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("digit pattern is valid"));

fn is_digits(s: &str) -> bool {
    DIGITS.is_match(s)
}

fn is_single_line(location: &str) -> bool {
    !location.contains('\n')
}
