use convert_case::{Case, Casing};
use itertools::Itertools;

use crate::{
    error::TokenError,
    expression::{references, Expression},
    token::{Attributes, Token, TokenValue},
    units::px_to_rem,
};

/// Categories whose bare numbers are pixel sizes.
pub const SIZE_CATEGORIES: [&str; 2] = ["size", "spacing"];
pub const COLOR_CATEGORY: &str = "color";

pub fn cti_attributes(token: &Token) -> Attributes {
    let segment = |i: usize| token.path.get(i).cloned();
    Attributes {
        category: segment(0),
        type_: segment(1),
        item: segment(2),
        subitem: segment(3),
        state: segment(4),
    }
}

pub fn cti_name(token: &Token, case: Case) -> String {
    token.path.iter().join(" ").to_case(case)
}

pub fn is_px_size(token: &Token) -> bool {
    match &token.value {
        TokenValue::String(value) => Expression::parse(value).px().is_some(),
        TokenValue::Number(_) => token
            .category()
            .map_or(false, |x| SIZE_CATEGORIES.contains(&x)),
        _ => false,
    }
}

pub fn px_to_rem_value(token: &Token) -> Result<TokenValue, TokenError> {
    let px = match &token.value {
        TokenValue::String(value) => Expression::parse(value).px(),
        value => value.as_f64(),
    };
    match px {
        Some(px) if px.is_finite() => Ok(TokenValue::String(px_to_rem(px))),
        _ => Err(TokenError::NonFiniteDimension {
            token: token.name.clone(),
        }),
    }
}

pub fn is_color(token: &Token) -> bool {
    let typed_color = token.token_type.as_deref() == Some(COLOR_CATEGORY)
        || token.category() == Some(COLOR_CATEGORY);
    match &token.value {
        TokenValue::String(value) => typed_color && references(value).is_empty(),
        _ => false,
    }
}

pub fn color_to_hex(token: &Token) -> Result<TokenValue, TokenError> {
    let value = token.value.as_str().unwrap_or_default();
    csscolorparser::parse(value)
        .map(|color| TokenValue::String(color.to_hex_string()))
        .map_err(|err| TokenError::InvalidColor {
            token: token.name.clone(),
            value: value.to_string(),
            message: err.to_string(),
        })
}
