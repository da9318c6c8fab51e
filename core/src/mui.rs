use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    token::{Token, TokenValue},
    tree::strip_sentinel,
};

pub const MUI_NAME_PREFIX: &str = "b-";
pub const PALETTE_CATEGORY: &str = "color";
pub const PALETTE_SEGMENT: &str = "palette";

/// `category -> prefixed name -> value`, never deeper.
pub type FlatTokenMap = IndexMap<String, IndexMap<String, TokenValue>>;

fn is_palette(token: &Token) -> bool {
    token.path.first().map(|x| x.as_str()) == Some(PALETTE_CATEGORY)
        && token.path.iter().any(|x| x == PALETTE_SEGMENT)
}

/// Name for the theme: path after the category, dash-joined and prefixed.
pub fn mui_name(token: &Token) -> String {
    let path = strip_sentinel(&token.path);
    format!("{MUI_NAME_PREFIX}{}", path.iter().skip(1).join("-"))
}

pub fn flatten_for_mui(tokens: &[Token]) -> FlatTokenMap {
    let mut map = FlatTokenMap::new();
    for token in tokens.iter().filter(|x| !is_palette(x)) {
        let Some(category) = token.path.first() else {
            continue;
        };
        map.entry(category.clone())
            .or_default()
            .insert(mui_name(token), token.value.clone());
    }
    map
}
