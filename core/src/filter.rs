use crate::token::Token;

pub const TYPOGRAPHY_CATEGORY: &str = "typography";

/// Typography leaves the theme has no slot for.
pub const UNSUPPORTED_TYPOGRAPHY_LEAVES: [&str; 7] = [
    "textDecoration",
    "fontFamily",
    "fontStyle",
    "fontStretch",
    "letterSpacing",
    "paragraphIndent",
    "paragraphSpacing",
];

pub fn is_supported_typography_leaf(token: &Token) -> bool {
    if token.category() != Some(TYPOGRAPHY_CATEGORY) {
        return true;
    }
    match token.leaf_name() {
        Some(leaf) => !UNSUPPORTED_TYPOGRAPHY_LEAVES.contains(&leaf),
        None => true,
    }
}
