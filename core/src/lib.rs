//! Pure token reshaping: source parsing, transforms, tree building and output rendering.

pub mod error;
pub mod expression;
pub mod filter;
pub mod format;
pub mod mui;
pub mod source;
pub mod token;
pub mod transforms;
pub mod tree;
pub mod units;

pub use error::TokenError;
pub use format::FormatOptions;
pub use mui::{flatten_for_mui, FlatTokenMap};
pub use source::TokenOrGroup;
pub use token::{Attributes, Token, TokenValue};
pub use tree::{build_tree, strip_sentinel, TokenNode, TokenTree, TreeMode, TreeOptions};
pub use units::{px_to_base_size, px_to_rem};

pub fn parse_design_tokens(data: &str) -> Result<TokenOrGroup, serde_json::Error> {
    serde_json::from_str(data)
}

#[test]
fn end_to_end() {
    let data = r##"{
        "color": {
            "bg": {
                "_": { "value": "#ffffff" },
                "subtle": { "value": "#eeeeee" }
            }
        },
        "spacing": { "_": { "value": 16 } }
    }"##;
    let mut tokens = parse_design_tokens(data).unwrap().flatten(None);
    for token in &mut tokens {
        token.name = transforms::cti_name(token, convert_case::Case::Pascal);
    }
    let tree = build_tree(&tokens, TreeOptions::default());
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        serde_json::json!({
            "color": {
                "bg": {
                    "name": "ColorBg",
                    "value": "#ffffff",
                    "subtle": { "name": "ColorBgSubtle", "value": "#eeeeee" }
                }
            },
            "spacing": { "name": "Spacing", "value": 16 }
        })
    );
}
