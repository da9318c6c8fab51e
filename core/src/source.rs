use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::token::{Attributes, Token, TokenValue};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TokenOrGroup {
    Token {
        #[serde(alias = "$value")]
        value: TokenValue,
        #[serde(rename = "type", alias = "$type", default)]
        type_: Option<String>,
        #[serde(alias = "description", alias = "$description", default)]
        comment: Option<String>,
    },
    Group(IndexMap<String, TokenOrGroup>),
}
impl TokenOrGroup {
    /// Tokens in document order.
    pub fn flatten(&self, file_path: Option<&Path>) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.flatten_into(&mut Vec::new(), file_path, &mut tokens);
        tokens
    }
    fn flatten_into(&self, path: &mut Vec<String>, file_path: Option<&Path>, out: &mut Vec<Token>) {
        match self {
            TokenOrGroup::Token {
                value,
                type_,
                comment,
            } => out.push(Token {
                name: path.last().cloned().unwrap_or_default(),
                path: path.clone(),
                value: value.clone(),
                original_value: value.clone(),
                token_type: type_.clone(),
                comment: comment.clone(),
                attributes: Attributes::default(),
                file_path: file_path.map(PathBuf::from),
            }),
            TokenOrGroup::Group(group) => {
                for (key, value) in group {
                    path.push(key.clone());
                    value.flatten_into(path, file_path, out);
                    path.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> TokenOrGroup {
        serde_json::from_str(data).unwrap()
    }

    #[test]
    fn flattens_in_document_order() {
        let tokens = parse(
            r##"{
                "color": {
                    "bg": {
                        "_": { "value": "#ffffff", "type": "color" },
                        "subtle": { "$value": "#eeeeee", "description": "Muted" }
                    }
                },
                "spacing": { "_": { "value": 16 } }
            }"##,
        )
        .flatten(Some(Path::new("tokens/base.json")));
        let paths = tokens.iter().map(|x| x.path.join(".")).collect::<Vec<_>>();
        assert_eq!(paths, vec!["color.bg._", "color.bg.subtle", "spacing._"]);
        assert_eq!(tokens[0].token_type.as_deref(), Some("color"));
        assert_eq!(tokens[1].comment.as_deref(), Some("Muted"));
        assert_eq!(tokens[1].name, "subtle");
        assert_eq!(tokens[2].value, TokenValue::from(16));
        assert_eq!(
            tokens[2].file_path.as_deref(),
            Some(Path::new("tokens/base.json"))
        );
    }

    #[test]
    fn composite_values_stay_tokens() {
        let tokens = parse(
            r#"{ "typography": { "body": { "value": { "fontSize": "14px", "fontWeight": 400 } } } }"#,
        )
        .flatten(None);
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].value, TokenValue::Object(_)));
    }
}
