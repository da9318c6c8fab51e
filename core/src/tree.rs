use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::token::{Token, TokenValue};

/// Path segment marking the default variant of a group.
pub const SENTINEL: &str = "_";

pub fn strip_sentinel(path: &[String]) -> Vec<&str> {
    path.iter()
        .map(|x| x.as_str())
        .filter(|x| *x != SENTINEL)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeMode {
    /// Leaves carry the token's value and name.
    #[default]
    Values,
    /// Leaves carry TypeScript type labels, for declaration output.
    Types,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    pub mode: TreeMode,
    pub with_name: bool,
    pub with_type: bool,
}
impl TreeOptions {
    pub fn types() -> Self {
        Self {
            mode: TreeMode::Types,
            ..Self::default()
        }
    }
}
impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            mode: TreeMode::Values,
            with_name: true,
            with_type: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub value: TokenValue,
    pub name: Option<String>,
    pub type_: Option<String>,
}
impl Leaf {
    fn from_token(token: &Token, options: TreeOptions) -> Self {
        let (value, name, type_) = match options.mode {
            TreeMode::Values => (
                token.value.clone(),
                token.name.clone(),
                token.token_type.clone(),
            ),
            TreeMode::Types => (
                TokenValue::String(token.value.typescript_type()),
                "string".to_string(),
                token.token_type.as_ref().map(|_| "string".to_string()),
            ),
        };
        Leaf {
            value,
            name: options.with_name.then_some(name),
            type_: type_.filter(|_| options.with_type),
        }
    }
}

/// A node of the token tree. `color.bg` can hold a leaf and still have a `subtle` child.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenNode {
    pub leaf: Option<Leaf>,
    pub children: IndexMap<String, TokenNode>,
    /// Number of children that existed when the leaf was first set.
    leaf_position: usize,
}
impl TokenNode {
    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.children.get(key)
    }
    fn insert(&mut self, path: &[&str], leaf: Leaf) {
        let mut node = self;
        for segment in path {
            node = node.children.entry(segment.to_string()).or_default();
        }
        if node.leaf.is_none() {
            node.leaf_position = node.children.len();
        }
        node.leaf = Some(leaf);
    }
    fn serialize_leaf<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        let Some(leaf) = &self.leaf else {
            return Ok(());
        };
        if !self.children.contains_key("value") {
            map.serialize_entry("value", &leaf.value)?;
        }
        if let Some(name) = leaf.name.as_ref().filter(|_| !self.children.contains_key("name")) {
            map.serialize_entry("name", name)?;
        }
        if let Some(type_) = leaf.type_.as_ref().filter(|_| !self.children.contains_key("type")) {
            map.serialize_entry("type", type_)?;
        }
        Ok(())
    }
}
impl Serialize for TokenNode {
    /// Leaf fields sit where the leaf was first assigned among the children.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (index, (key, child)) in self.children.iter().enumerate() {
            if index == self.leaf_position {
                self.serialize_leaf(&mut map)?;
            }
            map.serialize_entry(key, child)?;
        }
        if self.leaf_position >= self.children.len() {
            self.serialize_leaf(&mut map)?;
        }
        map.end()
    }
}

pub type TokenTree = TokenNode;

/// Nests `tokens` by their sentinel-free paths. Later tokens overwrite earlier leaves.
pub fn build_tree(tokens: &[Token], options: TreeOptions) -> TokenTree {
    let mut root = TokenNode::default();
    for token in tokens {
        root.insert(&strip_sentinel(&token.path), Leaf::from_token(token, options));
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tokens() -> Vec<Token> {
        vec![
            Token::new(&["color", "bg", "_"], "#ffffff", "Background"),
            Token::new(&["color", "bg", "subtle"], "#eeeeee", "BackgroundSubtle"),
            Token::new(&["spacing", "_"], 16, "Spacing"),
        ]
    }

    #[test]
    fn strips_sentinels() {
        let path = vec!["_".to_string(), "a".to_string(), "_".to_string()];
        assert_eq!(strip_sentinel(&path), vec!["a"]);
    }

    #[test]
    fn sentinel_leaf_lands_on_parent() {
        let tree = build_tree(sample_tokens().as_slice(), TreeOptions::default());
        let bg = tree.get("color").and_then(|x| x.get("bg")).unwrap();
        assert_eq!(bg.leaf.as_ref().unwrap().value, TokenValue::from("#ffffff"));
        assert!(bg.get("_").is_none());
        let spacing = tree.get("spacing").unwrap();
        assert_eq!(spacing.leaf.as_ref().unwrap().value, TokenValue::from(16));
    }

    #[test]
    fn builds_plain_tree() {
        let tree = build_tree(&sample_tokens(), TreeOptions::default());
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({
                "color": {
                    "bg": {
                        "name": "Background",
                        "value": "#ffffff",
                        "subtle": {
                            "name": "BackgroundSubtle",
                            "value": "#eeeeee"
                        }
                    }
                },
                "spacing": {
                    "name": "Spacing",
                    "value": 16
                }
            })
        );
    }

    #[test]
    fn builds_typed_tree() {
        let tree = build_tree(&sample_tokens(), TreeOptions::types());
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({
                "color": {
                    "bg": {
                        "name": "string",
                        "value": "string",
                        "subtle": {
                            "name": "string",
                            "value": "string"
                        }
                    }
                },
                "spacing": {
                    "name": "string",
                    "value": "number"
                }
            })
        );
    }

    #[test]
    fn optional_leaf_fields() {
        let tokens = vec![Token::new(&["color", "bg"], "#ffffff", "Background").with_type("color")];
        let options = TreeOptions {
            with_name: false,
            with_type: true,
            ..TreeOptions::default()
        };
        assert_eq!(
            serde_json::to_value(build_tree(&tokens, options)).unwrap(),
            json!({ "color": { "bg": { "value": "#ffffff", "type": "color" } } })
        );
    }

    #[test]
    fn sentinel_only_path_collapses_to_root() {
        let tokens = vec![Token::new(&["_"], "#000000", "Root")];
        let tree = build_tree(&tokens, TreeOptions::default());
        assert!(tree.children.is_empty());
        assert_eq!(tree.leaf.unwrap().name.as_deref(), Some("Root"));
    }

    #[test]
    fn last_write_wins() {
        let tokens = vec![
            Token::new(&["color", "bg"], "#ffffff", "First"),
            Token::new(&["color", "bg", "_"], "#000000", "Second"),
        ];
        let tree = build_tree(&tokens, TreeOptions::default());
        let leaf = tree.get("color").and_then(|x| x.get("bg")).unwrap().leaf.clone();
        assert_eq!(leaf.unwrap().name.as_deref(), Some("Second"));
    }

    #[test]
    fn leaf_keeps_its_first_position() {
        let tokens = vec![
            Token::new(&["color", "bg", "subtle"], "#eeeeee", "BackgroundSubtle"),
            Token::new(&["color", "bg", "_"], "#ffffff", "Background"),
            Token::new(&["color", "bg", "strong"], "#cccccc", "BackgroundStrong"),
            Token::new(&["color", "bg"], "#fafafa", "BackgroundOverride"),
        ];
        let tree = build_tree(&tokens, TreeOptions::default());
        let rendered = serde_json::to_string(tree.get("color").unwrap()).unwrap();
        assert_eq!(
            rendered,
            r##"{"bg":{"subtle":{"value":"#eeeeee","name":"BackgroundSubtle"},"value":"#fafafa","name":"BackgroundOverride","strong":{"value":"#cccccc","name":"BackgroundStrong"}}}"##
        );
    }

    #[test]
    fn rebuilding_is_stable() {
        let tokens = sample_tokens();
        assert_eq!(
            build_tree(&tokens, TreeOptions::default()),
            build_tree(&tokens, TreeOptions::default())
        );
    }
}
