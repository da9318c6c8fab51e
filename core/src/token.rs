use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single design value with its position in the token hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub name: String,
    pub path: Vec<String>,
    pub value: TokenValue,
    /// The value as authored, before any value transform ran.
    pub original_value: TokenValue,
    pub token_type: Option<String>,
    pub comment: Option<String>,
    pub attributes: Attributes,
    pub file_path: Option<PathBuf>,
}
impl Token {
    pub fn new(path: &[&str], value: impl Into<TokenValue>, name: &str) -> Self {
        let value = value.into();
        Self {
            name: name.to_string(),
            path: path.iter().map(|x| x.to_string()).collect(),
            original_value: value.clone(),
            value,
            token_type: None,
            comment: None,
            attributes: Attributes::default(),
            file_path: None,
        }
    }
    pub fn with_type(mut self, token_type: &str) -> Self {
        self.token_type = Some(token_type.to_string());
        self
    }
    /// The CTI category, or the first path segment when no attribute transform ran.
    pub fn category(&self) -> Option<&str> {
        self.attributes
            .category
            .as_deref()
            .or_else(|| self.path.first().map(|x| x.as_str()))
    }
    pub fn leaf_name(&self) -> Option<&str> {
        self.path.last().map(|x| x.as_str())
    }
}

/// Category/type/item classification, filled in by the `attribute/cti` transform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub category: Option<String>,
    pub type_: Option<String>,
    pub item: Option<String>,
    pub subitem: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<TokenValue>),
    Object(IndexMap<String, TokenValue>),
}
impl TokenValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }
    /// The TypeScript type a value of this shape would be declared with.
    pub fn typescript_type(&self) -> String {
        match self {
            TokenValue::Bool(_) => "boolean".to_string(),
            TokenValue::Number(_) => "number".to_string(),
            TokenValue::String(_) => "string".to_string(),
            TokenValue::Object(_) => "object".to_string(),
            TokenValue::List(items) => {
                let mut types = items.iter().map(|x| x.typescript_type());
                match types.next() {
                    Some(first) if types.all(|x| x == first) => format!("{first}[]"),
                    _ => "any[]".to_string(),
                }
            }
        }
    }
}
impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::String(value.to_string())
    }
}
impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::String(value)
    }
}
impl From<i64> for TokenValue {
    fn from(value: i64) -> Self {
        TokenValue::Number(value.into())
    }
}
impl From<i32> for TokenValue {
    fn from(value: i32) -> Self {
        TokenValue::Number(value.into())
    }
}
impl From<bool> for TokenValue {
    fn from(value: bool) -> Self {
        TokenValue::Bool(value)
    }
}
