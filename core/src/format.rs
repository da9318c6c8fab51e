use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::TokenError,
    expression::references,
    mui::flatten_for_mui,
    token::{Token, TokenValue},
    tree::{build_tree, TokenTree, TreeMode, TreeOptions},
};

/// Per-file options, as written under `files[].options` in the pipeline config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub show_file_header: bool,
    pub output_references: bool,
    pub include_name: bool,
    pub include_type: bool,
}
impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            show_file_header: true,
            output_references: false,
            include_name: true,
            include_type: false,
        }
    }
}
impl FormatOptions {
    fn tree_options(&self, mode: TreeMode) -> TreeOptions {
        TreeOptions {
            mode,
            with_name: self.include_name,
            with_type: self.include_type,
        }
    }
}

pub fn file_header(options: &FormatOptions) -> String {
    if options.show_file_header {
        "/**\n * Do not edit directly\n * Generated by design-token-pipeline\n */\n\n".to_string()
    } else {
        String::new()
    }
}

/// Makes a token key usable as a JavaScript binding name.
pub fn js_identifier(key: &str) -> String {
    let ident = deunicode::deunicode(key)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '$' { c } else { '_' })
        .collect::<String>();
    match ident.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{ident}"),
        None => "_".to_string(),
        _ => ident,
    }
}

fn render_exports<T: Serialize>(
    header: String,
    entries: impl Iterator<Item = (String, T)>,
    separator: &str,
) -> Result<(String, Vec<String>), TokenError> {
    let mut result = header;
    let mut names = Vec::new();
    for (key, value) in entries {
        let name = js_identifier(&key);
        result += &format!(
            "export const {name}{separator}{};\n\n",
            serde_json::to_string_pretty(&value)?
        );
        names.push(name);
    }
    Ok((result, names))
}

fn default_export(names: &[String]) -> String {
    format!("export default {{\n{}}};", names.join(",\n"))
}

/// One named export per category plus a default export aggregating them.
pub fn javascript_esm(tokens: &[Token], options: &FormatOptions) -> Result<String, TokenError> {
    let tree = build_tree(tokens, options.tree_options(TreeMode::Values));
    let (result, names) = render_exports(file_header(options), categories(&tree), " = ")?;
    Ok(result + &default_export(&names))
}

/// Declarations matching `javascript/esm`, with leaf values replaced by type labels.
pub fn typescript_esm_declarations(
    tokens: &[Token],
    options: &FormatOptions,
) -> Result<String, TokenError> {
    let tree = build_tree(tokens, options.tree_options(TreeMode::Types));
    let (result, _) = render_exports(file_header(options), categories(&tree), ": ")?;
    // Quotes around both keys and type labels go; keys that need quoting break here.
    Ok(result.replace('"', ""))
}

fn categories(tree: &TokenTree) -> impl Iterator<Item = (String, &TokenTree)> {
    tree.children.iter().map(|(key, node)| (key.clone(), node))
}

/// `name -> value` for every token.
pub fn json_flat(tokens: &[Token], options: &FormatOptions) -> Result<String, TokenError> {
    let flat = tokens
        .iter()
        .map(|token| {
            let value = match &token.original_value {
                TokenValue::String(original)
                    if options.output_references && !references(original).is_empty() =>
                {
                    &token.original_value
                }
                _ => &token.value,
            };
            (token.name.clone(), value)
        })
        .collect::<IndexMap<_, _>>();
    Ok(serde_json::to_string_pretty(&flat)? + "\n")
}

pub fn javascript_mui(tokens: &[Token], options: &FormatOptions) -> Result<String, TokenError> {
    let map = flatten_for_mui(tokens);
    let (result, names) = render_exports(file_header(options), map.into_iter(), " = ")?;
    Ok(result + &default_export(&names))
}

pub fn typescript_mui_declarations(
    tokens: &[Token],
    options: &FormatOptions,
) -> Result<String, TokenError> {
    let mut result = file_header(options);
    for (category, values) in flatten_for_mui(tokens) {
        let fields = values
            .iter()
            .map(|(name, value)| -> Result<String, TokenError> {
                Ok(format!(
                    "  {}: {};",
                    serde_json::to_string(name)?,
                    value.typescript_type()
                ))
            })
            .collect::<Result<Vec<_>, TokenError>>()?;
        result += &format!(
            "export const {}: {{\n{}\n}};\n\n",
            js_identifier(&category),
            fields.iter().join("\n")
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tokens() -> Vec<Token> {
        vec![
            Token::new(&["color", "bg", "_"], "#ffffff", "Background"),
            Token::new(&["color", "bg", "subtle"], "#eeeeee", "BackgroundSubtle"),
            Token::new(&["spacing", "_"], 16, "Spacing"),
        ]
    }

    fn no_header() -> FormatOptions {
        FormatOptions {
            show_file_header: false,
            ..FormatOptions::default()
        }
    }

    #[test]
    fn header_banner() {
        let output = javascript_esm(&sample_tokens(), &FormatOptions::default()).unwrap();
        assert!(output.starts_with("/**\n * Do not edit directly\n"));
        assert!(!javascript_esm(&sample_tokens(), &no_header())
            .unwrap()
            .starts_with("/**"));
    }

    #[test]
    fn renders_esm() {
        let output = javascript_esm(&sample_tokens(), &no_header()).unwrap();
        assert_eq!(
            output,
            r##"export const color = {
  "bg": {
    "value": "#ffffff",
    "name": "Background",
    "subtle": {
      "value": "#eeeeee",
      "name": "BackgroundSubtle"
    }
  }
};

export const spacing = {
  "value": 16,
  "name": "Spacing"
};

export default {
color,
spacing};"##
        );
    }

    #[test]
    fn renders_declarations_without_quotes() {
        let output = typescript_esm_declarations(&sample_tokens(), &no_header()).unwrap();
        assert_eq!(
            output,
            r#"export const color: {
  bg: {
    value: string,
    name: string,
    subtle: {
      value: string,
      name: string
    }
  }
};

export const spacing: {
  value: number,
  name: string
};

"#
        );
    }

    #[test]
    fn flat_json_keeps_references_on_request() {
        let mut token = Token::new(&["color", "fg"], "{color.base.black}", "ColorFg");
        token.value = TokenValue::from("#000000");
        let tokens = vec![token];

        let resolved: serde_json::Value =
            serde_json::from_str(&json_flat(&tokens, &FormatOptions::default()).unwrap()).unwrap();
        assert_eq!(resolved["ColorFg"], "#000000");

        let options = FormatOptions {
            output_references: true,
            ..FormatOptions::default()
        };
        let preserved: serde_json::Value =
            serde_json::from_str(&json_flat(&tokens, &options).unwrap()).unwrap();
        assert_eq!(preserved["ColorFg"], "{color.base.black}");
    }

    #[test]
    fn renders_mui_modules() {
        let mut tokens = sample_tokens();
        tokens.push(Token::new(&["color", "palette", "blue"], "#0000ff", "Blue"));

        let output = javascript_mui(&tokens, &no_header()).unwrap();
        assert!(output.contains("export const color = {\n  \"b-bg\": \"#ffffff\",\n  \"b-bg-subtle\": \"#eeeeee\"\n};"));
        assert!(output.contains("export const spacing = {\n  \"b-\": 16\n};"));
        assert!(!output.contains("b-palette"));
        assert!(output.ends_with("export default {\ncolor,\nspacing};"));

        let output = typescript_mui_declarations(&tokens, &no_header()).unwrap();
        assert!(output.contains("export const color: {\n  \"b-bg\": string;\n  \"b-bg-subtle\": string;\n};"));
        assert!(output.contains("\"b-\": number;"));
    }

    #[test]
    fn identifiers() {
        assert_eq!(js_identifier("color"), "color");
        assert_eq!(js_identifier("font-size"), "font_size");
        assert_eq!(js_identifier("2xl"), "_2xl");
        assert_eq!(js_identifier("café"), "cafe");
    }
}
