//! Named formats, filters and transforms a pipeline config can refer to.
//!
//! The registry is a plain value handed to [`crate::pipeline::build`]; nothing is
//! registered globally.
//!
//! ```ignore
//! let mut registry = Registry::with_defaults();
//! registry.register_filter("color/only", |token| token.category() == Some("color"));
//! pipeline::build(&config, &registry, &[])?;
//! ```

use convert_case::Case;
use design_token_pipeline_core::{
    filter, format, transforms, Attributes, FormatOptions, Token, TokenError, TokenValue,
};
use indexmap::IndexMap;

use crate::{config::PlatformConfig, error::BuildError};

pub type FormatFn = Box<dyn Fn(&[Token], &FormatOptions) -> Result<String, TokenError>>;
pub type FilterFn = Box<dyn Fn(&Token) -> bool>;
type MatcherFn = Box<dyn Fn(&Token) -> bool>;

enum TransformAction {
    Attribute(Box<dyn Fn(&Token) -> Attributes>),
    Name(Box<dyn Fn(&Token) -> String>),
    Value(Box<dyn Fn(&Token) -> Result<TokenValue, TokenError>>),
}

pub struct Transform {
    matcher: Option<MatcherFn>,
    action: TransformAction,
}
impl Transform {
    pub fn attribute(f: impl Fn(&Token) -> Attributes + 'static) -> Self {
        Self {
            matcher: None,
            action: TransformAction::Attribute(Box::new(f)),
        }
    }
    pub fn name(f: impl Fn(&Token) -> String + 'static) -> Self {
        Self {
            matcher: None,
            action: TransformAction::Name(Box::new(f)),
        }
    }
    pub fn value(
        matcher: impl Fn(&Token) -> bool + 'static,
        f: impl Fn(&Token) -> Result<TokenValue, TokenError> + 'static,
    ) -> Self {
        Self {
            matcher: Some(Box::new(matcher)),
            action: TransformAction::Value(Box::new(f)),
        }
    }
    pub fn matches(&self, token: &Token) -> bool {
        self.matcher.as_ref().map_or(true, |matcher| matcher(token))
    }
    pub fn apply(&self, token: &mut Token) -> Result<(), TokenError> {
        if !self.matches(token) {
            return Ok(());
        }
        match &self.action {
            TransformAction::Attribute(f) => token.attributes = f(token),
            TransformAction::Name(f) => token.name = f(token),
            TransformAction::Value(f) => token.value = f(token)?,
        }
        Ok(())
    }
}

pub struct Registry {
    formats: IndexMap<String, FormatFn>,
    filters: IndexMap<String, FilterFn>,
    transforms: IndexMap<String, Transform>,
    transform_groups: IndexMap<String, Vec<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            formats: IndexMap::new(),
            filters: IndexMap::new(),
            transforms: IndexMap::new(),
            transform_groups: IndexMap::new(),
        }
    }

    /// Registering an existing name replaces the earlier entry.
    pub fn register_format(
        &mut self,
        name: &str,
        format: impl Fn(&[Token], &FormatOptions) -> Result<String, TokenError> + 'static,
    ) {
        self.formats.insert(name.to_string(), Box::new(format));
    }

    pub fn register_filter(&mut self, name: &str, filter: impl Fn(&Token) -> bool + 'static) {
        self.filters.insert(name.to_string(), Box::new(filter));
    }

    pub fn register_transform(&mut self, name: &str, transform: Transform) {
        self.transforms.insert(name.to_string(), transform);
    }

    pub fn register_transform_group(&mut self, name: &str, transforms: &[&str]) {
        self.transform_groups.insert(
            name.to_string(),
            transforms.iter().map(|x| x.to_string()).collect(),
        );
    }

    pub fn format(&self, name: &str) -> Result<&FormatFn, BuildError> {
        self.formats
            .get(name)
            .ok_or_else(|| BuildError::UnknownFormat(name.to_string()))
    }

    pub fn filter(&self, name: &str) -> Result<&FilterFn, BuildError> {
        self.filters
            .get(name)
            .ok_or_else(|| BuildError::UnknownFilter(name.to_string()))
    }

    pub fn transform(&self, name: &str) -> Result<&Transform, BuildError> {
        self.transforms
            .get(name)
            .ok_or_else(|| BuildError::UnknownTransform(name.to_string()))
    }

    /// The platform's transform group followed by its own transforms.
    pub fn platform_transforms<'a>(
        &'a self,
        platform: &'a PlatformConfig,
    ) -> Result<Vec<(&'a str, &'a Transform)>, BuildError> {
        let mut names: Vec<&'a str> = Vec::new();
        if let Some(group) = &platform.transform_group {
            let group = self
                .transform_groups
                .get(group)
                .ok_or_else(|| BuildError::UnknownTransformGroup(group.to_string()))?;
            names.extend(group.iter().map(|x| x.as_str()));
        }
        names.extend(platform.transforms.iter().map(|x| x.as_str()));
        names
            .into_iter()
            .map(|name| -> Result<_, BuildError> { Ok((name, self.transform(name)?)) })
            .collect()
    }

    pub fn list_formats(&self) -> Vec<&str> {
        self.formats.keys().map(|x| x.as_str()).collect()
    }

    pub fn list_filters(&self) -> Vec<&str> {
        self.filters.keys().map(|x| x.as_str()).collect()
    }

    pub fn list_transforms(&self) -> Vec<&str> {
        self.transforms.keys().map(|x| x.as_str()).collect()
    }

    pub fn list_transform_groups(&self) -> Vec<&str> {
        self.transform_groups.keys().map(|x| x.as_str()).collect()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register_format("javascript/esm", format::javascript_esm);
        registry.register_format(
            "typescript/esm-declarations",
            format::typescript_esm_declarations,
        );
        registry.register_format("json/flat", format::json_flat);
        registry.register_format("javascript/mui", format::javascript_mui);
        registry.register_format(
            "typescript/mui-declarations",
            format::typescript_mui_declarations,
        );

        registry.register_filter(
            "typography/supported",
            filter::is_supported_typography_leaf,
        );

        registry.register_transform("attribute/cti", Transform::attribute(transforms::cti_attributes));
        for (name, case) in [
            ("name/cti/pascal", Case::Pascal),
            ("name/cti/camel", Case::Camel),
            ("name/cti/kebab", Case::Kebab),
            ("name/cti/constant", Case::UpperSnake),
        ] {
            registry.register_transform(
                name,
                Transform::name(move |token| transforms::cti_name(token, case)),
            );
        }
        registry.register_transform(
            "size/pxToRem",
            Transform::value(transforms::is_px_size, transforms::px_to_rem_value),
        );
        registry.register_transform(
            "color/hex",
            Transform::value(transforms::is_color, transforms::color_to_hex),
        );

        registry.register_transform_group(
            "js",
            &["attribute/cti", "name/cti/pascal", "size/pxToRem", "color/hex"],
        );

        registry
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_registered() {
        let registry = Registry::with_defaults();
        assert_eq!(
            registry.list_formats(),
            vec![
                "javascript/esm",
                "typescript/esm-declarations",
                "json/flat",
                "javascript/mui",
                "typescript/mui-declarations"
            ]
        );
        assert_eq!(registry.list_filters(), vec!["typography/supported"]);
        assert_eq!(registry.list_transform_groups(), vec!["js"]);
        assert!(registry.list_transforms().contains(&"size/pxToRem"));
    }

    #[test]
    fn unknown_names() {
        let registry = Registry::new();
        assert!(matches!(
            registry.format("nope"),
            Err(BuildError::UnknownFormat(_))
        ));
        assert!(matches!(
            registry.filter("nope"),
            Err(BuildError::UnknownFilter(_))
        ));
        let platform = PlatformConfig {
            transform_group: Some("nope".to_string()),
            ..PlatformConfig::default()
        };
        assert!(matches!(
            registry.platform_transforms(&platform),
            Err(BuildError::UnknownTransformGroup(_))
        ));
    }

    #[test]
    fn js_group_transforms_in_order() {
        let registry = Registry::with_defaults();
        let platform = PlatformConfig {
            transform_group: Some("js".to_string()),
            transforms: vec!["name/cti/kebab".to_string()],
            ..PlatformConfig::default()
        };
        let transforms = registry.platform_transforms(&platform).unwrap();
        assert_eq!(
            transforms.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
            vec!["attribute/cti", "name/cti/pascal", "size/pxToRem", "color/hex", "name/cti/kebab"]
        );

        let mut token = Token::new(&["spacing", "lg"], 28, "lg");
        for (_, transform) in &transforms {
            transform.apply(&mut token).unwrap();
        }
        assert_eq!(token.attributes.category.as_deref(), Some("spacing"));
        assert_eq!(token.name, "spacing-lg");
        assert_eq!(token.value, TokenValue::from("2rem"));
        assert_eq!(token.original_value, TokenValue::from(28));
    }

    #[test]
    fn value_transforms_skip_unmatched_tokens() {
        let registry = Registry::with_defaults();
        let mut token = Token::new(&["opacity", "disabled"], "0.5", "x");
        registry.transform("size/pxToRem").unwrap().apply(&mut token).unwrap();
        assert_eq!(token.value, TokenValue::from("0.5"));
    }

    #[test]
    fn custom_entries() {
        let mut registry = Registry::new();
        registry.register_filter("color/only", |token| token.category() == Some("color"));
        registry.register_format("names", |tokens, _| {
            Ok(tokens.iter().map(|x| x.name.as_str()).collect::<Vec<_>>().join(","))
        });
        let tokens = vec![Token::new(&["color", "bg"], "#fff", "Bg")];
        assert!(registry.filter("color/only").unwrap()(&tokens[0]));
        let output = registry.format("names").unwrap()(tokens.as_slice(), &FormatOptions::default()).unwrap();
        assert_eq!(output, "Bg");
    }
}
