/// A token value string, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Ref(Vec<String>),
    Dimension(f64, String),
    Number(f64),
    Literal(String),
}
impl Expression {
    pub fn parse(value: &str) -> Expression {
        expr_parser::expr(value.trim())
            .unwrap_or_else(|_| Expression::Literal(value.to_string()))
    }
    pub fn px(&self) -> Option<f64> {
        match self {
            Expression::Dimension(value, unit) if unit == "px" => Some(*value),
            _ => None,
        }
    }
}

/// Dotted reference paths embedded anywhere in `value`, e.g. `1px solid {color.border}`.
pub fn references(value: &str) -> Vec<Vec<String>> {
    expr_parser::references(value).unwrap_or_default()
}

peg::parser! {
  grammar expr_parser() for str {
    rule reference() -> Vec<String>
        = "{" v:($((!['}' | '.'] [_])+) ++ ".") "}" { v.iter().map(|x| x.to_string()).collect() }

    rule number() -> f64
        = n:$("-"? ['0'..='9']+ ("." ['0'..='9']+)?) {? n.parse().or(Err("number")) }

    rule unit() -> &'input str
        = $(['a'..='z' | 'A'..='Z' | '%']+)

    pub(crate) rule expr() -> Expression
        = r:reference() ![_] { Expression::Ref(r) }
        / n:number() u:unit() ![_] { Expression::Dimension(n, u.to_string()) }
        / n:number() ![_] { Expression::Number(n) }
        / v:$([_]*) { Expression::Literal(v.to_string()) }

    rule segment() -> Option<Vec<String>>
        = r:reference() { Some(r) }
        / [_] { None }

    pub(crate) rule references() -> Vec<Vec<String>>
        = s:segment()* { s.into_iter().flatten().collect() }
  }
}
