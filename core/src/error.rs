use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token `{token}` has an invalid color value `{value}`: {message}")]
    InvalidColor {
        token: String,
        value: String,
        message: String,
    },
    #[error("token `{token}` has a non-finite dimension")]
    NonFiniteDimension { token: String },
    #[error("failed to render tokens: {0}")]
    Render(#[from] serde_json::Error),
}
