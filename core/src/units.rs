/// Root font size, in pixels, that `rem` values are relative to.
pub const BASE_FONT_SIZE: f64 = 14.0;
pub const DEFAULT_PRECISION: usize = 3;

/// `px / BASE_FONT_SIZE`, rounded to at most `precision` fractional digits.
pub fn px_to_base_size(px: f64, precision: usize) -> String {
    format_decimal(px / BASE_FONT_SIZE, precision)
}

pub fn px_to_rem(px: f64) -> String {
    px_to_rem_with_precision(px, DEFAULT_PRECISION)
}

pub fn px_to_rem_with_precision(px: f64, precision: usize) -> String {
    format!("{}rem", px_to_base_size(px, precision))
}

/// Formats without padding: trailing zeros and a bare decimal point are dropped.
/// Ties round away from zero.
pub fn format_decimal(value: f64, precision: usize) -> String {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    let formatted = format!("{:.*}", precision, rounded);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
