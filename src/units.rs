/// How pixel lengths are written into CSS.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthMode {
    /// `to_rem(<px>)`, resolved later by the stylesheet's preprocessor.
    #[default]
    Rem,
    /// Literal `<px>px`.
    Px,
}

/// Shortest decimal form of a number: `16`, `1.5`, `-2`.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{v}")
}

/// Relative-unit representation of a pixel value.
pub fn length_token(px: f64) -> String {
    format!("to_rem({})", format_number(px))
}

pub fn format_length(px: f64, mode: LengthMode) -> String {
    match mode {
        LengthMode::Rem => length_token(px),
        LengthMode::Px => format!("{}px", format_number(px)),
    }
}

/// Format a length only when it is present and non-zero.
pub fn non_zero_length(px: Option<f64>, mode: LengthMode) -> Option<String> {
    px.filter(|v| *v != 0.0).map(|v| format_length(v, mode))
}
