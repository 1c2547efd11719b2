//! Parsing of the closed label enumerations (roles, statuses, priorities).

/// Error returned when a label does not name any variant of an enumeration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}': expected one of {expected}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: String,
}

/// Looks up a variant by its label.
///
/// Matching ignores ASCII case and any spaces, dashes or underscores, so
/// `"In Progress"`, `"in-progress"` and `"InProgress"` are equivalent.
pub fn parse_label<T: Copy>(
    kind: &'static str,
    input: &str,
    variants: &[T],
    label: impl Fn(T) -> &'static str,
) -> Result<T, ParseEnumError> {
    let wanted = normalize(input);
    variants
        .iter()
        .copied()
        .find(|variant| normalize(label(*variant)) == wanted)
        .ok_or_else(|| ParseEnumError {
            kind,
            value: input.to_string(),
            expected: variants
                .iter()
                .map(|variant| label(*variant))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
