use std::collections::BTreeMap;

use crate::error::ScriptBookError;

/// Named values available to `{name}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: BTreeMap<String, String>,
}

impl Placeholders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
}

/// Replaces `{name}` tokens in `text`.
///
/// Braces that do not enclose a well-formed name (lowercase ASCII, digits, `_`)
/// are copied through untouched.
pub fn interpolate(text: &str, values: &Placeholders) -> Result<String, ScriptBookError> {
    let mut rendered = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            rendered.push('{');
            rest = after_open;
            continue;
        };

        let name = &after_open[..close];
        if !is_placeholder_name(name) {
            rendered.push('{');
            rest = after_open;
            continue;
        }

        let Some(value) = values.get(name) else {
            return Err(ScriptBookError::UnknownPlaceholder {
                name: name.to_string(),
                line: text.to_string(),
            });
        };

        rendered.push_str(value);
        rest = &after_open[close + 1..];
    }

    rendered.push_str(rest);
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_known_placeholders() {
        let values = Placeholders::new()
            .with("danger_level", "23")
            .with("network_security", "77");

        let rendered = interpolate(
            "Danger {danger_level}% / Network Security: {network_security}%",
            &values,
        )
        .expect("interpolation should succeed");

        assert_eq!(rendered, "Danger 23% / Network Security: 77%");
    }

    #[test]
    fn malformed_braces_pass_through() {
        let values = Placeholders::new().with("input", "x");
        assert_eq!(
            interpolate("{ not a name } {input} {", &values).expect("should render"),
            "{ not a name } x {"
        );
        assert_eq!(
            interpolate("{{input}}", &values).expect("should render"),
            "{x}"
        );
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let error = interpolate("value {missing}", &Placeholders::new())
            .expect_err("missing placeholder must fail");
        assert!(matches!(
            error,
            ScriptBookError::UnknownPlaceholder { ref name, .. } if name == "missing"
        ));
    }
}
