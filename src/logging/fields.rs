use std::fmt::Display;
use std::fmt::Write;

/// Key/value pairs attached to a single log call, e.g. `&[("port", &8080)]`.
pub type Fields<'a> = [(&'a str, &'a dyn Display)];

/// Append `key=value` to `out`, separated from earlier pairs by a space.
///
/// Values that are empty or contain whitespace, quotes or `=` are quoted so the
/// line stays splittable.
pub fn push_field(out: &mut String, key: &str, value: &dyn Display) {
    if !out.is_empty() {
        out.push(' ');
    }
    let value = value.to_string();
    let needs_quotes =
        value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '"' || c == '=');
    // writing into a String cannot fail
    let _ = if needs_quotes {
        write!(out, "{key}={value:?}")
    } else {
        write!(out, "{key}={value}")
    };
}

/// Key/value pairs with their values already formatted, as kept by loggers
/// created with [`crate::Logger::with`].
pub type OwnedFields = Vec<(String, String)>;

#[must_use]
pub fn render_fields(fields: &Fields<'_>) -> String {
    let mut out = String::new();
    for (key, value) in fields {
        push_field(&mut out, key, *value);
    }
    out
}

#[must_use]
pub fn to_owned_fields(fields: &Fields<'_>) -> OwnedFields {
    fields
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.to_string()))
        .collect()
}

/// Render pairs as `k=v` text, quoting like [`push_field`].
#[must_use]
pub fn render_pairs(pairs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in pairs {
        push_field(&mut out, key, value);
    }
    out
}

/// Render pairs as a JSON object with string values. A repeated key keeps its
/// last value.
#[must_use]
pub fn render_json_object(pairs: &[(String, String)]) -> String {
    let object: serde_json::Map<String, serde_json::Value> = pairs
        .iter()
        .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
        .collect();
    serde_json::Value::Object(object).to_string()
}

#[cfg(test)]
mod test {
    use super::render_fields;
    use super::render_json_object;
    use super::render_pairs;
    use super::to_owned_fields;

    #[test]
    fn plain_and_quoted_values() {
        let rendered = render_fields(&[
            ("strParam", &"someParam"),
            ("intParam", &42),
            ("arg", &"some information"),
            ("empty", &""),
        ]);
        assert_eq!(
            rendered,
            r#"strParam=someParam intParam=42 arg="some information" empty="""#
        );
    }

    #[test]
    fn no_fields_renders_nothing() {
        assert_eq!(render_fields(&[]), "");
        assert_eq!(render_json_object(&[]), "{}");
    }

    #[test]
    fn owned_pairs_render_as_text_and_json() -> eyre::Result<()> {
        let pairs = to_owned_fields(&[("free", &"12 MB"), ("count", &3)]);
        assert_eq!(render_pairs(&pairs), r#"free="12 MB" count=3"#);
        let object: serde_json::Value = serde_json::from_str(&render_json_object(&pairs))?;
        assert_eq!(object["free"], "12 MB");
        assert_eq!(object["count"], "3");
        Ok(())
    }
}
