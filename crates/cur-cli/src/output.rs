use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(render_text(&serde_json::to_value(value)?)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_text(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{key}: {}", value_to_cell(value)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Array(items) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join("\n"),
        scalar => value_to_cell(scalar),
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        reviewer: &'static str,
        completed: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(
            &Example {
                reviewer: "ada",
                completed: 3,
            },
            OutputFormat::Json,
        )
        .expect("json render");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json parses");
        assert_eq!(parsed["reviewer"], "ada");
        assert_eq!(parsed["completed"], 3);
    }

    #[test]
    fn text_render_is_key_value_lines() {
        let out = render(
            &Example {
                reviewer: "ada",
                completed: 3,
            },
            OutputFormat::Text,
        )
        .expect("text render");
        assert_eq!(out, "completed: 3\nreviewer: ada");
    }

    #[test]
    fn text_render_joins_arrays() {
        let out = render(&vec!["ada", "grace"], OutputFormat::Text).expect("text render");
        assert_eq!(out, "ada\ngrace");
    }
}
