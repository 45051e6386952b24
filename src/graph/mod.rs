use crate::formula::FormulaRenderer;
use crate::port::format_number;
use crate::program::{Node, Program};
use ahash::AHashMap;
use itertools::Itertools;

/// Readable node identifiers (`Type:DisplayName`), keyed by node id.
///
/// When several nodes share a label, the first keeps it and later ones get `#1`, `#2`, ...
pub fn node_labels(program: &Program) -> AHashMap<String, String> {
    let counts = program.nodes().iter().map(Node::label).counts();
    let mut seen: AHashMap<String, usize> = AHashMap::new();
    let mut labels = AHashMap::with_capacity(program.nodes().len());

    for node in program.nodes() {
        let base = node.label();
        let index = seen.entry(base.clone()).or_insert(0);
        let label = if counts.get(&base).copied().unwrap_or(0) > 1 && *index > 0 {
            format!("{}#{}", base, index)
        } else {
            base
        };
        *index += 1;
        labels.insert(node.id.clone(), label);
    }
    labels
}

/// Renders the program as a graphviz digraph with one HTML-like table per node.
///
/// Output is deterministic: nodes and edges follow table order, and each table lists
/// connected inputs, configuration, the current value, the formula and connected outputs.
pub fn to_graph_description(program: &Program) -> String {
    let labels = node_labels(program);
    let formulas = FormulaRenderer::with_labels(program, labels.clone());
    let label_of = |id: &str| labels.get(id).map_or(id, String::as_str).to_string();

    let mut lines = vec![
        "digraph dataflow {".to_string(),
        "  rankdir=LR;".to_string(),
        "  node [shape=plain];".to_string(),
        String::new(),
    ];

    for node in program.nodes() {
        let mut rows = vec!["    <table>".to_string()];

        for (port, _) in program.connected_inputs(&node.id) {
            rows.push(format!(
                "      <tr><td port=\"{}\">Input</td><td>{}</td></tr>",
                escape_html(port),
                escape_html(port)
            ));
        }

        for (key, value) in node_properties(program, node, &formulas) {
            rows.push(format!(
                "      <tr><td>{}</td><td>{}</td></tr>",
                escape_html(&key),
                escape_html(&value)
            ));
        }

        for socket in program.output_sockets(&node.id) {
            rows.push(format!(
                "      <tr><td>Output</td><td port=\"{}\">{}</td></tr>",
                escape_html(socket.port),
                escape_html(socket.port)
            ));
        }

        rows.push("    </table>".to_string());
        lines.push(format!(
            "  \"{}\" [label=<\n{}\n  >];",
            quote_id(&label_of(&node.id)),
            rows.join("\n")
        ));
    }

    lines.push(String::new());

    for connection in program.connections() {
        lines.push(format!(
            "  \"{}\":\"{}\" -> \"{}\":\"{}\";",
            quote_id(&label_of(&connection.source)),
            quote_id(&connection.source_output),
            quote_id(&label_of(&connection.target)),
            quote_id(&connection.target_input)
        ));
    }

    lines.push("}".to_string());
    lines.into_iter().join("\n")
}

/// The property rows of a node table: scalar configuration in insertion order, then the
/// current value and formulas. Later entries replace earlier ones with the same key in place.
fn node_properties(
    program: &Program,
    node: &Node,
    formulas: &FormulaRenderer<'_>,
) -> Vec<(String, String)> {
    let mut rows: Vec<(String, String)> = node
        .data
        .properties
        .iter()
        .filter(|(_, value)| !value.is_object() && !value.is_array())
        .map(|(key, value)| (key.clone(), scalar_text(value)))
        .collect();

    let mut upsert = |key: &str, value: String| match rows.iter_mut().find(|(k, _)| k == key) {
        Some(row) => row.1 = value,
        None => rows.push((key.to_string(), value)),
    };

    if let Some(value) = program.current_value(&node.id) {
        upsert("nodeValue", value.to_string());
    }
    if let Some(formula) = formulas.render(&node.id) {
        upsert("formula", formula.symbolic);
        upsert("formulaWithValues", formula.with_values);
    }
    rows
}

fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map_or_else(|| n.to_string(), format_number),
        },
        other => other.to_string(),
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn quote_id(id: &str) -> String {
    id.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"a < b && "c" > d"#),
            "a &lt; b &amp;&amp; &quot;c&quot; &gt; d"
        );
    }

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(scalar_text(&serde_json::json!(2.0)), "2");
        assert_eq!(scalar_text(&serde_json::json!(2.5)), "2.5");
        assert_eq!(scalar_text(&serde_json::json!("Add")), "Add");
        assert_eq!(scalar_text(&serde_json::json!(true)), "true");
        assert_eq!(scalar_text(&serde_json::Value::Null), "null");
    }
}
