use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::issue::{Field, NormalizedIssue};

/// Placeholder tokens are uppercase, hyphenated, and stop at the first `}`.
fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Z][A-Z-]*)\}").expect("placeholder pattern is valid"))
}

/// Substitutes every `{FIELD-NAME}` placeholder in `template` with the
/// issue's formatted field value, then drops lines left blank by absent
/// fields. Unknown placeholder names resolve to empty. The result is either
/// empty or ends with exactly one newline.
pub fn render_issue(template: &str, issue: &NormalizedIssue) -> String {
    let substituted = placeholder_re().replace_all(template, |caps: &Captures| {
        let name = caps[1].to_ascii_lowercase();
        match Field::from_name(&name) {
            Some(field) => format_field(field, issue.get(field)),
            None => String::new(),
        }
    });

    let kept: Vec<&str> = substituted
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if kept.is_empty() {
        return String::new();
    }

    let mut block = kept.join("\n");
    block.push('\n');
    block
}

fn format_field(field: Field, value: Option<&str>) -> String {
    match (field, value) {
        (_, None) => String::new(),
        (Field::DueDate, Some(value)) => format!("<{value}>"),
        (_, Some(value)) => value.to_string(),
    }
}
