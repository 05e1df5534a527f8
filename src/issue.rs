use std::collections::BTreeMap;

use serde_json::Value;

/// The closed set of logical fields extracted from every issue. Template
/// placeholders resolve through this enum; names outside the set are not
/// fields and render as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Url,
    Key,
    Summary,
    Description,
    ProjectName,
    ProjectKey,
    Assignee,
    Priority,
    IssueType,
    DueDate,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Url,
        Field::Key,
        Field::Summary,
        Field::Description,
        Field::ProjectName,
        Field::ProjectKey,
        Field::Assignee,
        Field::Priority,
        Field::IssueType,
        Field::DueDate,
    ];

    pub fn from_name(name: &str) -> Option<Field> {
        let field = match name {
            "url" => Field::Url,
            "key" => Field::Key,
            "summary" => Field::Summary,
            "description" => Field::Description,
            "project-name" => Field::ProjectName,
            "project-key" => Field::ProjectKey,
            "assignee" => Field::Assignee,
            "priority" => Field::Priority,
            "issue-type" => Field::IssueType,
            "due-date" => Field::DueDate,
            _ => return None,
        };
        Some(field)
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Url => "url",
            Field::Key => "key",
            Field::Summary => "summary",
            Field::Description => "description",
            Field::ProjectName => "project-name",
            Field::ProjectKey => "project-key",
            Field::Assignee => "assignee",
            Field::Priority => "priority",
            Field::IssueType => "issue-type",
            Field::DueDate => "due-date",
        }
    }

    /// Where the field lives inside a raw search issue. `Url` is derived from
    /// the issue key rather than extracted, so its path is empty.
    fn path(self) -> &'static [&'static str] {
        match self {
            Field::Url => &[],
            Field::Key => &["key"],
            Field::Summary => &["fields", "summary"],
            Field::Description => &["fields", "description"],
            Field::ProjectName => &["fields", "project", "name"],
            Field::ProjectKey => &["fields", "project", "key"],
            Field::Assignee => &["fields", "assignee", "displayName"],
            Field::Priority => &["fields", "priority", "name"],
            Field::IssueType => &["fields", "issuetype", "name"],
            Field::DueDate => &["fields", "duedate"],
        }
    }

    fn extract(self, raw: &Value) -> Option<String> {
        let found = lookup_path(raw, self.path())?;
        let text = match self {
            Field::Description => plain_text(found),
            _ => found.as_str()?.to_string(),
        };
        if text.trim().is_empty() {
            return None;
        }
        Some(text)
    }
}

/// Walks `value` key by key. Any missing intermediate key (or a non-object in
/// the middle of the path) yields `None`, never an error.
pub fn lookup_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    match path.split_first() {
        None => Some(value),
        Some((head, rest)) => lookup_path(value.as_object()?.get(*head)?, rest),
    }
}

/// One issue flattened to the fixed field set. Every field is present in the
/// mapping; any value other than `key` and `url` may be absent.
#[derive(Debug, Clone)]
pub struct NormalizedIssue {
    values: BTreeMap<Field, Option<String>>,
}

impl NormalizedIssue {
    /// Returns `None` when the raw issue carries no top-level string `key`;
    /// such issues cannot be linked to and are skipped by the exporter.
    pub fn from_raw(api_root: &str, raw: &Value) -> Option<Self> {
        let key = raw.get("key").and_then(Value::as_str)?.to_string();
        let mut values = BTreeMap::new();
        for field in Field::ALL {
            let value = match field {
                Field::Url => Some(format!("{}/browse/{}", api_root, key)),
                Field::Key => Some(key.clone()),
                _ => field.extract(raw),
            };
            values.insert(field, value);
        }
        Some(Self { values })
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).and_then(Option::as_deref)
    }

    pub fn key(&self) -> &str {
        self.get(Field::Key).unwrap_or_default()
    }

    #[cfg(test)]
    pub fn from_fields(fields: impl IntoIterator<Item = (Field, Option<String>)>) -> Self {
        let mut values: BTreeMap<Field, Option<String>> =
            Field::ALL.iter().map(|field| (*field, None)).collect();
        for (field, value) in fields {
            values.insert(field, value);
        }
        Self { values }
    }
}

/// Flattens a description value to plain text, discarding document markup
/// such as Atlassian's `{type, content, text}` node trees.
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(plain_text)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                return text.clone();
            }

            if let Some(content) = map.get("content") {
                return plain_text(content);
            }

            map.values()
                .map(plain_text)
                .filter(|s| !s.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        }
        _ => String::new(),
    }
}
