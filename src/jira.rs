use reqwest::blocking::Client;
use serde_json::Value;

/// JQL used when the caller does not supply a search expression: the
/// authenticated user's unresolved issues, most urgent and oldest first.
pub const DEFAULT_JQL: &str =
    "assignee = currentUser() AND resolution = unresolved ORDER BY priority DESC, created ASC";

/// Fields requested from the search endpoint by default.
pub const DEFAULT_FIELDS: [&str; 7] = [
    "summary",
    "assignee",
    "duedate",
    "project",
    "priority",
    "description",
    "issuetype",
];

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("jira search request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to decode jira search response: {source}; body: {body}")]
    Parse {
        source: serde_json::Error,
        body: String,
    },
    #[error("jira search response has no \"issues\" array; body: {0}")]
    MissingIssues(String),
    #[error("invalid jira.api_root '{0}'")]
    InvalidApiRoot(String),
}

#[derive(Debug, Clone)]
pub struct JiraClient {
    pub api_root: String,
    username: String,
    password: String,
    http: Client,
}

impl JiraClient {
    pub fn new(api_root: &str, username: &str, password: &str) -> Result<Self, FetchError> {
        let http = Client::builder().build()?;
        Ok(Self {
            api_root: normalize_api_root(api_root)?,
            username: username.to_string(),
            password: password.to_string(),
            http,
        })
    }

    /// Runs one search against `/rest/api/2/search` and returns the raw issue
    /// objects. The HTTP status is not inspected: any body that is valid JSON
    /// with a top-level `issues` array is accepted, anything else is a
    /// [`FetchError::Parse`] or [`FetchError::MissingIssues`].
    pub fn search_issues(&self, jql: &str, fields: &[&str]) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}/rest/api/2/search", self.api_root);
        let fields_param = fields.join(",");
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .query(&[("jql", jql), ("fields", fields_param.as_str())])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        let payload: Value = serde_json::from_str(&body).map_err(|source| FetchError::Parse {
            source,
            body: truncate_body(&body),
        })?;

        match payload.get("issues").and_then(Value::as_array) {
            Some(issues) => {
                crate::logging::debug(format!(
                    "jira search status={} issue_count={}",
                    status,
                    issues.len()
                ));
                Ok(issues.clone())
            }
            None => Err(FetchError::MissingIssues(truncate_body(&body))),
        }
    }
}

fn normalize_api_root(raw: &str) -> Result<String, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidApiRoot(raw.to_string()));
    }

    let candidate = if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = reqwest::Url::parse(&candidate)
        .map_err(|_| FetchError::InvalidApiRoot(raw.to_string()))?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

fn truncate_body(body: &str) -> String {
    const LIMIT: usize = 1000;
    if body.len() <= LIMIT {
        return body.to_string();
    }
    let mut end = LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    #[test]
    fn sends_jql_fields_and_basic_auth() {
        let server = MockServer::start();

        // "e:t" base64-encoded.
        let search = server.mock(|when, then| {
            when.method(GET)
                .path("/rest/api/2/search")
                .query_param(
                    "jql",
                    "assignee = currentUser() AND resolution = unresolved ORDER BY priority DESC, created ASC",
                )
                .query_param(
                    "fields",
                    "summary,assignee,duedate,project,priority,description,issuetype",
                )
                .header("authorization", "Basic ZTp0");
            then.status(200).json_body_obj(&serde_json::json!({
                "startAt": 0,
                "total": 1,
                "issues": [
                    {"key": "PROJ-1", "fields": {"summary": "S"}}
                ]
            }));
        });

        let client = JiraClient::new(&server.base_url(), "e", "t").expect("client");
        let issues = client
            .search_issues(DEFAULT_JQL, &DEFAULT_FIELDS)
            .expect("search should succeed");

        search.assert();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0]["key"], "PROJ-1");
    }

    #[test]
    fn ignores_http_status_when_body_is_well_formed() {
        let server = MockServer::start();

        let _search = server.mock(|when, then| {
            when.method(GET).path("/rest/api/2/search");
            then.status(500)
                .json_body_obj(&serde_json::json!({"issues": []}));
        });

        let client = JiraClient::new(&server.base_url(), "e", "t").expect("client");
        let issues = client
            .search_issues(DEFAULT_JQL, &DEFAULT_FIELDS)
            .expect("status code alone should not fail the search");
        assert!(issues.is_empty());
    }

    #[test]
    fn rejects_non_json_body() {
        let server = MockServer::start();

        let _search = server.mock(|when, then| {
            when.method(GET).path("/rest/api/2/search");
            then.status(200).body("<html>maintenance page</html>");
        });

        let client = JiraClient::new(&server.base_url(), "e", "t").expect("client");
        let err = client
            .search_issues(DEFAULT_JQL, &DEFAULT_FIELDS)
            .expect_err("html body should fail decoding");
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[test]
    fn rejects_body_without_issues_array() {
        let server = MockServer::start();

        let _search = server.mock(|when, then| {
            when.method(GET).path("/rest/api/2/search");
            then.status(200)
                .json_body_obj(&serde_json::json!({"errorMessages": ["bad jql"]}));
        });

        let client = JiraClient::new(&server.base_url(), "e", "t").expect("client");
        let err = client
            .search_issues(DEFAULT_JQL, &DEFAULT_FIELDS)
            .expect_err("missing issues key should fail");
        assert!(matches!(err, FetchError::MissingIssues(_)));
    }

    #[test]
    fn normalizes_api_root() {
        let a = normalize_api_root("example.atlassian.net").expect("normalize");
        assert_eq!(a, "https://example.atlassian.net");

        let b = normalize_api_root("https://example.atlassian.net/").expect("normalize");
        assert_eq!(b, "https://example.atlassian.net");

        let err = normalize_api_root("   ").expect_err("blank root should fail");
        assert!(matches!(err, FetchError::InvalidApiRoot(_)));
    }
}
