use http::Method;

/// Values extracted from the request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    /// Identifier taken from a by-identifier fallback, e.g. `abc` in `/api/clients/abc`.
    pub id: Option<String>,
}

impl PathParams {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, Op> {
    pub operation: &'a Op,
    pub method: Method,
    /// The path after stage-prefix rewriting.
    pub path: String,
    pub params: PathParams,
}
