//! Deployment-stage prefix rewriting.

/// Leading path segments (`prod`, `dev`, ...) removed before matching.
#[derive(Debug, Clone, Default)]
pub struct StagePrefixes {
    prefixes: Vec<String>,
}

impl StagePrefixes {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty() && !p.contains('/'))
                .collect(),
        }
    }

    /// Remove a stage segment at position zero when it is followed by `/`.
    ///
    /// `/prod/api/x` becomes `/api/x`; `/prod` and `/production/x` are left
    /// alone. At most one segment is removed.
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        let Some(rest) = path.strip_prefix('/') else {
            return path;
        };
        for prefix in &self.prefixes {
            if let Some(tail) = rest.strip_prefix(prefix.as_str()) {
                if tail.starts_with('/') {
                    return tail;
                }
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stages() -> StagePrefixes {
        StagePrefixes::new(["prod", "dev", "staging"])
    }

    #[test]
    fn test_strips_leading_stage() {
        assert_eq!(stages().strip("/prod/api/clients"), "/api/clients");
        assert_eq!(stages().strip("/staging/health"), "/health");
        assert_eq!(stages().strip("/dev/"), "/");
    }

    #[test]
    fn test_requires_following_slash() {
        assert_eq!(stages().strip("/prod"), "/prod");
        assert_eq!(stages().strip("/production/api"), "/production/api");
        assert_eq!(stages().strip("/devices/1"), "/devices/1");
    }

    #[test]
    fn test_only_position_zero() {
        assert_eq!(stages().strip("/api/prod/clients"), "/api/prod/clients");
        assert_eq!(stages().strip("prod/api"), "prod/api");
    }

    #[test]
    fn test_single_strip_per_call() {
        assert_eq!(stages().strip("/prod/dev/api"), "/dev/api");
    }

    #[test]
    fn test_stripping_clean_path_is_noop() {
        let once = stages().strip("/prod/api/clients");
        assert_eq!(stages().strip(once), once);
    }
}
