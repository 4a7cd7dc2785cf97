//! The route table and its resolution algorithm.
//!
//! Resolution order for a rewritten path:
//!
//! 1. exact literal entries (a method mismatch is `MethodNotAllowed`)
//! 2. reserved suffixes under the longest matching prefix bucket
//! 3. the bucket's by-identifier fallback, for a single non-empty segment
//! 4. otherwise `NotFound`
//!
//! Buckets are ordered longest-first when the table is built, so precedence
//! never depends on the order entries were registered in.

use crate::error::{DispatchError, TableError};
use crate::params::{PathParams, RouteMatch};
use crate::stage::StagePrefixes;
use http::Method;

/// Where an entry lives in the path space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// The full path, literally.
    Exact(String),
    /// `bucket` followed by exactly `suffix`, e.g. `/api/clients/` + `active`.
    Reserved { bucket: String, suffix: String },
    /// `bucket` followed by one caller-supplied identifier segment.
    ById { bucket: String },
}

/// One immutable registration: pattern, allowed method, operation.
#[derive(Debug, Clone)]
pub struct RouteEntry<Op> {
    pub pattern: Pattern,
    pub method: Method,
    pub operation: Op,
}

type Methods<Op> = Vec<(Method, Op)>;

#[derive(Debug)]
struct Bucket<Op> {
    prefix: String,
    reserved: Vec<(String, Methods<Op>)>,
    by_id: Methods<Op>,
}

#[derive(Debug)]
pub struct RouteTable<Op> {
    exact: Vec<(String, Methods<Op>)>,
    buckets: Vec<Bucket<Op>>,
    stages: StagePrefixes,
}

fn push_method<Op>(
    methods: &mut Methods<Op>,
    method: Method,
    operation: Op,
    path: impl Into<String>,
) -> Result<(), TableError> {
    if methods.iter().any(|(m, _)| *m == method) {
        return Err(TableError::Duplicate {
            method,
            path: path.into(),
        });
    }
    methods.push((method, operation));
    Ok(())
}

fn select<'a, Op>(
    methods: &'a Methods<Op>,
    method: &Method,
) -> Result<&'a Op, Vec<Method>> {
    methods
        .iter()
        .find(|(m, _)| m == method)
        .map(|(_, op)| op)
        .ok_or_else(|| methods.iter().map(|(m, _)| m.clone()).collect())
}

impl<Op> RouteTable<Op> {
    pub fn builder() -> RouteTableBuilder<Op> {
        RouteTableBuilder {
            entries: Vec::new(),
        }
    }

    pub fn from_entries(
        entries: Vec<RouteEntry<Op>>,
        stages: StagePrefixes,
    ) -> Result<Self, TableError> {
        let mut exact: Vec<(String, Methods<Op>)> = Vec::new();
        let mut buckets: Vec<Bucket<Op>> = Vec::new();

        for entry in entries {
            let RouteEntry {
                pattern,
                method,
                operation,
            } = entry;

            match pattern {
                Pattern::Exact(path) => {
                    if !path.starts_with('/') {
                        return Err(TableError::RelativePath(path));
                    }
                    let slot = match exact.iter().position(|(p, _)| *p == path) {
                        Some(i) => i,
                        None => {
                            exact.push((path.clone(), Vec::new()));
                            exact.len() - 1
                        }
                    };
                    push_method(&mut exact[slot].1, method, operation, path)?;
                }
                Pattern::Reserved { bucket, suffix } => {
                    if suffix.is_empty() || suffix.contains('/') {
                        return Err(TableError::BadSuffix { bucket, suffix });
                    }
                    let b = bucket_mut(&mut buckets, bucket)?;
                    let path = format!("{}{}", b.prefix, suffix);
                    let slot = match b.reserved.iter().position(|(s, _)| *s == suffix) {
                        Some(i) => i,
                        None => {
                            b.reserved.push((suffix, Vec::new()));
                            b.reserved.len() - 1
                        }
                    };
                    push_method(&mut b.reserved[slot].1, method, operation, path)?;
                }
                Pattern::ById { bucket } => {
                    let b = bucket_mut(&mut buckets, bucket)?;
                    let path = format!("{}{{id}}", b.prefix);
                    push_method(&mut b.by_id, method, operation, path)?;
                }
            }
        }

        // Longest prefix first: a nested bucket shadows its parent.
        buckets.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        Ok(Self {
            exact,
            buckets,
            stages,
        })
    }

    /// Map `(method, path)` to an operation.
    ///
    /// `path` is the raw request path without query string; the stage prefix
    /// is stripped here, once.
    pub fn resolve(&self, method: &Method, path: &str) -> Result<RouteMatch<'_, Op>, DispatchError> {
        let path = self.stages.strip(path);

        if let Some((_, methods)) = self.exact.iter().find(|(p, _)| p == path) {
            return select(methods, method)
                .map(|op| matched(op, method, path, None))
                .map_err(|allowed| DispatchError::MethodNotAllowed { allowed });
        }

        let Some(bucket) = self
            .buckets
            .iter()
            .find(|b| path.starts_with(b.prefix.as_str()))
        else {
            tracing::trace!(path, "no route");
            return Err(DispatchError::NotFound);
        };
        let remainder = &path[bucket.prefix.len()..];

        // A reserved suffix always shadows the identifier fallback, even
        // when it is not registered for this method.
        if let Some((_, methods)) = bucket.reserved.iter().find(|(s, _)| s == remainder) {
            return select(methods, method)
                .map(|op| matched(op, method, path, None))
                .map_err(|_| DispatchError::NotFound);
        }

        if remainder.is_empty() || remainder.contains('/') || bucket.by_id.is_empty() {
            tracing::trace!(path, bucket = %bucket.prefix, "remainder is not an identifier");
            return Err(DispatchError::NotFound);
        }

        select(&bucket.by_id, method)
            .map(|op| matched(op, method, path, Some(remainder)))
            .map_err(|allowed| DispatchError::MethodNotAllowed { allowed })
    }
}

fn matched<'a, Op>(
    operation: &'a Op,
    method: &Method,
    path: &str,
    id: Option<&str>,
) -> RouteMatch<'a, Op> {
    RouteMatch {
        operation,
        method: method.clone(),
        path: path.to_string(),
        params: PathParams {
            id: id.map(str::to_string),
        },
    }
}

fn bucket_mut<Op>(buckets: &mut Vec<Bucket<Op>>, prefix: String) -> Result<&mut Bucket<Op>, TableError> {
    if !prefix.starts_with('/') {
        return Err(TableError::RelativePath(prefix));
    }
    if !prefix.ends_with('/') {
        return Err(TableError::BucketWithoutSlash(prefix));
    }
    let index = match buckets.iter().position(|b| b.prefix == prefix) {
        Some(i) => i,
        None => {
            buckets.push(Bucket {
                prefix,
                reserved: Vec::new(),
                by_id: Vec::new(),
            });
            buckets.len() - 1
        }
    };
    Ok(&mut buckets[index])
}

/// Collects [`RouteEntry`] values in registration order.
pub struct RouteTableBuilder<Op> {
    entries: Vec<RouteEntry<Op>>,
}

impl<Op> RouteTableBuilder<Op> {
    pub fn entry(mut self, pattern: Pattern, method: Method, operation: Op) -> Self {
        self.entries.push(RouteEntry {
            pattern,
            method,
            operation,
        });
        self
    }

    pub fn exact(self, method: Method, path: &str, operation: Op) -> Self {
        self.entry(Pattern::Exact(path.to_string()), method, operation)
    }

    pub fn reserved(self, method: Method, bucket: &str, suffix: &str, operation: Op) -> Self {
        self.entry(
            Pattern::Reserved {
                bucket: bucket.to_string(),
                suffix: suffix.to_string(),
            },
            method,
            operation,
        )
    }

    pub fn by_id(self, method: Method, bucket: &str, operation: Op) -> Self {
        self.entry(
            Pattern::ById {
                bucket: bucket.to_string(),
            },
            method,
            operation,
        )
    }

    pub fn build(self, stages: StagePrefixes) -> Result<RouteTable<Op>, TableError> {
        RouteTable::from_entries(self.entries, stages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Health,
        ListItems,
        Active,
        Inactive,
        Add,
        ById,
        Notes,
        NoteById,
    }

    fn table() -> RouteTable<Op> {
        RouteTable::builder()
            // Generic fallback registered first on purpose.
            .by_id(Method::GET, "/items/", Op::ById)
            .exact(Method::GET, "/health", Op::Health)
            .exact(Method::GET, "/items", Op::ListItems)
            .reserved(Method::GET, "/items/", "active", Op::Active)
            .reserved(Method::GET, "/items/", "inactive", Op::Inactive)
            .reserved(Method::POST, "/items/", "add", Op::Add)
            .build(StagePrefixes::new(["prod", "dev", "staging"]))
            .unwrap()
    }

    fn op(t: &RouteTable<Op>, method: Method, path: &str) -> Result<Op, DispatchError> {
        t.resolve(&method, path).map(|m| *m.operation)
    }

    #[test]
    fn test_exact_path_wrong_method_is_405() {
        let t = table();
        for path in ["/health", "/items"] {
            for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
                assert_eq!(
                    op(&t, method.clone(), path),
                    Err(DispatchError::MethodNotAllowed {
                        allowed: vec![Method::GET]
                    }),
                    "{method} {path}"
                );
            }
        }
    }

    #[test]
    fn test_reserved_suffix_beats_identifier() {
        let t = table();
        assert_eq!(op(&t, Method::GET, "/items/active"), Ok(Op::Active));
        assert_eq!(op(&t, Method::GET, "/items/inactive"), Ok(Op::Inactive));
        assert_eq!(op(&t, Method::POST, "/items/add"), Ok(Op::Add));

        let m = t.resolve(&Method::GET, "/items/active").unwrap();
        assert_eq!(m.params, PathParams::default());
    }

    #[test]
    fn test_reserved_suffix_with_unregistered_method_is_not_an_id() {
        let t = table();
        // GET /items/add must not fetch an item called "add".
        assert_eq!(op(&t, Method::GET, "/items/add"), Err(DispatchError::NotFound));
        assert_eq!(op(&t, Method::POST, "/items/active"), Err(DispatchError::NotFound));
    }

    #[test]
    fn test_identifier_fallback() {
        let t = table();
        let m = t.resolve(&Method::GET, "/items/xyz123").unwrap();
        assert_eq!(*m.operation, Op::ById);
        assert_eq!(m.params.id(), Some("xyz123"));

        // Identifiers that merely start like a reserved suffix are still ids.
        let m = t.resolve(&Method::GET, "/items/activeX").unwrap();
        assert_eq!(m.params.id(), Some("activeX"));
    }

    #[test]
    fn test_identifier_fallback_rejects_other_methods() {
        let t = table();
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            assert_eq!(
                op(&t, method, "/items/xyz123"),
                Err(DispatchError::MethodNotAllowed {
                    allowed: vec![Method::GET]
                })
            );
        }
    }

    #[test]
    fn test_bucket_with_empty_remainder_is_not_found() {
        let t = table();
        assert_eq!(op(&t, Method::GET, "/items/"), Err(DispatchError::NotFound));
    }

    #[test]
    fn test_multi_segment_remainder_is_not_found() {
        let t = table();
        assert_eq!(op(&t, Method::GET, "/items/a/b"), Err(DispatchError::NotFound));
        assert_eq!(op(&t, Method::GET, "/items/active/"), Err(DispatchError::NotFound));
    }

    #[test]
    fn test_unknown_paths() {
        let t = table();
        assert_eq!(op(&t, Method::GET, "/"), Err(DispatchError::NotFound));
        assert_eq!(op(&t, Method::GET, "/itemsx"), Err(DispatchError::NotFound));
        assert_eq!(op(&t, Method::GET, "/health/"), Err(DispatchError::NotFound));
    }

    #[test]
    fn test_stage_prefix_selects_same_operation() {
        let t = table();
        for path in ["/items", "/items/active", "/items/abc", "/health"] {
            for stage in ["prod", "dev", "staging"] {
                let staged = format!("/{stage}{path}");
                assert_eq!(op(&t, Method::GET, &staged), op(&t, Method::GET, path));
            }
        }
        let m = t.resolve(&Method::GET, "/prod/items/abc").unwrap();
        assert_eq!(m.path, "/items/abc");
        assert_eq!(m.params.id(), Some("abc"));
    }

    #[test]
    fn test_stage_alone_is_not_stripped() {
        let t = table();
        assert_eq!(op(&t, Method::GET, "/prod"), Err(DispatchError::NotFound));
    }

    #[test]
    fn test_nested_bucket_wins_regardless_of_order() {
        let t = RouteTable::builder()
            .by_id(Method::GET, "/items/", Op::ById)
            .by_id(Method::GET, "/items/notes/", Op::NoteById)
            .reserved(Method::GET, "/items/notes/", "all", Op::Notes)
            .build(StagePrefixes::default())
            .unwrap();

        assert_eq!(op(&t, Method::GET, "/items/notes/7"), Ok(Op::NoteById));
        assert_eq!(op(&t, Method::GET, "/items/notes/all"), Ok(Op::Notes));
        assert_eq!(op(&t, Method::GET, "/items/notes"), Ok(Op::ById));
    }

    #[test]
    fn test_allow_lists_every_registered_method() {
        let t = RouteTable::builder()
            .exact(Method::GET, "/things", Op::ListItems)
            .exact(Method::POST, "/things", Op::Add)
            .build(StagePrefixes::default())
            .unwrap();

        let err = t.resolve(&Method::DELETE, "/things").unwrap_err();
        assert_eq!(err.allow_header().as_deref(), Some("GET, POST"));
        assert_eq!(op(&t, Method::POST, "/things"), Ok(Op::Add));
    }

    #[test]
    fn test_invalid_tables_rejected() {
        let err = RouteTable::builder()
            .by_id(Method::GET, "/items", Op::ById)
            .build(StagePrefixes::default())
            .unwrap_err();
        assert_eq!(err, TableError::BucketWithoutSlash("/items".into()));

        let err = RouteTable::builder()
            .reserved(Method::GET, "/items/", "a/b", Op::Active)
            .build(StagePrefixes::default())
            .unwrap_err();
        assert!(matches!(err, TableError::BadSuffix { .. }));

        let err = RouteTable::builder()
            .exact(Method::GET, "/health", Op::Health)
            .exact(Method::GET, "/health", Op::ListItems)
            .build(StagePrefixes::default())
            .unwrap_err();
        assert!(matches!(err, TableError::Duplicate { .. }));
    }
}
