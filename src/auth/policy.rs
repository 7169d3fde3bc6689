// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The public route set.
//!
//! One canonical list of routes reachable without a token, with one
//! matcher. The access gate in `middleware.rs` is the only code that
//! consults it; nothing else in the service makes its own
//! public-or-private decision, so the two can never disagree.

/// A route pattern in the public set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    /// Matches the whole path exactly.
    Exact(&'static str),
    /// Matches the prefix itself and anything below it, on segment
    /// boundaries (`/docs` matches `/docs` and `/docs/index.html`,
    /// not `/docsearch`).
    Prefix(&'static str),
}

impl Pattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            Pattern::Exact(exact) => path == *exact,
            Pattern::Prefix(prefix) => {
                path == *prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// The fixed, process-wide set of routes that bypass authentication.
///
/// Built once at startup and never mutated; shared read-only.
#[derive(Debug, Clone)]
pub struct PublicRoutes {
    patterns: Vec<Pattern>,
}

impl PublicRoutes {
    /// The service's public surface: registration, login, the liveness
    /// probe and the API documentation.
    pub fn defaults() -> Self {
        Self {
            patterns: vec![
                Pattern::Exact("/api/auth/register"),
                Pattern::Exact("/api/auth/login"),
                Pattern::Exact("/health"),
                Pattern::Prefix("/docs"),
                Pattern::Prefix("/api-doc"),
            ],
        }
    }

    /// Whether `path` may be served without authentication.
    pub fn is_public(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(path))
    }
}
