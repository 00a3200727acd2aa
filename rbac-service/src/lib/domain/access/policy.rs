use crate::domain::access::models::Principal;
use crate::domain::user::models::Role;

/// What a route demands from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Open to everyone, including unauthenticated callers.
    PermitAll,
    /// Any authenticated principal.
    Authenticated,
    /// An authenticated principal holding at least one of the roles.
    AnyRole(Vec<Role>),
}

/// Outcome of evaluating a request against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    /// No principal on a protected route (401).
    Unauthenticated,
    /// Principal lacks every required role (403).
    Forbidden,
}

/// Path-prefix rule; `/api/v1/admin` covers `/api/v1/admin` and everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    prefix: String,
    requirement: Requirement,
}

impl RouteRule {
    pub fn new(prefix: impl Into<String>, requirement: Requirement) -> Self {
        let prefix: String = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
            requirement,
        }
    }

    fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Static prefix table evaluated longest prefix first.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<RouteRule>,
    fallback: Requirement,
}

impl AccessPolicy {
    pub fn new(mut rules: Vec<RouteRule>, fallback: Requirement) -> Self {
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { rules, fallback }
    }

    /// Requirement of the longest matching prefix, or the fallback.
    pub fn requirement_for(&self, path: &str) -> &Requirement {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| &rule.requirement)
            .unwrap_or(&self.fallback)
    }

    pub fn is_public(&self, path: &str) -> bool {
        matches!(self.requirement_for(path), Requirement::PermitAll)
    }

    pub fn decide(&self, path: &str, principal: Option<&Principal>) -> AccessDecision {
        match (self.requirement_for(path), principal) {
            (Requirement::PermitAll, _) => AccessDecision::Granted,
            (_, None) => AccessDecision::Unauthenticated,
            (Requirement::Authenticated, Some(_)) => AccessDecision::Granted,
            (Requirement::AnyRole(required), Some(principal)) => {
                if principal.has_any_role(required) {
                    AccessDecision::Granted
                } else {
                    AccessDecision::Forbidden
                }
            }
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(
            vec![
                RouteRule::new("/api/v1/public", Requirement::PermitAll),
                RouteRule::new("/api/v1/admin", Requirement::AnyRole(vec![Role::Admin])),
                RouteRule::new(
                    "/api/v1/moderator",
                    Requirement::AnyRole(vec![Role::Moderator, Role::Admin]),
                ),
                RouteRule::new(
                    "/api/v1/user",
                    Requirement::AnyRole(vec![Role::User, Role::Moderator, Role::Admin]),
                ),
            ],
            Requirement::Authenticated,
        )
    }
}
