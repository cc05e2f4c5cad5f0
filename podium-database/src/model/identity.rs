use std::fmt;

/// Authenticated caller identity, resolved once at the request boundary.
///
/// The store trusts this value verbatim; verifying it is the identity
/// provider's job. XP-mutating operations take it explicitly rather than
/// reading any ambient "current user" state, so attribution is always
/// visible in the call signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub String);

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
