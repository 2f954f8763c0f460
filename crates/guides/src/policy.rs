/// Authorization policy for guide mutations (edit, delete).
///
/// The predecessor of this service only required *any* valid session for
/// these routes. That behavior is kept reachable as an explicit choice
/// rather than an accident: `AnySession` reproduces it, `AuthorOnly` closes
/// the gap and is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ownership {
    #[default]
    AuthorOnly,
    AnySession,
}

impl Ownership {
    /// Reads the `OWNERSHIP` environment variable (`author-only` |
    /// `any-session`), defaulting to `AuthorOnly`.
    pub fn from_env() -> Self {
        match std::env::var("OWNERSHIP").as_deref() {
            Ok("any-session") => Self::AnySession,
            _ => Self::AuthorOnly,
        }
    }
    /// May the session user mutate a guide written by `author`?
    pub fn permits(&self, username: &str, author: &str) -> bool {
        match self {
            Self::AnySession => true,
            Self::AuthorOnly => username == author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_only_requires_matching_author() {
        assert!(Ownership::AuthorOnly.permits("ada", "ada"));
        assert!(!Ownership::AuthorOnly.permits("eve", "ada"));
    }

    #[test]
    fn any_session_admits_everyone() {
        assert!(Ownership::AnySession.permits("ada", "ada"));
        assert!(Ownership::AnySession.permits("eve", "ada"));
    }

    #[test]
    fn default_is_author_only() {
        assert_eq!(Ownership::default(), Ownership::AuthorOnly);
    }
}
