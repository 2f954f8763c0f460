use gp_core::ID;
use gp_core::Unique;

/// Registered user with verified identity.
///
/// The username is immutable after signup; the avatar path is the only
/// mutable field. The password hash lives in the database only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: ID<Self>,
    username: String,
    email: String,
    avatar: String,
}

impl Member {
    pub fn new(id: ID<Self>, username: String, email: String, avatar: String) -> Self {
        Self {
            id,
            username,
            email,
            avatar,
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn avatar(&self) -> &str {
        &self.avatar
    }
    /// Write-time address check, equivalent to the `\S+@\S+.\S+` pattern.
    pub fn valid_email(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        match domain.rsplit_once('.') {
            Some((host, tld)) => !local.is_empty() && !host.is_empty() && !tld.is_empty(),
            None => false,
        }
    }
}

impl Unique for Member {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use gp_pg::*;

    /// Schema implementation for Member (users table).
    /// Note: hashword is a database-only field, not part of the Member domain type.
    impl Schema for Member {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id          UUID PRIMARY KEY,
                    username    VARCHAR(32) UNIQUE NOT NULL,
                    email       VARCHAR(255) UNIQUE NOT NULL,
                    hashword    TEXT NOT NULL,
                    avatar      TEXT NOT NULL DEFAULT ''
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_username ON ",
                USERS,
                " (username);
                 CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
    }
}
