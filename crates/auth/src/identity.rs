use super::*;
use gp_core::ID;
use gp_core::Unique;

/// Request identity: anonymous visitor or authenticated member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum User {
    Anon,
    Auth(Member),
}

impl User {
    pub fn id(&self) -> Option<ID<Member>> {
        match self {
            Self::Auth(m) => Some(m.id()),
            Self::Anon => None,
        }
    }
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Auth(m) => Some(m.username()),
            Self::Anon => None,
        }
    }
    pub fn member(&self) -> Option<&Member> {
        match self {
            Self::Auth(m) => Some(m),
            Self::Anon => None,
        }
    }
}

impl From<Member> for User {
    fn from(member: Member) -> Self {
        Self::Auth(member)
    }
}

impl From<Option<Member>> for User {
    fn from(member: Option<Member>) -> Self {
        member.map(Self::Auth).unwrap_or(Self::Anon)
    }
}
