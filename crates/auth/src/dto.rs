use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(rename = "cPassword")]
    pub c_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default, rename = "rememberMe")]
    pub remember_me: Option<String>,
}

impl LoginRequest {
    /// HTML checkboxes submit arbitrary truthy strings ("on", "true", "1")
    /// and omit the field entirely when unchecked.
    pub fn remember(&self) -> bool {
        self.remember_me
            .as_deref()
            .is_some_and(|v| v != "false" && v != "0" && !v.is_empty())
    }
}

#[derive(Deserialize)]
pub struct AvatarRequest {
    pub avatar: String,
}

#[derive(Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub avatar: String,
}

impl From<&crate::Member> for UserInfo {
    fn from(member: &crate::Member) -> Self {
        use gp_core::Unique;
        Self {
            id: member.id().to_string(),
            username: member.username().to_string(),
            avatar: member.avatar().to_string(),
        }
    }
}
