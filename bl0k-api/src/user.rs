#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct UserId(pub String);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub admin: bool,
}

impl User {
    /// Whether this user may modify something authored by `author`
    pub fn can_modify(&self, author: &UserId) -> bool {
        self.admin || self.id == *author
    }

    pub fn profile_url(&self) -> String {
        format!("/u/{}", self.username)
    }
}
