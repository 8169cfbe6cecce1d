use crate::ANONYMOUS;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct UserId(pub String);

/// The signed-in user, as returned by the sign-in endpoint.
///
/// Note the asymmetry with [`crate::Author`]: the auth endpoint exposes `id`,
/// while user blocks embedded in documents expose `_id`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub id: UserId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Titles of the questions this user has marked solved
    #[serde(rename = "solvedQuestions", default)]
    pub solved_questions: Vec<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS)
    }
}
