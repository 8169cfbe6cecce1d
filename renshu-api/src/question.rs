use crate::UserId;

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Question {
    pub title: String,

    #[serde(default)]
    pub link: String,

    /// Backend-provided label ("Easy", "Medium", ...); displayed verbatim,
    /// never interpreted
    #[serde(default)]
    pub difficulty: String,
}

/// Response of both the solved-questions fetch and the add/remove updates
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SolvedQuestions {
    #[serde(rename = "solvedQuestions", default)]
    pub solved_questions: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SolvedUpdate {
    pub title: String,

    #[serde(rename = "userId")]
    pub user_id: UserId,
}
