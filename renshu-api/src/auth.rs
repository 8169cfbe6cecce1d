use crate::User;

/// Bearer token issued by the sign-in endpoint. Opaque to the client.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct AuthToken(pub String);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SignInRequest {
    /// Identity-provider credential, forwarded verbatim
    pub credential: String,
}

/// The sign-in endpoint answers with the token and the user fields spread at
/// the top level of the same object.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SignInResponse {
    pub token: AuthToken,

    #[serde(flatten)]
    pub user: User,
}
