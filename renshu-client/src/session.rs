use crate::api::{AuthToken, SignInResponse, User, UserId};

/// Explicit sign-in state, threaded into every call made on behalf of a
/// user. There is no ambient current-user global: callers that want the
/// session to survive a restart serialize it themselves.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Session {
    pub token: AuthToken,
    pub user: User,
}

impl Session {
    pub fn from_sign_in(resp: SignInResponse) -> Session {
        Session {
            token: resp.token,
            user: resp.user,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }
}
