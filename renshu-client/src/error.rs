use crate::api;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure, or a success body that would not decode. The
    /// operation is abandoned; there is no retry layer.
    #[error("failed talking to the backend")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] api::Error),

    #[error("signing in is required to {action}")]
    AuthRequired { action: &'static str },

    #[error("{field} is required")]
    EmptyField { field: &'static str },
}

impl Error {
    /// Alert-style message fit for showing to the user as-is
    pub fn user_message(&self) -> String {
        match self {
            Error::AuthRequired { action } => format!("You must be logged in to {action}"),
            Error::EmptyField { field } => format!("{field} is required"),
            Error::Api(api::Error::PermissionDenied) => {
                String::from("You are not allowed to do that.")
            }
            // the backend writes user-facing text into 4xx bodies
            Error::Api(api::Error::InvalidRequest(msg)) => msg.clone(),
            Error::Network(_) | Error::Api(_) => {
                String::from("Request failed. Please try again.")
            }
        }
    }
}
