use services::GatewayError;

pub const LOGIN_REJECTED_MESSAGE: &str = "Incorrect password";
pub const LOGIN_FAILED_MESSAGE: &str = "An error occurred";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Authorized,
    Rejected,
    Failed,
}

impl LoginOutcome {
    /// Message shown under the password field, if any.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            LoginOutcome::Authorized => None,
            LoginOutcome::Rejected => Some(LOGIN_REJECTED_MESSAGE),
            LoginOutcome::Failed => Some(LOGIN_FAILED_MESSAGE),
        }
    }

    /// A rejected password is cleared from the field.
    #[must_use]
    pub fn clears_password(self) -> bool {
        matches!(self, LoginOutcome::Rejected)
    }
}

#[must_use]
pub fn login_outcome(result: &Result<bool, GatewayError>) -> LoginOutcome {
    match result {
        Ok(true) => LoginOutcome::Authorized,
        Ok(false) => LoginOutcome::Rejected,
        Err(_) => LoginOutcome::Failed,
    }
}
