use secrecy::SecretString;

use crate::Result;
use crate::api::ApiClient;
use crate::context::AppContext;
use crate::forms::LoginForm;

use super::{Failure, Feedback, with_feedback};

const LOGIN: Feedback = Feedback {
    action: "login",
    success: Some("Olá"),
    failure: Failure::Prefixed("Failed to login"),
};

/// Sign-in workflow. The token is installed on the borrowed [`ApiClient`]
/// and nothing is persisted.
pub struct LoginScreen<'a> {
    api: &'a mut ApiClient,
    ctx: &'a AppContext,
}

impl<'a> LoginScreen<'a> {
    #[must_use]
    pub const fn new(api: &'a mut ApiClient, ctx: &'a AppContext) -> Self {
        Self { api, ctx }
    }

    /// Validates the credentials, signs in and installs the returned token
    /// on the client.
    ///
    /// # Errors
    ///
    /// Validation failures come back untoasted; request failures are toasted.
    pub async fn submit(&mut self, form: &LoginForm) -> Result<SecretString> {
        let payload = form.payload()?;
        let token = with_feedback(self.ctx, LOGIN, self.api.login(&payload)).await?;
        self.api.set_token(token.clone());
        Ok(token)
    }
}
