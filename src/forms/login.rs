use std::fmt;

use serde::Serialize;

use crate::api::LoginPayload;
use crate::validation::{FieldRule, Schema, ValidationErrors};

use super::FormValues;

/// Sign-in values. `username` takes an email or a CPF.
#[derive(Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

impl FormValues for LoginForm {
    fn schema() -> Schema {
        Schema::new()
            .field("username", FieldRule::required("Email é obrigatório"))
            .field("password", FieldRule::required("Senha é obrigatória"))
            .field("rememberMe", FieldRule::optional())
    }
}

impl LoginForm {
    /// The username is trimmed; the password goes out as typed.
    ///
    /// # Errors
    ///
    /// Returns the validation errors when a credential is missing.
    pub fn payload(&self) -> Result<LoginPayload, ValidationErrors> {
        self.validate()?;
        Ok(LoginPayload {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            remember_me: self.remember_me,
        })
    }
}
