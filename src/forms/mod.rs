//! Form values, their validation schemas and the payloads they submit.

mod category;
mod channel;
mod images;
mod location;
mod login;
pub mod price;
mod product;

use serde::Serialize;

use crate::validation::{Schema, ValidationErrors, validate};

pub use category::CategoryForm;
pub use channel::ChannelForm;
pub use images::{ImageDraft, ImageSet};
pub use location::{AddressForm, BRAZILIAN_STATES, LocationForm, state_name};
pub use login::LoginForm;
pub use product::ProductForm;

/// A form whose serialized values are checked against a declarative schema.
pub trait FormValues: Serialize {
    fn schema() -> Schema;

    /// # Errors
    ///
    /// Returns the failing fields with their messages.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let values = serde_json::to_value(self).unwrap_or_default();
        validate(&Self::schema(), &values)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
