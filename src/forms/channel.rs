use serde::Serialize;

use crate::api::{Channel, ChannelPayload};
use crate::validation::{FieldRule, Schema, ValidationErrors};

use super::FormValues;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChannelForm {
    pub name: String,
    pub description: String,
}

impl FormValues for ChannelForm {
    fn schema() -> Schema {
        Schema::new()
            .field("name", FieldRule::required("O nome do canal é obrigatório"))
            .field("description", FieldRule::optional())
    }
}

impl ChannelForm {
    #[must_use]
    pub fn from_channel(channel: &Channel) -> Self {
        Self {
            name: channel.name.clone(),
            description: channel.description.clone().unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// Returns the validation errors when the form is incomplete.
    pub fn payload(&self) -> Result<ChannelPayload, ValidationErrors> {
        self.validate()?;
        Ok(ChannelPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}
