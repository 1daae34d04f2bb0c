use serde::Serialize;

use crate::api::{Category, CategoryPayload};
use crate::validation::{FieldRule, Schema, ValidationErrors};

use super::{FormValues, non_empty};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub parent_id: String,
}

impl FormValues for CategoryForm {
    fn schema() -> Schema {
        Schema::new()
            .field(
                "name",
                FieldRule::required("O nome da categoria é obrigatório"),
            )
            .field("description", FieldRule::optional())
            .field("parentId", FieldRule::optional())
    }
}

impl CategoryForm {
    #[must_use]
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            parent_id: category
                .parent
                .as_ref()
                .map(|parent| parent.id.clone())
                .unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// Returns the validation errors when the form is incomplete.
    pub fn payload(&self) -> Result<CategoryPayload, ValidationErrors> {
        self.validate()?;
        Ok(CategoryPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            parent_id: non_empty(&self.parent_id),
        })
    }
}
