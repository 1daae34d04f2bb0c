use serde::Serialize;
use serde_json::Value;

use crate::api::{Product, ProductUpload};
use crate::validation::{Constraint, FieldRule, Schema, ValidationErrors};

use super::FormValues;
use super::images::ImageSet;
use super::price::{format_brl, is_valid_brl_price, normalize_price};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub brand: String,
    /// Price as typed, e.g. `1.234,56`.
    pub price: String,
    pub categories: Vec<String>,
    pub images: ImageSet,
}

impl FormValues for ProductForm {
    fn schema() -> Schema {
        Schema::new()
            .field("name", FieldRule::required("Nome do produto é obrigatório"))
            .field("description", FieldRule::optional())
            .field("brand", FieldRule::required("Marca é obrigatória"))
            .field(
                "price",
                FieldRule::required("Preço é obrigatório").with(Constraint::Format {
                    check: is_valid_brl_price,
                    message: "Preço inválido",
                }),
            )
            // Both lists always serialize as arrays, so emptiness is caught by
            // their constraints rather than by a presence check.
            .field(
                "categories",
                FieldRule::optional().with(Constraint::MinItems {
                    count: 1,
                    message: "Selecione pelo menos uma categoria",
                }),
            )
            .field(
                "images",
                FieldRule::optional()
                    .with(Constraint::Check {
                        check: every_image_has_url,
                        message: "A URL da imagem é obrigatória",
                    })
                    .with(Constraint::Check {
                        check: exactly_one_primary,
                        message: "Selecione exatamente uma imagem principal",
                    }),
            )
    }
}

impl ProductForm {
    /// Edit-mode prefill. Only the first category is kept, matching the
    /// single-choice category picker.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            brand: product.brand.clone(),
            price: format_brl(product.price),
            categories: product
                .categories
                .first()
                .map(|category| vec![category.id.clone()])
                .unwrap_or_default(),
            images: ImageSet::from_stored(&product.images),
        }
    }

    /// # Errors
    ///
    /// Returns the validation errors when the form is incomplete.
    pub fn upload(&self) -> Result<ProductUpload, ValidationErrors> {
        self.validate()?;
        Ok(ProductUpload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            brand: self.brand.trim().to_string(),
            price: normalize_price(self.price.trim()),
            categories: self
                .categories
                .iter()
                .filter(|id| !id.trim().is_empty())
                .cloned()
                .collect(),
            images: self.images.clone().into_uploads(),
        })
    }
}

fn images(value: &Value) -> &[Value] {
    match value.as_array() {
        Some(items) => items,
        None => &[],
    }
}

fn every_image_has_url(value: &Value) -> bool {
    images(value).iter().all(|image| {
        image
            .get("url")
            .and_then(Value::as_str)
            .is_some_and(|url| !url.trim().is_empty())
    })
}

fn exactly_one_primary(value: &Value) -> bool {
    images(value)
        .iter()
        .filter(|image| image.get("isPrimary").and_then(Value::as_bool) == Some(true))
        .count()
        == 1
}
