use serde::Serialize;

use crate::api::{Address, Location, LocationPayload};
use crate::validation::{Constraint, FieldRule, Schema, ValidationErrors};

use super::FormValues;

/// UF code and state name, in the order the state picker lists them.
pub const BRAZILIAN_STATES: [(&str, &str); 27] = [
    ("AC", "Acre"),
    ("AL", "Alagoas"),
    ("AP", "Amapá"),
    ("AM", "Amazonas"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("DF", "Distrito Federal"),
    ("ES", "Espírito Santo"),
    ("GO", "Goiás"),
    ("MA", "Maranhão"),
    ("MT", "Mato Grosso"),
    ("MS", "Mato Grosso do Sul"),
    ("MG", "Minas Gerais"),
    ("PA", "Pará"),
    ("PB", "Paraíba"),
    ("PR", "Paraná"),
    ("PE", "Pernambuco"),
    ("PI", "Piauí"),
    ("RJ", "Rio de Janeiro"),
    ("RN", "Rio Grande do Norte"),
    ("RS", "Rio Grande do Sul"),
    ("RO", "Rondônia"),
    ("RR", "Roraima"),
    ("SC", "Santa Catarina"),
    ("SP", "São Paulo"),
    ("SE", "Sergipe"),
    ("TO", "Tocantins"),
];

/// Case-insensitive; surrounding whitespace is ignored.
#[must_use]
pub fn state_name(code: &str) -> Option<&'static str> {
    let code = code.trim();
    BRAZILIAN_STATES
        .iter()
        .find(|(uf, _)| uf.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

fn is_state_code(value: &str) -> bool {
    state_name(value).is_some()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AddressForm {
    pub cep: String,
    pub address: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LocationForm {
    pub name: String,
    pub capacity: Option<i64>,
    pub address: AddressForm,
}

impl FormValues for LocationForm {
    fn schema() -> Schema {
        Schema::new()
            .field(
                "name",
                FieldRule::required("O nome da localização é obrigatório"),
            )
            .field(
                "capacity",
                FieldRule::required("A capacidade é obrigatória")
                    .with(Constraint::Integer {
                        message: "A capacidade deve ser um número inteiro",
                    })
                    .with(Constraint::Min {
                        bound: 0.0,
                        message: "A capacidade deve ser no mínimo 0",
                    }),
            )
            .field("address.cep", FieldRule::required("CEP é obrigatório"))
            .field(
                "address.address",
                FieldRule::required("Endereço é obrigatório"),
            )
            .field("address.number", FieldRule::required("Número é obrigatório"))
            .field("address.complement", FieldRule::optional())
            .field(
                "address.neighborhood",
                FieldRule::required("Bairro é obrigatório"),
            )
            .field("address.city", FieldRule::required("Cidade é obrigatória"))
            .field(
                "address.state",
                FieldRule::required("Estado é obrigatório").with(Constraint::Format {
                    check: is_state_code,
                    message: "Estado inválido",
                }),
            )
    }
}

impl LocationForm {
    #[must_use]
    pub fn from_location(location: &Location) -> Self {
        let address = location
            .address
            .as_ref()
            .map(|a| AddressForm {
                cep: a.cep.clone(),
                address: a.address.clone(),
                number: a.number.clone(),
                complement: a.complement.clone().unwrap_or_default(),
                neighborhood: a.neighborhood.clone(),
                city: a.city.clone(),
                state: a.state.clone(),
            })
            .unwrap_or_default();
        Self {
            name: location.name.clone(),
            capacity: Some(location.capacity),
            address,
        }
    }

    /// # Errors
    ///
    /// Returns the validation errors when the form is incomplete.
    pub fn payload(&self) -> Result<LocationPayload, ValidationErrors> {
        self.validate()?;
        let a = &self.address;
        Ok(LocationPayload {
            name: self.name.trim().to_string(),
            capacity: self.capacity.unwrap_or_default(),
            address: Address {
                cep: a.cep.trim().to_string(),
                address: a.address.trim().to_string(),
                number: a.number.trim().to_string(),
                complement: Some(a.complement.trim().to_string()),
                neighborhood: a.neighborhood.trim().to_string(),
                city: a.city.trim().to_string(),
                state: a.state.trim().to_ascii_uppercase(),
            },
        })
    }
}
