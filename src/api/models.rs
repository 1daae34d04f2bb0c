use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<CategoryRef>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Address {
    pub cep: String,
    pub address: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl Address {
    /// One-line form used in location listings.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.address, self.number, self.city, self.state
        )
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_i64")]
    pub capacity: i64,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_bool")]
    pub is_primary: bool,
    #[serde(default, deserialize_with = "deserialize_bool")]
    pub is_list_image: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub brand: String,
    #[serde(deserialize_with = "deserialize_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "deserialize_opt_i64")]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
    }
}

/// One page of a paginated listing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Page<T> {
    #[serde(alias = "products", alias = "categories")]
    pub items: Vec<T>,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
}

/// Query string of the paginated listings; unset fields are omitted.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl ListQuery {
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }
}

/// Request bodies carry every form field: PATCH only touches what is sent, so
/// a cleared field goes out as `""` (text) or `null` (reference).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelPayload {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationPayload {
    pub name: String,
    pub capacity: i64,
    pub address: Address,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
    #[serde(rename = "rememberMe")]
    pub remember_me: bool,
}

impl std::fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginPayload")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(rename = "accessToken", alias = "access_token", alias = "token")]
    pub(crate) access_token: String,
}

fn deserialize_i64<'de, D>(de: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_opt_i64(de)?.ok_or_else(|| serde::de::Error::custom("expected an integer"))
}

fn deserialize_opt_i64<'de, D>(de: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeI64 {
        Int(i64),
        Str(String),
        Null,
    }

    match MaybeI64::deserialize(de)? {
        MaybeI64::Int(value) => Ok(Some(value)),
        MaybeI64::Str(value) => value
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        MaybeI64::Null => Ok(None),
    }
}

/// Decimal columns may arrive as JSON numbers or as numeric strings.
fn deserialize_f64<'de, D>(de: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeF64 {
        Num(f64),
        Str(String),
    }

    match MaybeF64::deserialize(de)? {
        MaybeF64::Num(value) => Ok(value),
        MaybeF64::Str(value) => value.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

fn deserialize_bool<'de, D>(de: D) -> std::result::Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Boolish {
        Bool(bool),
        Int(i64),
        Str(String),
        Null,
    }

    Ok(match Boolish::deserialize(de)? {
        Boolish::Bool(value) => value,
        Boolish::Int(value) => value != 0,
        Boolish::Str(value) => matches!(value.as_str(), "1" | "true" | "TRUE"),
        Boolish::Null => false,
    })
}
