use reqwest::Method;
use secrecy::SecretString;
use tracing::info;

use crate::Result;
use crate::error::ApiError;

use super::ApiClient;
use super::models::{
    Category, CategoryPayload, Channel, ChannelPayload, ListQuery, Location, LocationPayload,
    LoginPayload, LoginResponse, Page, Product,
};
use super::upload::ProductUpload;

const CHANNELS: &str = "channels";
const LOCATIONS: &str = "locations";
const CATEGORIES: &str = "categories";
const PRODUCTS: &str = "products";

impl ApiClient {
    /// Exchanges credentials for an access token. The client itself keeps
    /// its current token; see [`ApiClient::set_token`].
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when no login path is set, and with
    /// an API error when the backend rejects the credentials or answers
    /// without a token.
    pub async fn login(&self, payload: &LoginPayload) -> Result<SecretString> {
        let segments = self.login_segments()?;
        let response: LoginResponse = self
            .send(self.request(Method::POST, &segments).json(payload))
            .await?;
        if response.access_token.trim().is_empty() {
            return Err(ApiError::Json {
                message: "login response carried an empty access token".to_string(),
            }
            .into());
        }
        info!(username = %payload.username, "signed in");
        Ok(SecretString::from(response.access_token))
    }

    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        self.send(self.request(Method::GET, &[CHANNELS])).await
    }

    pub async fn channel(&self, id: &str) -> Result<Channel> {
        self.send(self.request(Method::GET, &[CHANNELS, id])).await
    }

    pub async fn create_channel(&self, payload: &ChannelPayload) -> Result<Channel> {
        self.send(self.request(Method::POST, &[CHANNELS]).json(payload))
            .await
    }

    pub async fn update_channel(&self, id: &str, payload: &ChannelPayload) -> Result<Channel> {
        self.send(self.request(Method::PATCH, &[CHANNELS, id]).json(payload))
            .await
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        self.send(self.request(Method::GET, &[LOCATIONS])).await
    }

    pub async fn location(&self, id: &str) -> Result<Location> {
        self.send(self.request(Method::GET, &[LOCATIONS, id])).await
    }

    pub async fn create_location(&self, payload: &LocationPayload) -> Result<Location> {
        self.send(self.request(Method::POST, &[LOCATIONS]).json(payload))
            .await
    }

    pub async fn update_location(&self, id: &str, payload: &LocationPayload) -> Result<Location> {
        self.send(self.request(Method::PATCH, &[LOCATIONS, id]).json(payload))
            .await
    }

    pub async fn list_categories(&self, query: &ListQuery) -> Result<Page<Category>> {
        self.send(self.request(Method::GET, &[CATEGORIES]).query(query))
            .await
    }

    pub async fn category(&self, id: &str) -> Result<Category> {
        self.send(self.request(Method::GET, &[CATEGORIES, id])).await
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<Category> {
        self.send(self.request(Method::POST, &[CATEGORIES]).json(payload))
            .await
    }

    pub async fn update_category(&self, id: &str, payload: &CategoryPayload) -> Result<Category> {
        self.send(self.request(Method::PATCH, &[CATEGORIES, id]).json(payload))
            .await
    }

    pub async fn list_products(&self, query: &ListQuery) -> Result<Page<Product>> {
        self.send(self.request(Method::GET, &[PRODUCTS]).query(query))
            .await
    }

    pub async fn product(&self, id: &str) -> Result<Product> {
        self.send(self.request(Method::GET, &[PRODUCTS, id])).await
    }

    pub async fn create_product(&self, upload: ProductUpload) -> Result<Product> {
        let form = upload.into_form().await?;
        self.send(self.request(Method::POST, &[PRODUCTS]).multipart(form))
            .await
    }

    pub async fn update_product(&self, id: &str, upload: ProductUpload) -> Result<Product> {
        let form = upload.into_form().await?;
        self.send(self.request(Method::PATCH, &[PRODUCTS, id]).multipart(form))
            .await
    }
}
