pub(crate) mod body;
pub(crate) mod client;
pub(crate) mod models;
pub(crate) mod ops;
pub(crate) mod upload;

pub use client::ApiClient;
pub use models::{
    Address, Category, CategoryPayload, CategoryRef, Channel, ChannelPayload, ListQuery,
    Location, LocationPayload, LoginPayload, Page, Product, ProductImage,
};
pub use upload::{ImageUpload, ProductUpload};
