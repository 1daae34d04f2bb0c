use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::Result;
use crate::error::ApiError;

/// Multipart body of a product create or update.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductUpload {
    pub name: String,
    pub description: String,
    pub brand: String,
    /// Dot-decimal price, e.g. `1234.56`.
    pub price: String,
    pub categories: Vec<String>,
    pub images: Vec<ImageUpload>,
}

/// An image already stored by the backend (`id` set, no `file`) or a local
/// file to upload (`file` set).
#[derive(Clone, Debug, PartialEq)]
pub struct ImageUpload {
    pub id: Option<String>,
    pub url: String,
    pub is_primary: bool,
    pub is_list_image: bool,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageMetadata<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    url: &'a str,
    is_primary: bool,
    is_list_image: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
}

impl ProductUpload {
    /// `imagesMetadata` as sent to the backend. New files carry their index
    /// in the image list as `position`; stored images carry their `id`.
    #[must_use]
    pub fn images_metadata(&self) -> serde_json::Value {
        let metadata: Vec<ImageMetadata<'_>> = self
            .images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let is_new = image.file.is_some();
                ImageMetadata {
                    id: if is_new { None } else { image.id.as_deref() },
                    url: &image.url,
                    is_primary: image.is_primary,
                    is_list_image: image.is_list_image,
                    position: is_new.then_some(index),
                }
            })
            .collect();
        serde_json::to_value(metadata).unwrap_or_default()
    }

    /// Read the new image files and assemble the multipart form.
    ///
    /// # Errors
    ///
    /// Returns an error when an image file cannot be read.
    pub async fn into_form(self) -> Result<Form> {
        let metadata = self.images_metadata().to_string();
        let mut form = Form::new()
            .text("name", self.name)
            .text("description", self.description)
            .text("brand", self.brand)
            .text("price", self.price);
        for category in self.categories {
            form = form.text("categories", category);
        }
        for path in self.images.into_iter().filter_map(|image| image.file) {
            form = form.part("images", file_part(&path).await?);
        }
        Ok(form.text("imagesMetadata", metadata))
    }
}

async fn file_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(path))
        .map_err(ApiError::from)?;
    Ok(part)
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageUpload, ProductUpload, mime_for};
    use serde_json::json;
    use std::path::{Path, PathBuf};

    fn upload() -> ProductUpload {
        ProductUpload {
            name: "Máscara PFF2".into(),
            description: String::new(),
            brand: "3M".into(),
            price: "12.90".into(),
            categories: vec!["c1".into()],
            images: vec![
                ImageUpload {
                    id: Some("img-1".into()),
                    url: "https://cdn/img-1.png".into(),
                    is_primary: false,
                    is_list_image: true,
                    file: None,
                },
                ImageUpload {
                    id: None,
                    url: "mask.jpg".into(),
                    is_primary: true,
                    is_list_image: false,
                    file: Some(PathBuf::from("/tmp/mask.jpg")),
                },
            ],
        }
    }

    #[test]
    fn metadata_distinguishes_stored_and_new_images() {
        assert_eq!(
            upload().images_metadata(),
            json!([
                { "id": "img-1", "url": "https://cdn/img-1.png", "isPrimary": false, "isListImage": true },
                { "url": "mask.jpg", "isPrimary": true, "isListImage": false, "position": 1 }
            ])
        );
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_for(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let mut upload = upload();
        upload.images[1].file = Some(PathBuf::from("/definitely/not/here.png"));
        let err = upload.into_form().await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Api(crate::error::ApiError::File { .. })
        ));
    }
}
