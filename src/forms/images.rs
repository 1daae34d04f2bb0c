use std::path::PathBuf;

use serde::Serialize;

use crate::api::{ImageUpload, ProductImage};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub url: String,
    pub is_primary: bool,
    pub is_list_image: bool,
    #[serde(skip)]
    pub file: Option<PathBuf>,
}

impl From<&ProductImage> for ImageDraft {
    fn from(image: &ProductImage) -> Self {
        Self {
            id: image.id.clone(),
            url: image.url.clone(),
            is_primary: image.is_primary,
            is_list_image: image.is_list_image,
            file: None,
        }
    }
}

impl From<ImageDraft> for ImageUpload {
    fn from(draft: ImageDraft) -> Self {
        Self {
            id: draft.id,
            url: draft.url,
            is_primary: draft.is_primary,
            is_list_image: draft.is_list_image,
            file: draft.file,
        }
    }
}

/// Ordered product images with their primary flag.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImageSet(Vec<ImageDraft>);

impl ImageSet {
    #[must_use]
    pub fn from_stored(images: &[ProductImage]) -> Self {
        Self(images.iter().map(ImageDraft::from).collect())
    }

    /// Append local files; none of them becomes primary.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = PathBuf>) {
        self.0.extend(files.into_iter().map(|path| ImageDraft {
            id: None,
            url: path.display().to_string(),
            is_primary: false,
            is_list_image: false,
            file: Some(path),
        }));
    }

    /// Make the image at `index` the only primary one. Out-of-range indexes
    /// leave the set untouched and return `false`.
    pub fn set_primary(&mut self, index: usize) -> bool {
        if index >= self.0.len() {
            return false;
        }
        for (i, image) in self.0.iter_mut().enumerate() {
            image.is_primary = i == index;
        }
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<ImageDraft> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    #[must_use]
    pub fn primary_count(&self) -> usize {
        self.0.iter().filter(|image| image.is_primary).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageDraft> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(super) fn into_uploads(self) -> Vec<ImageUpload> {
        self.0.into_iter().map(ImageUpload::from).collect()
    }
}
