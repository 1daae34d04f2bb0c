use tracing::debug;

use crate::Result;
use crate::api::{ApiClient, Category, ListQuery};
use crate::context::AppContext;
use crate::forms::CategoryForm;
use crate::types::FormMode;

use super::{Feedback, Pagination, with_feedback};

const LIST_FAILED: &str = "Erro ao buscar categorias. Tente novamente.";
const LOAD_FAILED: &str = "Erro ao carregar categoria. Tente novamente.";
const SAVE_FAILED: &str = "Erro ao salvar categoria. Tente novamente.";

pub struct CategoriesScreen<'a> {
    api: &'a ApiClient,
    ctx: &'a AppContext,
    categories: Vec<Category>,
    pagination: Pagination,
    search: Option<String>,
    loaded: bool,
}

impl<'a> CategoriesScreen<'a> {
    #[must_use]
    pub fn new(api: &'a ApiClient, ctx: &'a AppContext) -> Self {
        Self {
            api,
            ctx,
            categories: Vec::new(),
            pagination: Pagination::default(),
            search: None,
            loaded: false,
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Takes effect on the next load. Blank text clears the filter.
    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search.filter(|text| !text.trim().is_empty());
    }

    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn load(&mut self, page: u32) -> Result<&[Category]> {
        let query = ListQuery {
            search: self.search.clone(),
            ..ListQuery::page(page)
        };
        let result = with_feedback(
            self.ctx,
            Feedback::failing("list_categories", LIST_FAILED),
            self.api.list_categories(&query),
        )
        .await?;
        self.categories = result.items;
        self.pagination = Pagination::new(page, result.total_pages);
        self.loaded = true;
        debug!(page, total_pages = result.total_pages, "categories loaded");
        Ok(&self.categories)
    }

    /// Returns `false` without a request when already on the last page.
    ///
    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn next_page(&mut self) -> Result<bool> {
        let Some(page) = self.pagination.next() else {
            return Ok(false);
        };
        self.load(page).await?;
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn previous_page(&mut self) -> Result<bool> {
        let Some(page) = self.pagination.previous() else {
            return Ok(false);
        };
        self.load(page).await?;
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn fetch(&self, id: &str) -> Result<Category> {
        with_feedback(
            self.ctx,
            Feedback::failing("load_category", LOAD_FAILED),
            self.api.category(id),
        )
        .await
    }

    /// Loads one record as edit-form values.
    ///
    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn open(&self, id: &str) -> Result<CategoryForm> {
        let category = self.fetch(id).await?;
        Ok(CategoryForm::from_category(&category))
    }

    /// # Errors
    ///
    /// Validation failures come back untoasted; request failures are toasted.
    pub async fn save(&mut self, form: &CategoryForm, mode: &FormMode) -> Result<Category> {
        let payload = form.payload()?;
        let feedback = Feedback::saving(
            mode,
            "Categoria criada com sucesso!",
            "Categoria atualizada com sucesso!",
            SAVE_FAILED,
        );
        let saved = match mode {
            FormMode::Create => {
                with_feedback(self.ctx, feedback, self.api.create_category(&payload)).await?
            }
            FormMode::Edit(id) => {
                with_feedback(self.ctx, feedback, self.api.update_category(id, &payload)).await?
            }
        };
        if self.loaded {
            let _ = self.load(self.pagination.current()).await;
        }
        Ok(saved)
    }
}
