use tracing::{debug, error};

use crate::Result;
use crate::api::{ApiClient, Category, ListQuery, Product};
use crate::context::AppContext;
use crate::forms::ProductForm;
use crate::types::FormMode;

use super::{Failure, Feedback, Pagination, with_feedback};

const LOAD_FAILED: &str = "Erro ao carregar produto. Tente novamente.";
const SAVE_FAILED: &str = "Erro ao salvar produto. Tente novamente.";
const CATEGORIES_FAILED: &str = "Erro ao carregar categorias.";

const LIST: Feedback = Feedback {
    action: "list_products",
    success: Some("Lista atualizada."),
    failure: Failure::ServerMessage,
};

pub struct ProductsScreen<'a> {
    api: &'a ApiClient,
    ctx: &'a AppContext,
    products: Vec<Product>,
    pagination: Pagination,
    search: Option<String>,
    category_id: Option<String>,
    loaded: bool,
}

impl<'a> ProductsScreen<'a> {
    #[must_use]
    pub fn new(api: &'a ApiClient, ctx: &'a AppContext) -> Self {
        Self {
            api,
            ctx,
            products: Vec::new(),
            pagination: Pagination::default(),
            search: None,
            category_id: None,
            loaded: false,
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search.filter(|text| !text.trim().is_empty());
    }

    pub fn set_category(&mut self, category_id: Option<String>) {
        self.category_id = category_id.filter(|id| !id.trim().is_empty());
    }

    /// Fetches one page. A success toast confirms the refresh; failures show
    /// the backend's message when it sent one.
    ///
    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn load(&mut self, page: u32) -> Result<&[Product]> {
        let query = ListQuery {
            page: Some(page),
            search: self.search.clone(),
            category_id: self.category_id.clone(),
        };
        let result = with_feedback(self.ctx, LIST, self.api.list_products(&query)).await?;
        self.products = result.items;
        self.pagination = Pagination::new(page, result.total_pages);
        self.loaded = true;
        debug!(page, total_pages = result.total_pages, "products loaded");
        Ok(&self.products)
    }

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

    /// Options for the category picker. A failed fetch is toasted and leaves
    /// the picker empty.
    pub async fn category_options(&self) -> Vec<Category> {
        let _spinner = self.ctx.spinner.show();
        match self.api.list_categories(&ListQuery::default()).await {
            Ok(page) => page.items,
            Err(err) => {
                error!(action = "list_categories", error = %err, "request failed");
                self.ctx.toasts.error(CATEGORIES_FAILED);
                Vec::new()
            }
        }
    }

    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn open(&self, id: &str) -> Result<ProductForm> {
        let product = self.fetch(id).await?;
        Ok(ProductForm::from_product(&product))
    }

    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn fetch(&self, id: &str) -> Result<Product> {
        with_feedback(
            self.ctx,
            Feedback::failing("load_product", LOAD_FAILED),
            self.api.product(id),
        )
        .await
    }

    /// # Errors
    ///
    /// Validation failures come back untoasted; request and upload failures
    /// are toasted.
    pub async fn save(&mut self, form: &ProductForm, mode: &FormMode) -> Result<Product> {
        let upload = form.upload()?;
        let feedback = Feedback::saving(
            mode,
            "Produto criado com sucesso!",
            "Produto atualizado com sucesso!",
            SAVE_FAILED,
        );
        let saved = match mode {
            FormMode::Create => {
                with_feedback(self.ctx, feedback, self.api.create_product(upload)).await?
            }
            FormMode::Edit(id) => {
                with_feedback(self.ctx, feedback, self.api.update_product(id, upload)).await?
            }
        };
        if self.loaded {
            let _ = self.load(self.pagination.current()).await;
        }
        Ok(saved)
    }
}
