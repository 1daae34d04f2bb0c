use tracing::debug;

use crate::Result;
use crate::api::{ApiClient, Location};
use crate::context::AppContext;
use crate::forms::LocationForm;
use crate::types::FormMode;

use super::{Feedback, with_feedback};

const LIST_FAILED: &str = "Erro ao buscar localizações. Tente novamente.";
const LOAD_FAILED: &str = "Erro ao carregar localização. Tente novamente.";
const SAVE_FAILED: &str = "Erro ao salvar localização. Tente novamente.";

pub struct LocationsScreen<'a> {
    api: &'a ApiClient,
    ctx: &'a AppContext,
    locations: Vec<Location>,
    loaded: bool,
}

impl<'a> LocationsScreen<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient, ctx: &'a AppContext) -> Self {
        Self {
            api,
            ctx,
            locations: Vec::new(),
            loaded: false,
        }
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn load(&mut self) -> Result<&[Location]> {
        self.locations = with_feedback(
            self.ctx,
            Feedback::failing("list_locations", LIST_FAILED),
            self.api.list_locations(),
        )
        .await?;
        self.loaded = true;
        debug!(count = self.locations.len(), "locations loaded");
        Ok(&self.locations)
    }

    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn fetch(&self, id: &str) -> Result<Location> {
        with_feedback(
            self.ctx,
            Feedback::failing("load_location", LOAD_FAILED),
            self.api.location(id),
        )
        .await
    }

    /// Loads one record as edit-form values.
    ///
    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn open(&self, id: &str) -> Result<LocationForm> {
        let location = self.fetch(id).await?;
        Ok(LocationForm::from_location(&location))
    }

    /// # Errors
    ///
    /// Validation failures come back untoasted; request failures are toasted.
    pub async fn save(&mut self, form: &LocationForm, mode: &FormMode) -> Result<Location> {
        let payload = form.payload()?;
        let feedback = Feedback::saving(
            mode,
            "Localização criada com sucesso!",
            "Localização atualizada com sucesso!",
            SAVE_FAILED,
        );
        let saved = match mode {
            FormMode::Create => {
                with_feedback(self.ctx, feedback, self.api.create_location(&payload)).await?
            }
            FormMode::Edit(id) => {
                with_feedback(self.ctx, feedback, self.api.update_location(id, &payload)).await?
            }
        };
        if self.loaded {
            let _ = self.load().await;
        }
        Ok(saved)
    }
}
