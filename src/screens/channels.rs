use tracing::debug;

use crate::Result;
use crate::api::{ApiClient, Channel};
use crate::context::AppContext;
use crate::forms::ChannelForm;
use crate::types::FormMode;

use super::{Feedback, with_feedback};

const LIST_FAILED: &str = "Erro ao buscar canais. Tente novamente.";
const LOAD_FAILED: &str = "Erro ao carregar canal. Tente novamente.";
const SAVE_FAILED: &str = "Erro ao salvar canal. Tente novamente.";

pub struct ChannelsScreen<'a> {
    api: &'a ApiClient,
    ctx: &'a AppContext,
    channels: Vec<Channel>,
    loaded: bool,
}

impl<'a> ChannelsScreen<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient, ctx: &'a AppContext) -> Self {
        Self {
            api,
            ctx,
            channels: Vec::new(),
            loaded: false,
        }
    }

    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn load(&mut self) -> Result<&[Channel]> {
        self.channels = with_feedback(
            self.ctx,
            Feedback::failing("list_channels", LIST_FAILED),
            self.api.list_channels(),
        )
        .await?;
        self.loaded = true;
        debug!(count = self.channels.len(), "channels loaded");
        Ok(&self.channels)
    }

    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn fetch(&self, id: &str) -> Result<Channel> {
        with_feedback(
            self.ctx,
            Feedback::failing("load_channel", LOAD_FAILED),
            self.api.channel(id),
        )
        .await
    }

    /// Loads one record as edit-form values.
    ///
    /// # Errors
    ///
    /// Returns the request error after toasting it.
    pub async fn open(&self, id: &str) -> Result<ChannelForm> {
        let channel = self.fetch(id).await?;
        Ok(ChannelForm::from_channel(&channel))
    }

    /// Validates and submits the form. A loaded list is refreshed afterwards.
    ///
    /// # Errors
    ///
    /// Validation failures come back untoasted; request failures are toasted.
    pub async fn save(&mut self, form: &ChannelForm, mode: &FormMode) -> Result<Channel> {
        let payload = form.payload()?;
        let feedback = Feedback::saving(
            mode,
            "Canal criado com sucesso!",
            "Canal atualizado com sucesso!",
            SAVE_FAILED,
        );
        let saved = match mode {
            FormMode::Create => {
                with_feedback(self.ctx, feedback, self.api.create_channel(&payload)).await?
            }
            FormMode::Edit(id) => {
                with_feedback(self.ctx, feedback, self.api.update_channel(id, &payload)).await?
            }
        };
        if self.loaded {
            // Already toasted on failure; the save itself went through.
            let _ = self.load().await;
        }
        Ok(saved)
    }
}
