use crate::{
    config::RuntimeConfiguration,
    data::{RegistrationStore, postgres_store::PostgresStore},
    error::RegistrationResult,
    notification::loading_indicator,
};
use maud::{DOCTYPE, Markup, html};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RegistrationState {
    store: Arc<dyn RegistrationStore>,
    postgres: Option<PostgresStore>,
    config: RuntimeConfiguration,
}

impl RegistrationState {
    pub async fn new(config: RuntimeConfiguration) -> RegistrationResult<Self> {
        let postgres = PostgresStore::new(&config.db_config()).await?;

        Ok(Self {
            store: Arc::new(postgres.clone()),
            postgres: Some(postgres),
            config,
        })
    }

    #[cfg(test)]
    pub fn with_store(store: Arc<dyn RegistrationStore>, config: RuntimeConfiguration) -> Self {
        Self {
            store,
            postgres: None,
            config,
        }
    }

    pub fn store(&self) -> &dyn RegistrationStore {
        self.store.as_ref()
    }

    pub fn render(&self, markup: Markup) -> Markup {
        let event_name = self.config.event_name();

        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { (event_name) " Registration" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center p-6 text-white" {
                    h1 class="text-3xl font-bold mb-8 text-center" { (event_name) }
                    (loading_indicator("Submitting registration..."))
                    div class="max-w-3xl w-full mx-auto" {
                        (markup)
                    }
                }
            }
        }
    }

    pub async fn sensible_shutdown(&self) {
        if let Some(postgres) = &self.postgres {
            postgres.close().await;
        }
    }
}
