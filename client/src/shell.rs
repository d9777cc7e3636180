use crate::index_client::IndexApi;
use crate::models::SelectedFile;
use crate::view_model::{Effect, Event, ViewState};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

/// Owns the view state and runs the requests the state asks for.
///
/// Requests run on spawned tasks, so a second action can be issued while an
/// earlier one is still in flight. State changes are published to
/// subscribers, except edits to the query text, which show up with the next
/// published change; see [`Shell::subscribe`].
#[derive(Clone)]
pub struct Shell {
    state: Arc<RwLock<ViewState>>,
    api: Arc<dyn IndexApi>,
    updates: Arc<watch::Sender<ViewState>>,
}

impl Shell {
    pub fn new(api: Arc<dyn IndexApi>) -> Self {
        let (updates, _) = watch::channel(ViewState::new());

        Self {
            state: Arc::new(RwLock::new(ViewState::new())),
            api,
            updates: Arc::new(updates),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn on_query_changed(&self, text: impl Into<String>) {
        self.dispatch(Event::QueryChanged(text.into())).await;
    }

    pub async fn on_query_submit(&self) -> Option<JoinHandle<()>> {
        self.dispatch(Event::QuerySubmitted).await
    }

    pub async fn on_file_selected(&self, file: SelectedFile) {
        self.dispatch(Event::FileSelected(file)).await;
    }

    pub async fn on_upload_click(&self) -> Option<JoinHandle<()>> {
        self.dispatch(Event::UploadClicked).await
    }

    /// Applies `event` and, if it needs a request, starts it in the
    /// background. The returned handle resolves once the outcome has been
    /// applied.
    pub async fn dispatch(&self, event: Event) -> Option<JoinHandle<()>> {
        let effect = self.apply(event).await?;
        let shell = self.clone();

        Some(tokio::spawn(async move {
            let outcome = shell.run(effect).await;
            shell.apply(outcome).await;
        }))
    }

    async fn apply(&self, event: Event) -> Option<Effect> {
        let publish = !matches!(event, Event::QueryChanged(_));
        let mut state = self.state.write().await;
        let effect = state.apply(event);
        if publish {
            self.updates.send_replace(state.clone());
        }
        effect
    }

    async fn run(&self, effect: Effect) -> Event {
        match effect {
            Effect::SubmitQuery { ticket, text } => match self.api.submit_query(&text).await {
                Ok(response) => Event::QueryAnswered {
                    ticket,
                    answer: response.answer,
                },
                Err(e) => {
                    log::error!("Error querying index: {:#}", e);
                    Event::QueryFailed { ticket }
                }
            },
            Effect::Upload { ticket, file } => match self.api.upload_document(&file).await {
                Ok(ack) => {
                    log::info!("Uploaded {}: {}", file.name, ack);
                    Event::UploadSucceeded { ticket }
                }
                Err(e) => {
                    log::error!("Error uploading file {}: {:#}", file.name, e);
                    Event::UploadFailed { ticket }
                }
            },
        }
    }
}
