//! View state for the query/upload screen and the events that change it.
//!
//! `ViewState::apply` is the only place state transitions happen. It never
//! touches the network; when an event needs a request it hands back an
//! [`Effect`] for the caller to run, and the outcome comes back in as another
//! event carrying the same ticket.

use crate::models::SelectedFile;

pub const PROMPT_FOR_QUERY: &str = "Please enter a query.";
pub const PROCESSING_QUERY: &str = "Processing your query...";
pub const QUERY_FAILED: &str = "Error processing query.";

pub const NO_FILE_SELECTED: &str = "No file selected!";
pub const UPLOADING: &str = "Uploading...";
pub const UPLOAD_SUCCEEDED: &str = "File uploaded successfully!";
pub const UPLOAD_FAILED: &str = "Error uploading file.";

pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    QueryChanged(String),
    QuerySubmitted,
    QueryAnswered { ticket: Ticket, answer: String },
    QueryFailed { ticket: Ticket },
    FileSelected(SelectedFile),
    UploadClicked,
    UploadSucceeded { ticket: Ticket },
    UploadFailed { ticket: Ticket },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitQuery { ticket: Ticket, text: String },
    Upload { ticket: Ticket, file: SelectedFile },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub selected_file: Option<SelectedFile>,
    pub status_message: String,
    pub query: String,
    pub answer: String,
    // Ticket of the most recently issued request per action.
    query_ticket: Ticket,
    upload_ticket: Ticket,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_upload(&self) -> bool {
        self.selected_file.is_some()
    }

    pub fn apply(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::QueryChanged(text) => {
                self.query = text;
                None
            }
            Event::QuerySubmitted => {
                if self.query.is_empty() {
                    self.answer = PROMPT_FOR_QUERY.to_string();
                    return None;
                }

                self.query_ticket += 1;
                self.answer = PROCESSING_QUERY.to_string();
                Some(Effect::SubmitQuery {
                    ticket: self.query_ticket,
                    text: self.query.clone(),
                })
            }
            Event::QueryAnswered { ticket, answer } => {
                if self.is_current_query(ticket) {
                    self.answer = answer;
                }
                None
            }
            Event::QueryFailed { ticket } => {
                if self.is_current_query(ticket) {
                    self.answer = QUERY_FAILED.to_string();
                }
                None
            }
            Event::FileSelected(file) => {
                self.selected_file = Some(file);
                None
            }
            Event::UploadClicked => {
                let Some(file) = self.selected_file.clone() else {
                    self.status_message = NO_FILE_SELECTED.to_string();
                    return None;
                };

                self.upload_ticket += 1;
                self.status_message = UPLOADING.to_string();
                Some(Effect::Upload {
                    ticket: self.upload_ticket,
                    file,
                })
            }
            Event::UploadSucceeded { ticket } => {
                if self.is_current_upload(ticket) {
                    self.status_message = UPLOAD_SUCCEEDED.to_string();
                }
                None
            }
            Event::UploadFailed { ticket } => {
                if self.is_current_upload(ticket) {
                    self.status_message = UPLOAD_FAILED.to_string();
                }
                None
            }
        }
    }

    fn is_current_query(&self, ticket: Ticket) -> bool {
        let current = ticket == self.query_ticket;
        if !current {
            log::debug!(
                "Dropping stale query result (ticket {}, latest {})",
                ticket,
                self.query_ticket
            );
        }
        current
    }

    fn is_current_upload(&self, ticket: Ticket) -> bool {
        let current = ticket == self.upload_ticket;
        if !current {
            log::debug!(
                "Dropping stale upload result (ticket {}, latest {})",
                ticket,
                self.upload_ticket
            );
        }
        current
    }
}
