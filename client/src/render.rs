use crate::view_model::ViewState;
use std::fmt;

pub const TITLE: &str = "CKS RAG APP";

/// Lays the view out as plain text: query section, divider, upload section.
/// Empty slots are left out, the same way the answer and status lines only
/// show up once they have something in them.
pub struct View<'a>(pub &'a ViewState);

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        writeln!(f, "==== {} ====", TITLE)?;
        writeln!(f)?;
        writeln!(f, "Query the Index")?;
        writeln!(f, "  Type `query <text>` to get an answer.")?;
        if !state.query.is_empty() {
            writeln!(f, "  Query: {}", state.query)?;
        }
        if !state.answer.is_empty() {
            writeln!(f, "  Answer: {}", state.answer)?;
        }

        writeln!(f, "----")?;

        writeln!(f, "Upload a File")?;
        writeln!(f, "  Type `file <path>` then `upload` to add it to the index.")?;
        match &state.selected_file {
            Some(file) => writeln!(f, "  Selected File: {}", file.name)?,
            None => writeln!(f, "  No file chosen.")?,
        }
        if !state.can_upload() {
            writeln!(f, "  (upload disabled until a file is chosen)")?;
        }
        if !state.status_message.is_empty() {
            writeln!(f, "  [{}]", state.status_message)?;
        }

        Ok(())
    }
}

pub fn render(state: &ViewState) -> String {
    View(state).to_string()
}
