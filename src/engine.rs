use crate::config::LayoutConfig;
use crate::foundation::error::FolioResult;
use crate::layout::flow::LayoutSession;
use crate::model::entry::Entry;
use crate::model::page::{LayoutOutput, Page};

/// Validated layout configuration, ready to paginate entry lists.
///
/// The engine holds no per-run state: every [`LayoutEngine::process_entries`] call starts a
/// fresh session, so repeated calls with the same input produce identical output.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Validate `config` and build an engine.
    pub fn new(config: LayoutConfig) -> FolioResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `entries` in order onto fixed-size pages.
    ///
    /// Never fails: photos that cannot be placed anywhere are reported in
    /// [`LayoutOutput::dropped`].
    #[tracing::instrument(skip_all, fields(entries = entries.len()))]
    pub fn process_entries(&self, entries: &[Entry]) -> LayoutOutput {
        let mut session = match LayoutSession::new(&self.config) {
            Ok(session) => session,
            Err(err) => {
                // `new` validated the same config.
                tracing::error!(%err, "layout session rejected a validated config");
                return LayoutOutput::default();
            }
        };
        for (index, entry) in entries.iter().enumerate() {
            session.place_entry(index, entry);
        }
        let out = session.finish();
        tracing::debug!(
            pages = out.pages.len(),
            dropped = out.dropped.len(),
            "layout complete"
        );
        out
    }
}

/// One-shot layout with a fresh engine.
pub fn process_entries(entries: &[Entry], config: LayoutConfig) -> FolioResult<Vec<Page>> {
    let engine = LayoutEngine::new(config)?;
    Ok(engine.process_entries(entries).pages)
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
