use serde::Serialize;

use crate::catalogue::Category;
use crate::error::PlanError;

/// One category's outcome within a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    pub category: Category,
    pub outcome: Result<String, PlanError>,
    pub elapsed_ms: u64,
}

impl PlanEntry {
    /// Rendered text, or the placeholder for a failed category.
    pub fn text(&self) -> String {
        match &self.outcome {
            Ok(text) => text.clone(),
            Err(err) => err.user_message(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Results in selection order, which is also display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelPlan {
    entries: Vec<PlanEntry>,
}

#[derive(Debug, Serialize)]
pub struct RenderedEntry {
    pub category: Category,
    pub title: &'static str,
    pub text: String,
    pub elapsed_ms: u64,
}

impl TravelPlan {
    pub(super) fn push(&mut self, entry: PlanEntry) {
        self.entries.push(entry);
    }

    pub fn contains(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    pub fn get(&self, category: Category) -> Option<&PlanEntry> {
        self.entries.iter().find(|entry| entry.category == category)
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.is_success()).count()
    }

    pub fn rendered(&self) -> Vec<RenderedEntry> {
        self.entries
            .iter()
            .map(|entry| RenderedEntry {
                category: entry.category,
                title: entry.category.title(),
                text: entry.text(),
                elapsed_ms: entry.elapsed_ms,
            })
            .collect()
    }
}
