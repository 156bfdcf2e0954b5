//! Tab selection for the Experience section.
//!
//! One tab per position; exactly one tab is selected while the list is
//! non-empty. Reloading the list (e.g. after a locale change) resets the
//! selection to the first tab.

use crate::error::{FolioError, Result};
use crate::models::Experience;

#[derive(Debug, Clone, Default)]
pub struct ExperienceTabs {
    experiences: Vec<Experience>,
    selected: usize,
}

impl ExperienceTabs {
    pub fn new(experiences: Vec<Experience>) -> Self {
        Self {
            experiences,
            selected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.experiences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiences.is_empty()
    }

    /// Index of the selected tab.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected experience, `None` when there are no tabs.
    pub fn selected(&self) -> Option<&Experience> {
        self.experiences.get(self.selected)
    }

    /// Tab labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.experiences.iter().map(|e| e.company.as_str())
    }

    /// Select tab `index`. Out-of-range indices leave the selection unchanged.
    pub fn select(&mut self, index: usize) -> Result<&Experience> {
        if index >= self.experiences.len() {
            return Err(FolioError::Validation(format!(
                "tab {} out of range ({} tabs)",
                index,
                self.experiences.len()
            )));
        }
        self.selected = index;
        Ok(&self.experiences[index])
    }

    /// Select the tab whose company matches `company` (case-insensitive).
    pub fn select_company(&mut self, company: &str) -> Result<&Experience> {
        let index = self
            .experiences
            .iter()
            .position(|e| e.company.eq_ignore_ascii_case(company.trim()))
            .ok_or_else(|| FolioError::Validation(format!("no tab for '{}'", company.trim())))?;
        self.select(index)
    }

    /// Move to the next tab, wrapping to the first.
    pub fn select_next(&mut self) -> Option<&Experience> {
        if self.experiences.is_empty() {
            return None;
        }
        self.selected = (self.selected + 1) % self.experiences.len();
        self.selected()
    }

    /// Move to the previous tab, wrapping to the last.
    pub fn select_previous(&mut self) -> Option<&Experience> {
        if self.experiences.is_empty() {
            return None;
        }
        let len = self.experiences.len();
        self.selected = (self.selected + len - 1) % len;
        self.selected()
    }

    /// Replace the tab list and select the first tab.
    pub fn reset(&mut self, experiences: Vec<Experience>) {
        self.experiences = experiences;
        self.selected = 0;
    }
}
