//! Search layer — live substring filter over record names.
//!
//! Matching is plain substring containment. The case rule is explicit:
//! [`CaseRule::Sensitive`] compares bytes as-is, [`CaseRule::Insensitive`]
//! lowercases both sides first. An empty filter matches everything.

use crate::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseRule {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseRule {
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            CaseRule::Sensitive
        } else {
            CaseRule::Insensitive
        }
    }
}

/// The display layer's current filter string plus its case rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    text: String,
    case: CaseRule,
    /// `text` lowercased once up front for insensitive matching.
    folded: String,
}

impl Filter {
    pub fn new(text: impl Into<String>, case: CaseRule) -> Self {
        let text = text.into();
        let folded = match case {
            CaseRule::Sensitive => String::new(),
            CaseRule::Insensitive => text.to_lowercase(),
        };
        Self { text, case, folded }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn case(&self) -> CaseRule {
        self.case
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn matches_name(&self, name: &str) -> bool {
        if self.text.is_empty() {
            return true;
        }
        match self.case {
            CaseRule::Sensitive => name.contains(self.text.as_str()),
            CaseRule::Insensitive => name.to_lowercase().contains(self.folded.as_str()),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_name(record.name())
    }

    /// Matching records, in their original order.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
