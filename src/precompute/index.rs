//! The collocation index: template -> occurrence records.
//!
//! Entries keep their insertion order in a vector; a hash map from template
//! to entry slot serves lookups. Iteration therefore follows discovery
//! order, which makes encoded output reproducible. Equality ignores entry
//! order but not the order of records within an entry.

use super::types::{format_template, template_arity, Occurrence, Template};
use crate::corpus::Token;
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;

/// Template -> ordered list of occurrence records
#[derive(Debug, Clone, Default)]
pub struct CollocationIndex {
    entries: Vec<(Template, Vec<Occurrence>)>,
    slots: FxHashMap<Template, usize>,
}

impl CollocationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct templates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occurrence records of `template`, in discovery order
    pub fn get(&self, template: &[Token]) -> Option<&[Occurrence]> {
        self.slots
            .get(template)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    pub fn contains(&self, template: &[Token]) -> bool {
        self.slots.contains_key(template)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&[Token], &[Occurrence])> + '_ {
        self.entries
            .iter()
            .map(|(template, occurrences)| (template.as_slice(), occurrences.as_slice()))
    }

    /// Total number of occurrence records across all templates
    pub fn occurrence_count(&self) -> usize {
        self.entries.iter().map(|(_, occurrences)| occurrences.len()).sum()
    }

    /// Append one record, creating the entry on first sight
    pub(crate) fn push(&mut self, template: &[Token], occurrence: Occurrence) {
        debug_assert_eq!(
            template_arity(template).ok(),
            Some(occurrence.arity()),
            "record arity must match template {}",
            format_template(template)
        );

        match self.slots.get(template) {
            Some(&slot) => self.entries[slot].1.push(occurrence),
            None => {
                self.slots.insert(template.to_vec(), self.entries.len());
                self.entries.push((template.to_vec(), vec![occurrence]));
            }
        }
    }

    /// Insert a complete entry read from an encoded index
    pub(crate) fn insert_entry(
        &mut self,
        template: Template,
        occurrences: Vec<Occurrence>,
    ) -> Result<()> {
        let arity = template_arity(&template)?;
        if let Some(bad) = occurrences.iter().find(|o| o.arity() != arity) {
            return Err(Error::ArityMismatch {
                template: format_template(&template),
                expected: arity,
                found: bad.arity(),
            });
        }
        if self.slots.contains_key(&template) {
            return Err(Error::DuplicateTemplate(format_template(&template)));
        }

        self.slots.insert(template.clone(), self.entries.len());
        self.entries.push((template, occurrences));
        Ok(())
    }

    /// Append every entry of `other`, keeping its record order
    ///
    /// Templates already present get `other`'s records appended after their
    /// own; new templates are added after the existing entries.
    pub fn merge(&mut self, other: CollocationIndex) {
        for (template, occurrences) in other.entries {
            match self.slots.get(&template) {
                Some(&slot) => self.entries[slot].1.extend(occurrences),
                None => {
                    self.slots.insert(template.clone(), self.entries.len());
                    self.entries.push((template, occurrences));
                }
            }
        }
    }

    /// Summary counts
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            entries: self.entries.len(),
            ..Default::default()
        };

        for (template, occurrences) in &self.entries {
            if template_arity(template).ok() == Some(3) {
                stats.ternary_templates += 1;
            } else {
                stats.binary_templates += 1;
            }
            stats.occurrences += occurrences.len();
            stats.largest_entry = stats.largest_entry.max(occurrences.len());
        }

        stats
    }

    /// The `n` templates with the most records, ties by template order
    pub fn top_templates(&self, n: usize) -> Vec<(&[Token], usize)> {
        let mut ranked: Vec<(&[Token], usize)> = self
            .entries
            .iter()
            .map(|(template, occurrences)| (template.as_slice(), occurrences.len()))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

impl PartialEq for CollocationIndex {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(template, occurrences)| other.get(template) == Some(occurrences))
    }
}

impl Eq for CollocationIndex {}

/// Summary counts of a collocation index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub entries: usize,
    pub binary_templates: usize,
    pub ternary_templates: usize,
    pub occurrences: usize,
    /// Record count of the largest entry
    pub largest_entry: usize,
}
