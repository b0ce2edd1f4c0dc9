//! Restriction of the output space to a subset of the model's languages

use crate::error::{LangIdError, Result};
use crate::model::Model;

/// Active language indices, or no restriction.
///
/// Restricting never touches the model's parameters; it only changes which
/// columns the scorer reads. Indices are always kept in model order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSubset {
    indices: Option<Vec<usize>>,
}

impl LanguageSubset {
    /// Every language of the model
    pub fn all() -> Self {
        Self { indices: None }
    }

    /// Build a subset from labels.
    ///
    /// An empty `labels` means no restriction. Duplicates are ignored and
    /// the resulting order follows the model, not `labels`.
    ///
    /// # Errors
    /// [`LangIdError::UnknownLanguage`] naming the first label the model
    /// does not know.
    pub fn restrict<S: AsRef<str>>(model: &Model, labels: &[S]) -> Result<Self> {
        if labels.is_empty() {
            return Ok(Self::all());
        }

        let mut selected = vec![false; model.num_langs()];
        for label in labels {
            let label = label.as_ref();
            let index = model
                .label_index(label)
                .ok_or_else(|| LangIdError::UnknownLanguage {
                    label: label.to_string(),
                })?;
            selected[index] = true;
        }

        let indices = selected
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
            .collect();
        Ok(Self {
            indices: Some(indices),
        })
    }

    /// Drop any restriction
    pub fn clear(&mut self) {
        self.indices = None;
    }

    /// Whether a restriction is installed
    pub fn is_restricted(&self) -> bool {
        self.indices.is_some()
    }

    /// Restricted indices, `None` when all languages are active
    pub fn indices(&self) -> Option<&[usize]> {
        self.indices.as_deref()
    }

    /// Number of active languages
    pub fn len(&self, model: &Model) -> usize {
        self.indices.as_ref().map_or(model.num_langs(), Vec::len)
    }

    /// Model index of the `position`-th active language
    #[inline]
    pub fn model_index(&self, position: usize) -> usize {
        self.indices.as_ref().map_or(position, |indices| indices[position])
    }

    /// Labels of the active languages, in active order
    pub fn labels<'m>(&self, model: &'m Model) -> Vec<&'m str> {
        let classes = model.nb_classes();
        (0..self.len(model))
            .map(|pos| classes[self.model_index(pos)].as_str())
            .collect()
    }
}
