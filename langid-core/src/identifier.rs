//! High-level identification API
//!
//! [`LanguageIdentifier`] ties a shared [`Model`] to the per-instance state a
//! classification needs: the active language subset, reusable tokenizer
//! scratch, and the score buffer. An instance is cheap to [`fork`] so every
//! thread can own one while the model stays shared.
//!
//! [`fork`]: LanguageIdentifier::fork

use crate::config::IdentifierConfig;
use crate::error::Result;
use crate::model::Model;
use crate::ranking;
use crate::scorer;
use crate::subset::LanguageSubset;
use crate::tokenizer::{FeatureScratch, Tokenizer};
use serde::Serialize;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A language label with its score
///
/// The score is a probability when the identifier normalizes, otherwise
/// the raw Naive Bayes log-score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Class label as stored in the model
    pub language: String,
    /// Probability or log-score
    pub score: f64,
}

/// Language identifier over a shared model
#[derive(Debug)]
pub struct LanguageIdentifier {
    model: Arc<Model>,
    subset: LanguageSubset,
    scratch: FeatureScratch,
    scores: Vec<f64>,
    norm_probs: bool,
}

impl LanguageIdentifier {
    /// Create an identifier owning `model`, normalizing, over all languages
    pub fn new(model: Model) -> Self {
        Self::from_shared(Arc::new(model))
    }

    /// Create an identifier over an already shared model
    pub fn from_shared(model: Arc<Model>) -> Self {
        let scratch = FeatureScratch::for_model(&model);
        let scores = Vec::with_capacity(model.num_langs());
        Self {
            model,
            subset: LanguageSubset::all(),
            scratch,
            scores,
            norm_probs: true,
        }
    }

    /// Start configuring an identifier
    pub fn builder(model: impl Into<Arc<Model>>) -> LanguageIdentifierBuilder {
        LanguageIdentifierBuilder::new(model)
    }

    /// Create an identifier from a configuration
    pub fn from_config(model: impl Into<Arc<Model>>, config: &IdentifierConfig) -> Result<Self> {
        Self::builder(model).config(config).build()
    }

    /// The model this identifier scores against
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Every label known to the model, ignoring any restriction
    pub fn nb_classes(&self) -> &[String] {
        self.model.nb_classes()
    }

    /// Labels currently scored, in model order
    pub fn active_languages(&self) -> Vec<&str> {
        self.subset.labels(&self.model)
    }

    /// Whether scores are reported as probabilities
    pub fn norm_probs(&self) -> bool {
        self.norm_probs
    }

    /// Switch between probabilities and raw log-scores
    pub fn set_norm_probs(&mut self, norm_probs: bool) {
        self.norm_probs = norm_probs;
    }

    /// Restrict scoring to `labels`; an empty slice lifts the restriction.
    ///
    /// On [`LangIdError::UnknownLanguage`](crate::LangIdError::UnknownLanguage)
    /// the previous subset stays in place.
    pub fn set_languages<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<()> {
        let subset = LanguageSubset::restrict(&self.model, labels)?;
        log::debug!(
            "language subset set to {} of {} languages",
            subset.len(&self.model),
            self.model.num_langs()
        );
        self.subset = subset;
        Ok(())
    }

    /// Score every language of the model again
    pub fn reset_languages(&mut self) {
        log::debug!("language subset cleared");
        self.subset.clear();
    }

    /// A new identifier sharing the model and subset, with its own scratch
    pub fn fork(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            subset: self.subset.clone(),
            scratch: FeatureScratch::for_model(&self.model),
            scores: Vec::with_capacity(self.scores.capacity()),
            norm_probs: self.norm_probs,
        }
    }

    fn score_text(&mut self, text: &[u8]) {
        let features = Tokenizer::new(&self.model).extract(text, &mut self.scratch);
        scorer::log_scores(&self.model, features, &self.subset, &mut self.scores);
    }

    fn label_at(&self, position: usize) -> &str {
        &self.model.nb_classes()[self.subset.model_index(position)]
    }

    /// The most likely active language for `text`.
    ///
    /// Equal scores go to the language listed first in the model. Any byte
    /// sequence is valid input; empty text is decided by the priors.
    pub fn classify(&mut self, text: impl AsRef<[u8]>) -> Prediction {
        self.score_text(text.as_ref());
        // A model always has at least one language and a subset is never empty
        let best = ranking::best_index(&self.scores).unwrap_or(0);
        if self.norm_probs {
            ranking::normalize(&mut self.scores);
        }
        Prediction {
            language: self.label_at(best).to_string(),
            score: self.scores[best],
        }
    }

    /// Every active language for `text`, best first.
    ///
    /// The first entry always matches [`classify`](Self::classify) on the
    /// same input. When normalizing, the scores sum to 1.
    pub fn rank(&mut self, text: impl AsRef<[u8]>) -> Vec<Prediction> {
        self.score_text(text.as_ref());
        let order = ranking::ranked_order(&self.scores);
        if self.norm_probs {
            ranking::normalize(&mut self.scores);
        }
        order
            .into_iter()
            .map(|pos| Prediction {
                language: self.label_at(pos).to_string(),
                score: self.scores[pos],
            })
            .collect()
    }

    /// Classify many texts on the rayon pool, one forked identifier per worker
    #[cfg(feature = "parallel")]
    pub fn classify_batch<T>(&self, texts: &[T]) -> Vec<Prediction>
    where
        T: AsRef<[u8]> + Sync,
    {
        texts
            .par_iter()
            .map_init(|| self.fork(), |identifier, text| identifier.classify(text))
            .collect()
    }

    /// Rank many texts on the rayon pool, one forked identifier per worker
    #[cfg(feature = "parallel")]
    pub fn rank_batch<T>(&self, texts: &[T]) -> Vec<Vec<Prediction>>
    where
        T: AsRef<[u8]> + Sync,
    {
        texts
            .par_iter()
            .map_init(|| self.fork(), |identifier, text| identifier.rank(text))
            .collect()
    }
}

/// Builder for [`LanguageIdentifier`]
#[derive(Debug)]
pub struct LanguageIdentifierBuilder {
    model: Arc<Model>,
    norm_probs: bool,
    languages: Vec<String>,
}

impl LanguageIdentifierBuilder {
    /// Create a builder with default settings
    pub fn new(model: impl Into<Arc<Model>>) -> Self {
        Self {
            model: model.into(),
            norm_probs: true,
            languages: Vec::new(),
        }
    }

    /// Report probabilities (`true`) or raw log-scores
    pub fn norm_probs(mut self, norm_probs: bool) -> Self {
        self.norm_probs = norm_probs;
        self
    }

    /// Initial language subset
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Take every setting from `config`
    pub fn config(self, config: &IdentifierConfig) -> Self {
        self.norm_probs(config.norm_probs)
            .languages(config.languages.iter().cloned())
    }

    /// Build the identifier.
    ///
    /// # Errors
    /// [`LangIdError::UnknownLanguage`](crate::LangIdError::UnknownLanguage)
    /// if a configured language is not in the model.
    pub fn build(self) -> Result<LanguageIdentifier> {
        let mut identifier = LanguageIdentifier::from_shared(self.model);
        identifier.set_norm_probs(self.norm_probs);
        if !self.languages.is_empty() {
            identifier.set_languages(&self.languages)?;
        }
        Ok(identifier)
    }
}
