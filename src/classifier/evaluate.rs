use std::fmt;

use indexmap::IndexMap;
use log::info;
use rayon::prelude::*;

use crate::analysis::StopWords;
use crate::classifier::{classify, Classifier};
use crate::corpus::LabeledDocument;
use crate::maxent::{Category, Model};

/// Accuracy report over a labeled test set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    pub total: usize,
    pub correct: usize,
    /// (gold, predicted) -> count, in first-seen order
    pub confusion: IndexMap<(Category, Category), usize>,
}

impl Evaluation {
    /// Fraction of correct predictions; 0.0 for an empty test set
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    pub fn count(&self, gold: &Category, predicted: &Category) -> usize {
        self.confusion
            .get(&(gold.clone(), predicted.clone()))
            .copied()
            .unwrap_or(0)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "accuracy {:.4} ({}/{})", self.accuracy(), self.correct, self.total)?;
        for ((gold, predicted), count) in &self.confusion {
            writeln!(f, "  gold {} -> predicted {}: {}", gold, predicted, count)?;
        }
        Ok(())
    }
}

/// Classify every document and compare with its gold label
pub fn evaluate(model: &Model, docs: &[LabeledDocument], stopwords: &StopWords) -> Evaluation {
    let predicted: Vec<Category> = docs
        .par_iter()
        .map(|doc| classify(model, &doc.text, stopwords).category)
        .collect();

    let mut eval = Evaluation::default();
    for (doc, pred) in docs.iter().zip(predicted) {
        eval.total += 1;
        if doc.label == pred {
            eval.correct += 1;
        }
        *eval.confusion.entry((doc.label.clone(), pred)).or_insert(0) += 1;
    }
    info!("evaluated {} documents, accuracy {:.4}", eval.total, eval.accuracy());
    eval
}

impl Classifier {
    pub fn evaluate(&self, docs: &[LabeledDocument]) -> Evaluation {
        evaluate(self.model(), docs, self.stopwords())
    }
}
