//! Model persistence.
//!
//! A model is written as a single CBOR map:
//!
//! | field          | content                                  |
//! |----------------|------------------------------------------|
//! | `magic`        | `"tweet-maxent"`                         |
//! | `version`      | layout version, currently `1`            |
//! | `feature_mode` | `"Presence"` or `"Count"`                |
//! | `vocabulary`   | tokens in index order                    |
//! | `categories`   | labels in model order                    |
//! | `weights`      | row-major `[categories x vocabulary]`    |
//! | `bias`         | one value per category                   |
//!
//! Floats are stored losslessly, so a reloaded model classifies exactly
//! like the one that was saved.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::feature::{FeatureMode, Vocabulary};
use crate::maxent::{Category, Model, WeightMatrix};

pub const MAGIC: &str = "tweet-maxent";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ModelFile {
    magic: String,
    version: u32,
    feature_mode: FeatureMode,
    vocabulary: Vec<String>,
    categories: Vec<Category>,
    weights: Vec<f64>,
    bias: Vec<f64>,
}

impl ModelFile {
    fn from_model(model: &Model) -> Self {
        Self {
            magic: MAGIC.to_string(),
            version: FORMAT_VERSION,
            feature_mode: model.feature_mode(),
            vocabulary: model.vocabulary().iter().map(String::from).collect(),
            categories: model.categories().to_vec(),
            weights: model.weights().as_slice().to_vec(),
            bias: model.bias().to_vec(),
        }
    }

    fn into_model(self) -> Result<Model> {
        if self.magic != MAGIC {
            return Err(Error::corrupt_model(format!("unrecognized magic {:?}", self.magic)));
        }
        if self.version != FORMAT_VERSION {
            return Err(Error::corrupt_model(format!("unsupported format version {}", self.version)));
        }

        let mut seen = HashSet::with_capacity(self.vocabulary.len());
        for token in &self.vocabulary {
            if !seen.insert(token.as_str()) {
                return Err(Error::corrupt_model(format!("duplicate vocabulary token {:?}", token)));
            }
        }

        let rows = self.categories.len();
        let cols = self.vocabulary.len();
        let weights_len = self.weights.len();
        let weights = WeightMatrix::from_row_major(rows, cols, self.weights).ok_or_else(|| {
            Error::corrupt_model(format!(
                "{} weights do not fit {} categories x {} tokens",
                weights_len, rows, cols
            ))
        })?;

        Model::from_parts(
            Vocabulary::from_tokens(&self.vocabulary),
            self.categories,
            weights,
            self.bias,
            self.feature_mode,
        )
    }
}

/// Serialize `model` into `writer`.
/// Writer failures surface as `Error::Io` with their original kind.
pub fn save<W: Write>(model: &Model, mut writer: W) -> Result<()> {
    let file = ModelFile::from_model(model);
    let buf = serde_cbor::to_vec(&file).map_err(|e| Error::Encode(e.to_string()))?;
    writer.write_all(&buf)?;
    writer.flush()?;
    info!(
        "saved model: {} categories x {} tokens",
        model.categories().len(),
        model.vocabulary().len()
    );
    Ok(())
}

/// Deserialize a model from `reader`.
///
/// # Errors
/// - `Error::CorruptModel` for undecodable bytes, unknown magic/version
///   or inconsistent dimensions
/// - `Error::Io` when reading fails
pub fn load<R: Read>(mut reader: R) -> Result<Model> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    let file: ModelFile = serde_cbor::from_slice(&buf).map_err(|e| Error::corrupt_model(e.to_string()))?;
    let model = file.into_model()?;
    info!(
        "loaded model: {} categories x {} tokens",
        model.categories().len(),
        model.vocabulary().len()
    );
    Ok(model)
}

pub fn save_to_path<P: AsRef<Path>>(model: &Model, path: P) -> Result<()> {
    let file = File::create(path)?;
    save(model, BufWriter::new(file))
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Model> {
    let file = File::open(path)?;
    load(BufReader::new(file))
}

/// Serialize into an owned buffer
pub fn to_bytes(model: &Model) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    save(model, &mut buf)?;
    Ok(buf)
}

pub fn from_bytes(bytes: &[u8]) -> Result<Model> {
    load(bytes)
}
