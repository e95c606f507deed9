// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `vocab` and `encode`, and all
// their flags. Encoder hyperparameters given on the command
// line override the ones read from `--config`.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::encode_use_case::{EncodeConfig, EncoderKind};
use crate::domain::vocabulary::{OOV_TOKEN, PAD_TOKEN};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the vocabulary from a corpus (and optional vectors)
    Vocab(VocabArgs),

    /// Encode whitespace-tokenised sentences into fixed-size vectors
    Encode(EncodeArgs),
}

#[derive(Args, Debug)]
pub struct VocabArgs {
    /// JSON file of (nested) arrays of tokens
    #[arg(long)]
    pub corpus: PathBuf,

    /// Pre-trained vectors in GloVe / word2vec text format
    #[arg(long)]
    pub pretrained: Option<PathBuf>,

    /// Write the vocabulary here as a JSON list (position = id)
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value = PAD_TOKEN)]
    pub pad_token: String,

    #[arg(long, default_value = OOV_TOKEN)]
    pub oov_token: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderArg {
    Cnn,
    Lstm,
    Average,
}

impl From<EncoderArg> for EncoderKind {
    fn from(a: EncoderArg) -> Self {
        match a {
            EncoderArg::Cnn     => EncoderKind::Cnn,
            EncoderArg::Lstm    => EncoderKind::Lstm,
            EncoderArg::Average => EncoderKind::Average,
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// JSON file of (nested) arrays of tokens
    #[arg(long)]
    pub corpus: PathBuf,

    /// Pre-trained vectors in GloVe / word2vec text format
    #[arg(long)]
    pub pretrained: Option<PathBuf>,

    /// Encoder config JSON to start from
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective config here (file or directory)
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Sentence to encode; tokens are separated by whitespace. Repeatable.
    #[arg(long = "sentence", required = true)]
    pub sentences: Vec<String>,

    #[arg(long, value_enum)]
    pub encoder: Option<EncoderArg>,

    /// Requested embedding size (pre-trained vectors override it)
    #[arg(long)]
    pub embedding_dim: Option<usize>,

    /// CNN kernel widths, comma separated
    #[arg(long, value_delimiter = ',')]
    pub widths: Option<Vec<usize>>,

    /// CNN output channels per width
    #[arg(long)]
    pub filters: Option<usize>,

    /// LSTM hidden size
    #[arg(long)]
    pub hidden_dim: Option<usize>,

    /// Number of stacked LSTM layers
    #[arg(long)]
    pub num_layers: Option<usize>,

    /// Dropout between LSTM layers
    #[arg(long)]
    pub dropout: Option<f64>,

    /// Keep the raw (un-normalised) embedding rows
    #[arg(long)]
    pub no_normalize: bool,

    /// Leave the embedding table trainable
    #[arg(long)]
    pub trainable: bool,

    /// Print the vectors as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl EncodeArgs {
    /// Apply command-line overrides on top of a loaded or default config.
    pub fn apply(&self, cfg: &mut EncodeConfig) {
        if let Some(e) = self.encoder {
            cfg.encoder = e.into();
        }
        if let Some(d) = self.embedding_dim {
            cfg.embedding_dim = d;
        }
        if let Some(w) = &self.widths {
            cfg.widths = w.clone();
        }
        if let Some(f) = self.filters {
            cfg.filters = f;
        }
        if let Some(h) = self.hidden_dim {
            cfg.hidden_dim = h;
        }
        if let Some(n) = self.num_layers {
            cfg.num_layers = n;
        }
        if let Some(p) = self.dropout {
            cfg.dropout = p;
        }
        if self.no_normalize {
            cfg.normalize = false;
        }
        if self.trainable {
            cfg.freeze = false;
        }
    }
}
