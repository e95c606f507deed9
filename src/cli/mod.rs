// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands off to Layer 2, and
// prints the results. Two commands are supported:
//   1. `vocab`  — build (and optionally export) the vocabulary
//   2. `encode` — encode sentences with cnn / lstm / average
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EncodeArgs, VocabArgs};

use crate::application::encode_use_case::{EncodeConfig, EncodeOutput, EncodeUseCase};
use crate::application::vocab_use_case::VocabUseCase;
use crate::infra::config_store::ConfigStore;

#[derive(Parser, Debug)]
#[command(
    name = "text-encoders",
    version,
    about = "Embed token sequences and encode them with a CNN, LSTM or average pooler."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Vocab(args)  => run_vocab(args),
            Commands::Encode(args) => run_encode(args),
        }
    }
}

fn run_vocab(args: VocabArgs) -> Result<()> {
    let use_case = VocabUseCase::new(args.corpus, args.pretrained, args.pad_token, args.oov_token);
    let vocab    = use_case.execute(args.output.as_ref())?;

    println!("Vocabulary size: {}", vocab.len());
    if args.output.is_none() {
        for (token, id) in vocab.iter() {
            println!("{id}\t{token}");
        }
    }
    Ok(())
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    let mut cfg = match &args.config {
        Some(path) => ConfigStore::new(path).load()?,
        None => EncodeConfig::default(),
    };
    args.apply(&mut cfg);
    tracing::debug!("Effective encoder config: {:?}", cfg);

    if let Some(path) = &args.save_config {
        let store = ConfigStore::new(path);
        store.save(&cfg)?;
        tracing::info!("Config saved to '{}'", store.path().display());
    }

    let use_case = EncodeUseCase::new(cfg, args.corpus.clone(), args.pretrained.clone());
    let output   = use_case.execute(&args.sentences)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(&args.sentences, &output);
    }
    Ok(())
}

fn print_table(sentences: &[String], output: &EncodeOutput) {
    println!("Encoder: {} (dim {})", output.encoder, output.dim);
    for (sentence, vector) in sentences.iter().zip(&output.vectors) {
        let shown: Vec<String> = vector.iter().take(8).map(|v| format!("{v:+.4}")).collect();
        let more = if vector.len() > 8 { ", ..." } else { "" };
        println!("{sentence:?}\n  [{}{more}]", shown.join(", "));
    }
}
