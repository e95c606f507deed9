// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From files on disk to the Int tensor the embedding layer
// reads:
//
//   corpus .json / vectors .txt
//       │
//       ▼
//   loaders           → TokenTree, PretrainedEmbeddings
//       │
//       ▼
//   (vocabulary maps tokens to ids)
//       │
//       ▼
//   TokenBatcher      → padded [batch, seq_len] ids
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads nested JSON corpora and text vector files
pub mod loader;

/// Pads id sequences into one tensor batch
pub mod batcher;
