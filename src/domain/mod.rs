// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing the vocabulary side of the
// encoders. Nothing in here touches Burn tensors or the
// filesystem, so every type is testable without a device.
//
//   token_tree.rs — arbitrarily nested corpus of tokens
//   vocabulary.rs — token <-> id table with reserved entries
//   pretrained.rs — words plus their pre-trained vectors
//   traits.rs     — sources that produce the above
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

/// Nested corpus structure and its depth-first flattening
pub mod token_tree;

/// Bijective token/id mapping
pub mod vocabulary;

/// Pre-trained word vectors
pub mod pretrained;

/// Core abstractions (traits) that the data layer implements
pub mod traits;
