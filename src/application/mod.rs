// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflows that wire the data, domain and ml layers
// together. No printing here (that's Layer 1) and no tensor
// math (that's Layer 5).
//
// Reference: Clean Architecture pattern

/// Build an encoder and encode sentences
pub mod encode_use_case;

/// Build and export the vocabulary only
pub mod vocab_use_case;
