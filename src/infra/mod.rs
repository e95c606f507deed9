// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence that no single layer owns.
//
//   config_store.rs — reads and writes the encoder
//                     configuration as JSON so an encoder
//                     can be rebuilt with the same shape.
//
// Model weights are not persisted here.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Encoder configuration JSON persistence
pub mod config_store;
