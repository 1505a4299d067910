// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to get something done.
//
// Rules for this layer:
//   - No window arithmetic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layers 4 and 6)
//   - Only workflow coordination

// Run configuration shared by every use case
pub mod data_config;

// Encode/cache both splits and build the batcher
pub mod prepare_use_case;

// Draw a few batches onto a device for inspection
pub mod peek_use_case;
