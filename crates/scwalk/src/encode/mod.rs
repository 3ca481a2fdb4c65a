//! Training-example encoding for next-neighbor prediction.
//!
//! Purpose
//! - Cut each walk at a random point, summarize the part already travelled as a
//!   signed edge flow, and describe the choice ahead as "which neighbor of the
//!   pivot comes next", padded to the max node degree `D`.
//!
//! Model
//! - Window length `L` is uniform on `window_bounds(max_hop)`; the walk is cut
//!   to its first `min(L, len)` nodes.
//! - prefix = all but the last `max_hop` nodes; suffix = last `max_hop + 1`
//!   nodes, so `suffix[0]` is the final prefix node.
//! - For hop `h`: pivot = `suffix[h − 1]`, target = `suffix[h]`, candidates =
//!   sorted neighbors of the pivot.
//!
//! Layout
//! - `features.rs` (per-example pieces), `encoder.rs` (batch tensors),
//!   `split.rs` (train/test masks).

mod encoder;
mod features;
mod split;

pub use encoder::{window_bounds, Encoded, TrainingEncoder, MIN_WINDOW};
pub use features::{conditional_incidence, neighborhood_onehot, path_to_flow};
pub use split::train_test_masks;
