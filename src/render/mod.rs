//! Render Pass over a host-provided UI tree.
/// In-memory UI tree
mod memory;
/// Render pass
mod pass;
/// UI tree capability
mod tree;

pub use memory::{
    MemoryTree,
    NodeId,
};
pub use pass::{
    RenderReport,
    render_pass,
};
pub use tree::{
    BoundNode,
    UiTree,
};
