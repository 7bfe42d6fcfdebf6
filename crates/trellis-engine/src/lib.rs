pub mod io;
pub mod parsing;

// Re-export key types for easier usage
pub use io::*;
pub use parsing::{
    IndentError, NodeKind, ParseError, Tree, TreeBuilder, normalize, parse,
};
