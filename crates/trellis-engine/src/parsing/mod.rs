pub mod matcher;
pub mod normalize;
pub mod tree;

use thiserror::Error;

pub use matcher::{NodeKind, classify};
pub use normalize::{DEFAULT_TAB_WIDTH, IndentError, MARKER, normalize};
pub use tree::{Node, NodeId, Tree, TreeBuilder};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Indent(#[from] IndentError),
}

/// Parses raw note lines into a tree.
///
/// Runs the indentation normalizer over the input, classifies each rewritten
/// line, and inserts the result with the weight-comparison rule. Single pass;
/// the only failure is an indentation error from the normalizer, since the
/// Raw fallback accepts every line.
pub fn parse<I, S>(lines: I) -> Result<Tree, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TreeBuilder::new();
    for line in normalize(lines, DEFAULT_TAB_WIDTH) {
        builder.push(classify(&line?));
    }
    Ok(builder.finish())
}
