pub use diagnostics;
pub use errors;
pub use errors::PortError;
pub use rewriter::{load_config, load_config_if_present, resolve_options, rewrite, Rules};
pub use span::*;
pub use textpos;
pub use tokenizer::{Segment, Tokenizer};
pub use types::*;
pub use walker::*;

pub use diff::unified_diff;

mod diff;
