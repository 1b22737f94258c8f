pub use config::{load_config, load_config_if_present, resolve_options};
pub use rules::{Rules, FILE_FIELD_METHODS};

mod config;
mod rules;

use types::{Ported, PortOptions, RuleSet};

/// Pattern for legacy accessor occurrences inside a tag, e.g. `get_entry_list`
pub const ACCESSOR_PATTERN: &str = r"\bget_(\w+)";

/// Rewrite one template's text with the given rule categories and options.
///
/// Convenience for one-off calls; build a [Rules] once when porting a whole
/// tree.
pub fn rewrite(input: &str, set: RuleSet, options: &PortOptions) -> Ported {
    Rules::new(set, options.clone()).rewrite(input)
}
