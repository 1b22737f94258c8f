use std::collections::HashSet;
use std::fs;
use std::path::Path;

use errors::{ConfigError, PortError};
use types::{PortConfig, PortOptions};

use crate::rules::FILE_FIELD_METHODS;

/// Load a config file and resolve it into run options.
pub fn load_config(path: &Path) -> Result<PortOptions, PortError> {
    let raw = fs::read_to_string(path).map_err(|err| ConfigError::InvalidConfig {
        message: format!("{}: {err}", path.display()),
    })?;

    let config: PortConfig = toml::from_str(&raw).map_err(|err| ConfigError::InvalidConfig {
        message: format!("{}: {err}", path.display()),
    })?;

    resolve_options(config)
}

/// Like [load_config], but a missing file is fine: the conventional
/// `tplport.toml` is optional and defaults apply without one.
pub fn load_config_if_present(path: &Path) -> Result<PortOptions, PortError> {
    if !path.exists() {
        return Ok(PortOptions::default());
    }

    load_config(path)
}

/// Apply defaults and resolve the effective exclusion set: `force_update`
/// entries are rewritten despite being listed in `ignored_methods`.
pub fn resolve_options(config: PortConfig) -> Result<PortOptions, PortError> {
    let mut options = PortOptions::default();

    if let Some(extensions) = config.extensions {
        if extensions.is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "extensions must name at least one extension".to_string(),
            }
            .into());
        }

        options.extensions = extensions
            .into_iter()
            .map(|extension| extension.trim_start_matches('.').to_string())
            .collect();
    }

    if let Some(relations) = config.relations {
        let mut excluded: HashSet<String> = relations
            .ignored_methods
            .unwrap_or_default()
            .iter()
            .map(|entry| bare_name(entry).to_string())
            .collect();

        for entry in relations.force_update.unwrap_or_default() {
            if !excluded.remove(bare_name(&entry)) {
                return Err(ConfigError::UnknownForceUpdate(entry).into());
            }
        }

        options.excluded = excluded;
        options.mapping = relations.mapping.unwrap_or_default();
    }

    Ok(options)
}

/// Reduce a configured accessor name to the base name the rules compare
/// against: `get_photo`, `get_photo_list`, and `get_photo_url` all mean
/// `photo`; an entry that is already bare is used as-is.
fn bare_name(entry: &str) -> &str {
    let Some(rest) = entry.strip_prefix("get_") else {
        return entry;
    };

    for suffix in ["_list", "_count"] {
        if let Some(base) = rest.strip_suffix(suffix) {
            if !base.is_empty() {
                return base;
            }
        }
    }

    for method in FILE_FIELD_METHODS {
        if let Some(base) = rest
            .strip_suffix(method)
            .and_then(|base| base.strip_suffix('_'))
        {
            if !base.is_empty() {
                return base;
            }
        }
    }

    rest
}
