use std::process::exit;

use serde::Serialize;

use tplport::diagnostics::{emit_to_stderr, get_diagnostics, print_rewrites, rewrite_diagnostics, Diagnosis};
use tplport::errors::ConfigError;
use tplport::{
    is_template, read_template, resolve_template_paths, PortError, PortOptions, Rules, NO_SPAN,
};

use crate::logging;
use crate::CheckArgs;

/// Planned rewrites for one template, in the same shape editors consume
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    diagnostics: Vec<Diagnosis>,
}

pub fn run(args: CheckArgs) -> Result<(), PortError> {
    let set = args.rules.rule_set();
    if !set.any_enabled() {
        return Err(ConfigError::NoRulesEnabled.into());
    }

    let options = args.rules.options()?;
    let rules = Rules::new(set, options.clone());

    if let Err(err) = check_templates(&args, &rules, &options) {
        if args.pretty {
            emit_to_stderr(&[(err, NO_SPAN)], "tplport", "");
        } else {
            println!(
                "{}",
                serde_json::to_string_pretty(&get_diagnostics(&[(err, NO_SPAN)], ""))
                    .expect("diagnostics serialize")
            );
            logging::error("Invalid input");
        }
        exit(1);
    }

    Ok(())
}

fn check_templates(args: &CheckArgs, rules: &Rules, options: &PortOptions) -> Result<(), PortError> {
    let templates = resolve_template_paths(&args.rules.paths)?;

    let mut reports = vec![];

    for template in &templates {
        if !is_template(&template.path, &options.extensions) {
            continue;
        }

        let text = read_template(&template.path)?;
        let ported = rules.rewrite(&text);
        if !ported.changed() {
            continue;
        }

        let name = template.path.display().to_string();

        if args.pretty {
            print_rewrites(&ported.rewrites, &name, &text);
        } else {
            reports.push(FileReport {
                path: name,
                diagnostics: rewrite_diagnostics(&ported.rewrites, &text),
            });
        }
    }

    if !args.pretty {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).expect("diagnostics serialize")
        );
    }

    Ok(())
}
