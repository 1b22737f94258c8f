use tplport::errors::ConfigError;
use tplport::textpos::index_to_position;
use tplport::{
    copy_file, generic_rename, is_template, read_template, resolve_template_paths, unified_diff,
    write_template, PortError, Rules, Verbosity,
};

use crate::logging;
use crate::PortArgs;

pub fn run(args: PortArgs) -> Result<(), PortError> {
    let verbosity = if args.quiet {
        Verbosity::Quiet
    } else if args.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };

    let set = args.rules.rule_set();
    if !set.any_enabled() {
        return Err(ConfigError::NoRulesEnabled.into());
    }

    let options = args.rules.options()?;
    let rules = Rules::new(set, options.clone());
    let templates = resolve_template_paths(&args.rules.paths)?;

    let mut seen = 0usize;
    let mut changed = 0usize;

    for template in &templates {
        if !is_template(&template.path, &options.extensions) {
            // non-templates only matter when mirroring into a destination tree
            if let Some(output) = &args.output {
                let destination = output.join(template.relative());
                if !args.dry_run {
                    copy_file(&template.path, &destination)?;
                    if verbosity >= Verbosity::Verbose {
                        logging::copied(destination.display());
                    }
                }
            }
            continue;
        }

        seen += 1;

        let text = read_template(&template.path)?;
        let ported = rules.rewrite(&text);

        let destination = match &args.output {
            Some(output) => output.join(template.relative()),
            None => template.path.clone(),
        };

        if ported.changed() {
            changed += 1;
        }

        if args.dry_run {
            if ported.changed() {
                print!(
                    "{}",
                    unified_diff(&template.path.display().to_string(), &text, &ported.text)
                );
            }
        } else if args.output.is_some() || ported.changed() {
            write_template(&destination, &ported.text)?;
            if ported.changed() && verbosity >= Verbosity::Normal {
                logging::ported(format!(
                    "{} ({} rewrites)",
                    destination.display(),
                    ported.rewrites.len()
                ));
            }
        }

        if ported.changed() && verbosity >= Verbosity::Verbose {
            for (rewrite, span) in &ported.rewrites {
                let (line, column) = index_to_position(&text, span.start);
                logging::detail(format!(
                    "{}:{}:{} {}: {} -> {}",
                    template.path.display(),
                    line + 1,
                    column + 1,
                    rewrite.rule,
                    rewrite.old,
                    rewrite.new
                ));
            }
        }

        if set.rename_generic {
            if let Some(renamed) = generic_rename(template.relative()) {
                let root = args.output.as_deref().unwrap_or(&template.root);
                let copy_destination = root.join(&renamed);

                if args.dry_run {
                    if verbosity >= Verbosity::Normal {
                        logging::guessed(format!(
                            "would copy {} to {}",
                            template.path.display(),
                            copy_destination.display()
                        ));
                    }
                } else {
                    write_template(&copy_destination, &ported.text)?;
                    if verbosity >= Verbosity::Normal {
                        logging::guessed(format!(
                            "{} (generic name for {})",
                            copy_destination.display(),
                            template.relative().display()
                        ));
                    }
                }
            }
        }
    }

    if verbosity >= Verbosity::Normal {
        if args.dry_run {
            eprintln!("would port {changed} of {seen} templates");
        } else {
            eprintln!("ported {changed} of {seen} templates");
        }
    }

    Ok(())
}
