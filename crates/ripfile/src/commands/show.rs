//! `ripfile show`: summarize a Pipfile for humans.

use std::path::Path;

use anyhow::Result;

use crate::cli::ShowArgs;
use crate::commands::{ExitStatus, load_pipfile};
use crate::pipfile::{PackageRequirement, RequirementSet};
use crate::printer::Printer;

/// Execute `ripfile show`.
pub(super) fn execute(
    args: &ShowArgs,
    pipfile: Option<&Path>,
    printer: Printer,
) -> Result<ExitStatus> {
    let pipfile = load_pipfile(pipfile)?;

    printer.output(&format!("Pipfile: {}", pipfile.filename().display()));

    printer.heading("Sources");
    for source in pipfile.sources() {
        let mut line = format!("  {} {}", source.name(), source.url());
        if !source.verify_ssl() {
            line.push_str(" (no SSL verification)");
        }
        printer.output(&line);
    }

    if !pipfile.requires().is_empty() {
        printer.heading("Requires");
        for (marker, value) in pipfile.requires().iter() {
            printer.output(&format!("  {marker} = {value}"));
        }
    }

    if args.include_default() {
        show_group(printer, "Packages", pipfile.packages());
    }
    if args.include_dev() {
        show_group(printer, "Dev packages", pipfile.dev_packages());
    }

    Ok(ExitStatus::Success)
}

fn show_group(printer: Printer, title: &str, requirements: &RequirementSet) {
    printer.heading(title);
    if requirements.is_empty() {
        printer.output("  (none)");
        return;
    }
    for requirement in requirements {
        printer.output(&format!("  {}", describe(requirement)));
    }
}

/// One line per requirement, e.g. `requests[socks]>=2.0 (index: private)`.
fn describe(requirement: &PackageRequirement) -> String {
    let mut line = requirement.to_string();
    if requirement.editable() {
        line.push_str(" (editable)");
    }
    if let Some(index) = requirement.index() {
        line.push_str(&format!(" (index: {index})"));
    }
    line
}
