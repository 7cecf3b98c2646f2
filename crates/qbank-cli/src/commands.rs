use anyhow::{Result, bail};

use qbank_cli::ops::{LoadedSet, load_set, write_merged};
use qbank_model::UNKNOWN_METADATA;

use crate::cli::{MergeArgs, ValidateArgs};
use crate::summary::print_report;

/// Validate the given files. Returns whether the merged set passed.
pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let set = load_set(&args.files)?;
    let report = set.session.validation();
    print_overview(&set);
    print_report(&set.session.questions(), &report);
    let clean = report.is_valid() && set.summary.failed_files.is_empty();
    if clean {
        println!("OK: {} question(s), no issues", set.session.question_count());
    }
    Ok(clean)
}

pub fn run_merge(args: &MergeArgs) -> Result<()> {
    let set = load_set(&args.files)?;
    let report = set.session.validation();
    if !report.export_allowed() {
        print_overview(&set);
        print_report(&set.session.questions(), &report);
        bail!(
            "merge blocked: {} validation issue(s); fix the inputs and retry",
            report.issue_count()
        );
    }
    let outcome = write_merged(&set, args.output.as_deref())?;
    println!(
        "Merged {} question(s) into {}",
        outcome.questions,
        outcome.path.display()
    );
    Ok(())
}

fn print_overview(set: &LoadedSet) {
    let metadata = set.session.metadata();
    println!("Subject: {}", or_unknown(&metadata.subject));
    println!("Grade: {}", or_unknown(&metadata.grade));
    println!("Set: {}", or_unknown(&metadata.set_name));
    if set.summary.skipped_records > 0 {
        println!("Skipped records: {}", set.summary.skipped_records);
    }
    for name in &set.summary.failed_files {
        eprintln!("warning: could not parse {name}");
    }
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        UNKNOWN_METADATA
    } else {
        value
    }
}
