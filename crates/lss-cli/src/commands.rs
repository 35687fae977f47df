// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommands. Each one processes every file it is given, reports failures
// per file and keeps going; the exit code reflects the worst failure.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Args;
use lss_core::config::{SimplifyConfig, SweepConfig};
use lss_core::hints::{Severity, hint_for};
use lss_core::{LssConfig, LssError, Modifications, Ratio, RatioPair, Result};
use lss_document::PageXml;
use tracing::{info, instrument};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Args)]
pub struct SimplifyArgs {
    /// PAGE-XML files to simplify
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Namespace URI of the PAGE elements (read from the root element if
    /// omitted)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Ratio of the line height used as baseline tolerance
    #[arg(long)]
    pub line_ratio: Option<f64>,

    /// Ratio of the mask height used as mask tolerance
    #[arg(long)]
    pub mask_ratio: Option<f64>,

    /// Inserted before the extension of the output file
    #[arg(long)]
    pub suffix: Option<String>,

    /// Leave baselines untouched
    #[arg(long)]
    pub skip_lines: bool,

    /// Leave masks untouched
    #[arg(long)]
    pub skip_masks: bool,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SimplifyArgs {
    /// Layer the command line over the configured settings.
    fn apply(&self, mut settings: SimplifyConfig) -> Result<SimplifyConfig> {
        if let Some(ratio) = self.line_ratio {
            settings.line_ratio = Ratio::new(ratio)?;
        }
        if let Some(ratio) = self.mask_ratio {
            settings.mask_ratio = Ratio::new(ratio)?;
        }
        if let Some(suffix) = &self.suffix {
            settings.suffix = suffix.clone();
        }
        settings.lines &= !self.skip_lines;
        settings.masks &= !self.skip_masks;
        Ok(settings)
    }
}

#[derive(Debug, Args)]
pub struct TestValuesArgs {
    /// PAGE-XML files to test
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Namespace URI of the PAGE elements (read from the root element if
    /// omitted)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Directory where the images are stored, if different from the files
    #[arg(short, long)]
    pub basedir: Option<PathBuf>,

    /// Directory where images will be saved
    #[arg(short, long, default_value = "./")]
    pub outdir: PathBuf,

    /// Height ratio to use to remove points in baselines and masks (repeatable)
    #[arg(short, long = "value")]
    pub values: Vec<f64>,

    /// Render the ratio pairs on all cores
    #[arg(long)]
    pub parallel: bool,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl TestValuesArgs {
    /// Each `--value v` becomes the pair `(v, v)`; without values the
    /// configured pairs are kept.
    fn apply(&self, mut settings: SweepConfig) -> Result<SweepConfig> {
        if !self.values.is_empty() {
            settings.pairs = self
                .values
                .iter()
                .map(|&value| RatioPair::uniform(value))
                .collect::<Result<_>>()?;
        }
        settings.parallel |= self.parallel;
        Ok(settings)
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Files handled by one command and the failures met on the way.
#[derive(Debug, Default)]
pub struct Outcome {
    processed: usize,
    failures: Vec<Severity>,
}

impl Outcome {
    fn fail(&mut self, context: &Path, err: &LssError) {
        let hint = hint_for(err);
        tracing::error!(path = %context.display(), error = %err, "Failed");
        eprintln!("error: {}: {}", context.display(), hint.message);
        eprintln!("  hint: {}", hint.suggestion);
        self.failures.push(hint.severity);
    }

    /// 0 when everything succeeded, 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> ExitCode {
        if self.failures.is_empty() {
            ExitCode::SUCCESS
        } else if self.failures.iter().all(|s| *s == Severity::Usage) {
            ExitCode::from(2)
        } else {
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<LssConfig> {
    match path {
        Some(path) => LssConfig::from_json_file(path),
        None => Ok(LssConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// simplify
// ---------------------------------------------------------------------------

pub fn simplify(args: &SimplifyArgs) -> Outcome {
    let mut outcome = Outcome::default();
    let settings = match load_config(args.config.as_deref()).and_then(|c| args.apply(c.simplify)) {
        Ok(settings) => settings,
        Err(err) => {
            outcome.fail(args.config.as_deref().unwrap_or(Path::new("<arguments>")), &err);
            return outcome;
        }
    };

    for file in &args.files {
        match simplify_file(file, args.namespace.as_deref(), &settings) {
            Ok(written) => {
                outcome.processed += 1;
                println!("{} -> {}", file.display(), written.display());
            }
            Err(err) => outcome.fail(file, &err),
        }
    }
    info!(
        processed = outcome.processed,
        failed = outcome.failures.len(),
        "Simplification finished"
    );
    outcome
}

#[instrument(
    skip_all,
    fields(
        file = %file.display(),
        line_ratio = %settings.line_ratio,
        mask_ratio = %settings.mask_ratio
    )
)]
fn simplify_file(file: &Path, namespace: Option<&str>, settings: &SimplifyConfig) -> Result<PathBuf> {
    let mut page = PageXml::from_file(file, namespace)?;
    if settings.lines {
        let mods = page.simplify_lines(settings.line_ratio.value())?;
        println!("{}: {}", file.display(), summary("baselines", &mods));
    }
    if settings.masks {
        let mods = page.simplify_masks(settings.mask_ratio.value())?;
        println!("{}: {}", file.display(), summary("masks", &mods));
    }
    page.write(&settings.suffix)
}

/// `12 baselines, 340 of 1200 points removed (28.3 %)`
fn summary(kind: &str, mods: &Modifications) -> String {
    let total: usize = mods.original.iter().sum();
    let removed = mods.removed();
    let share = if total == 0 {
        0.0
    } else {
        removed as f64 / total as f64 * 100.0
    };
    let mut line = format!(
        "{} {kind}, {removed} of {total} points removed ({share:.1} %)",
        mods.elements()
    );
    if mods.skipped > 0 {
        line.push_str(&format!(", {} skipped", mods.skipped));
    }
    line
}

// ---------------------------------------------------------------------------
// test-values
// ---------------------------------------------------------------------------

pub fn test_values(args: &TestValuesArgs) -> Outcome {
    let mut outcome = Outcome::default();
    let settings = match load_config(args.config.as_deref()).and_then(|c| args.apply(c.sweep)) {
        Ok(settings) => settings,
        Err(err) => {
            outcome.fail(args.config.as_deref().unwrap_or(Path::new("<arguments>")), &err);
            return outcome;
        }
    };
    if let Err(err) = std::fs::create_dir_all(&args.outdir) {
        outcome.fail(&args.outdir, &err.into());
        return outcome;
    }

    for file in &args.files {
        match sweep_file(file, args, &settings) {
            Ok(written) => {
                outcome.processed += 1;
                info!(file = %file.display(), artifacts = written, "Values tested");
            }
            Err(err) => outcome.fail(file, &err),
        }
    }
    outcome
}

#[instrument(skip_all, fields(file = %file.display()))]
fn sweep_file(file: &Path, args: &TestValuesArgs, settings: &SweepConfig) -> Result<usize> {
    let page = PageXml::from_file(file, args.namespace.as_deref())?;
    let basedir = match &args.basedir {
        Some(dir) => dir.as_path(),
        None => file.parent().unwrap_or(Path::new("")),
    };
    let image = page.image_path(basedir)?;
    let stem = args
        .outdir
        .join(file.file_name().unwrap_or(OsStr::new("page")));

    let artifacts = page.sweep_with(settings, &image, &stem, |artifact| {
        println!("{}", artifact.path.display());
    })?;
    Ok(artifacts.len())
}
