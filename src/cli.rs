//! Minimal CLI host: JSON files / stdin → (go | rust) declarations.
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use json_to_struct::host::{self, FileSink, StdoutSink, TextSink, TextSource};
use json_to_struct::select::Selector;
use json_to_struct::settings::Settings;
use json_to_struct::{convert_samples, parse, Conversion, ConvertOptions, NumberPolicy, Target};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// convert JSON samples into struct declarations (Go by default, or Rust)
#[derive(Parser, Debug)]
#[command(name = "json-to-struct", version)]
pub struct CommandLineInterface {
    /// more logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit Go structs with json tags
    Go(GoOut),
    /// emit Rust structs deriving serde traits
    Rust(RustOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output is a sample
    #[arg(long)]
    jq_expr: Option<String>,

    /// infer one type from all inputs together instead of one per input
    #[arg(long, default_value_t = false)]
    merge: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct TypeSettings {
    /// JSON settings file (generatedTypeName, inlineTypeDefinitions, allOmitEmpty, ...)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// top-level type name
    #[arg(long)]
    root_type: Option<String>,

    /// mark every field optional
    #[arg(long, default_value_t = false)]
    all_optional: bool,

    /// how numbers are typed
    #[arg(long, value_enum)]
    numbers: Option<NumberPolicy>,

    /// keep RFC 3339 strings as plain strings
    #[arg(long, default_value_t = false)]
    no_time: bool,

    /// always re-case keys, even ones that already are valid identifiers
    #[arg(long, default_value_t = false)]
    recase_all: bool,
}

#[derive(clap::Parser, Debug)]
struct GoOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    type_settings: TypeSettings,

    /// write nested structs inline instead of as named types
    #[arg(long, default_value_t = false)]
    inline: bool,

    /// prepend a package clause
    #[arg(long)]
    package: Option<String>,

    /// output file (stdout if omitted; `.go` is added when it has no extension)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct RustOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    type_settings: TypeSettings,

    /// output file (stdout if omitted; `.rs` is added when it has no extension)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// Samples read from one input.
struct Document {
    origin: String,
    samples: Vec<Value>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn selector(&self) -> Selector {
        Selector { json_pointer: self.json_pointer.clone(), jq_expr: self.jq_expr.clone() }
    }

    /// Read, parse and select every input. One result per input, in input order.
    fn load_documents(&self) -> Result<Vec<Result<Document>>> {
        let sources = host::resolve_sources(&self.input)
            .map_err(|error| anyhow!("failed to resolve input file paths: {error}"))?;
        let selector = self.selector();
        Ok(sources
            .par_iter()
            .map(|source| self.load_document(source.as_ref(), &selector))
            .collect())
    }

    fn load_document(&self, source: &dyn TextSource, selector: &Selector) -> Result<Document> {
        let origin = source.describe();
        let text = source
            .read_text()
            .with_context(|| format!("failed to read {origin}"))?
            .ok_or_else(|| anyhow!("nothing found inside {origin}"))?;

        let mut values = Vec::new();
        if self.ndjson {
            for (ix, line) in text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
                let value = parse::parse_json(line)
                    .with_context(|| format!("{origin}, line {}", ix + 1))?;
                values.push(value);
            }
        } else {
            values.push(parse::parse_json(&text).with_context(|| origin.clone())?);
        }

        let mut samples = Vec::with_capacity(values.len());
        for value in values {
            if selector.is_identity() {
                samples.push(value);
            } else {
                samples.extend(selector.apply(value).with_context(|| origin.clone())?);
            }
        }
        tracing::info!(%origin, samples = samples.len(), "loaded input");
        Ok(Document { origin, samples })
    }
}

impl TypeSettings {
    fn options(&self, target: Target) -> Result<ConvertOptions> {
        let mut options = match &self.settings {
            Some(path) => {
                let settings = Settings::load(path)?;
                if settings.target.is_some_and(|wanted| wanted != target) {
                    tracing::warn!(
                        settings = %path.display(),
                        "settings file names another target; using the `{}` subcommand",
                        json_to_struct::codegen::generator_for(target).language(),
                    );
                }
                settings.to_options()
            }
            None => ConvertOptions::default(),
        };
        options.target = target;
        if let Some(root) = &self.root_type {
            options.root_type_name = root.clone();
        }
        if let Some(numbers) = self.numbers {
            options.number_policy = numbers;
        }
        options.all_fields_optional |= self.all_optional;
        options.detect_time &= !self.no_time;
        options.preserve_valid_identifiers &= !self.recase_all;
        Ok(options)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Returns the process exit code.
    pub fn run(&self) -> i32 {
        match self.try_run() {
            Ok(0) => 0,
            Ok(_) => 1,
            Err(error) => {
                report(&error);
                2
            }
        }
    }

    fn try_run(&self) -> Result<usize> {
        let (input, options, out, no_op) = match &self.cmd {
            Command::Go(target) => {
                let mut options = target.type_settings.options(Target::Go)?;
                options.extract_nested_types &= !target.inline;
                if target.package.is_some() {
                    options.package = target.package.clone();
                }
                (&target.input_settings, options, &target.out, target.no_op)
            }
            Command::Rust(target) => {
                let options = target.type_settings.options(Target::Rust)?;
                (&target.input_settings, options, &target.out, target.no_op)
            }
        };

        // debug path
        if no_op {
            eprintln!("{self:#?}\n{options:#?}");
            return Ok(0);
        }

        // 1) read + parse + select
        let mut failures = 0;
        let mut documents = Vec::new();
        for loaded in input.load_documents()? {
            match loaded {
                Ok(doc) => documents.push(doc),
                Err(error) => {
                    report(&error);
                    failures += 1;
                }
            }
        }
        if documents.is_empty() {
            return Err(anyhow!("no usable input"));
        }

        // 2) infer + render
        let rendered = render_documents(&documents, &options, input.merge);

        // 3) write
        let language = json_to_struct::codegen::generator_for(options.target).language();
        let mut sink: Box<dyn TextSink> = match out {
            Some(path) => Box::new(FileSink { path: path.clone() }),
            None => Box::new(StdoutSink),
        };
        sink.write_text(&rendered, Some(language)).context("failed to write output")?;

        Ok(failures)
    }
}

/// One declaration block per document, or a single block with `merge`.
fn render_documents(documents: &[Document], options: &ConvertOptions, merge: bool) -> String {
    if merge || documents.len() == 1 {
        let samples = documents.iter().flat_map(|d| d.samples.iter());
        return convert_samples(samples, options).declaration;
    }

    // independent conversions, each with its own registry
    let conversions: Vec<(&str, Conversion)> = documents
        .par_iter()
        .map(|d| (d.origin.as_str(), convert_samples(&d.samples, options)))
        .collect();

    let mut out = String::new();
    for (i, (origin, conversion)) in conversions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("// {origin}\n"));
        out.push_str(&conversion.declaration);
    }
    out
}

fn report(error: &anyhow::Error) {
    eprintln!("{} {error:#}", "error:".red().bold());
}
