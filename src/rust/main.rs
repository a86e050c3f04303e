use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use msgclass::render::{render_error, render_json, render_text};
use msgclass::{ArtifactStore, Classifier, ClassifierError, LabelPredictor, OtpExpiry, Pipeline};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Message to classify. Without it, messages are read from stdin one per line
    message: Option<String>,

    /// Directory holding vectorizer.json and model.json (or model.onnx)
    #[arg(short, long)]
    artifacts: Option<PathBuf>,

    /// Vectorizer artifact, overriding the one in the artifacts directory
    #[arg(long)]
    vectorizer: Option<PathBuf>,

    /// Model artifact, overriding the one in the artifacts directory
    #[arg(long)]
    model: Option<PathBuf>,

    /// Expected SHA-256 of the vectorizer artifact
    #[arg(long)]
    vectorizer_sha256: Option<String>,

    /// Expected SHA-256 of the model artifact
    #[arg(long)]
    model_sha256: Option<String>,

    /// Minutes before an OTP message is auto-deleted
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=30))]
    otp_expiry: u32,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn artifact_store(&self) -> ArtifactStore {
        let mut store = match &self.artifacts {
            Some(dir) => ArtifactStore::new(dir),
            None => ArtifactStore::discover(),
        };
        if let Some(path) = &self.vectorizer {
            store = store.with_vectorizer_path(path);
        }
        if let Some(path) = &self.model {
            store = store.with_model_path(path);
        }
        if let Some(hash) = &self.vectorizer_sha256 {
            store = store.with_vectorizer_sha256(hash);
        }
        if let Some(hash) = &self.model_sha256 {
            store = store.with_model_sha256(hash);
        }
        store
    }
}

fn main() -> Result<()> {
    msgclass::init_logger();
    let args = Args::parse();

    let store = args.artifact_store();
    info!("Loading artifacts from {:?}", store.artifacts_dir());
    let classifier = Classifier::load(&store).with_context(|| {
        format!(
            "Required artifacts could not be loaded from {}",
            store.artifacts_dir().display()
        )
    })?;

    let expiry = OtpExpiry::new(args.otp_expiry)?;
    let pipeline = Pipeline::new(classifier).with_otp_expiry(expiry);

    match &args.message {
        Some(message) => {
            process_input(&pipeline, message, args.json).map_err(|e| anyhow!(render_error(&e)))?
        }
        None => run_interactive(&pipeline, args.json)?,
    }
    Ok(())
}

fn run_interactive<P: LabelPredictor>(pipeline: &Pipeline<P>, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("Enter a message to classify ('quit' to exit)");

    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim_end_matches(['\r', '\n']);
        if matches!(message.trim(), "quit" | "exit") {
            break;
        }

        // Per-message failures are reported and the loop continues
        if let Err(e) = process_input(pipeline, message, json) {
            eprintln!("{}", render_error(&e));
        }
    }
    Ok(())
}

/// Prints the outcome for one message. Failures are returned, not printed.
fn process_input<P: LabelPredictor>(
    pipeline: &Pipeline<P>,
    text: &str,
    json: bool,
) -> Result<(), ClassifierError> {
    let outcome = pipeline.handle(text)?;
    if json {
        match render_json(&outcome) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => eprintln!("Failed to encode result: {}", e),
        }
    } else {
        print!("{}", render_text(&outcome));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    impl LabelPredictor for Unreachable {
        fn classify(&self, _message: &str) -> Result<i64, ClassifierError> {
            panic!("predictor must not run for blank input");
        }
    }

    #[test]
    fn test_blank_message_returned_once() {
        let pipeline = Pipeline::new(Unreachable);
        let err = process_input(&pipeline, "   ", false).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyInput));
        assert_eq!(anyhow!(render_error(&err)).to_string(), "Please enter a valid message.");
    }
}
