//! CLI library modules for the multisieve binary.
//!
//! Kept in the library so the argument handling can be tested without
//! spawning the binary.

pub mod output;
pub mod parser;
pub mod utils;

pub use parser::{Cli, InputFormat, LogLevel};

use crate::config::ResolverConfig;
use crate::document::MentionDocument;
use crate::extract::{extract_mentions, TermDocument};
use crate::resolver::Resolver;
use output::{format_error, write_output};
use std::path::PathBuf;

/// Configuration file values overridden by command-line flags.
pub fn effective_config(cli: &Cli) -> Result<ResolverConfig, String> {
    let mut config = match &cli.config {
        Some(path) => ResolverConfig::from_file(path)
            .map_err(|e| format_error("load config", &format!("{}: {}", path.display(), e)))?,
        None => ResolverConfig::default(),
    };
    if cli.include_singletons {
        config = config.with_singletons(true);
    }
    if cli.keep_gaps {
        config = config.with_fill_gaps(false);
    }
    if let Some(language) = &cli.language {
        config = config.with_language(language.clone());
    }
    if let Some(path) = &cli.stopwords {
        config = config.with_stopwords_path(path.clone());
    }
    if let Some(distance) = cli.max_pronoun_distance {
        config = config.with_max_pronoun_distance(distance);
    }
    Ok(config)
}

/// Parse one input document into mentions.
fn load_document(
    json: &str,
    format: InputFormat,
    resolver: &Resolver,
) -> Result<MentionDocument, String> {
    match format {
        InputFormat::Mentions => {
            serde_json::from_str(json).map_err(|e| format_error("parse mention document", &e.to_string()))
        }
        InputFormat::Terms => {
            let terms: TermDocument = serde_json::from_str(json)
                .map_err(|e| format_error("parse term document", &e.to_string()))?;
            extract_mentions(&terms, resolver.stopwords())
                .map_err(|e| format_error("extract mentions", &e.to_string()))
        }
    }
}

/// Run the CLI: read, resolve and write every input.
pub fn run(cli: Cli) -> Result<(), String> {
    if cli.output.is_some() && cli.inputs.len() > 1 {
        return Err("--output takes a single input; use --output-dir for several".to_string());
    }

    let config = effective_config(&cli)?;
    if cli.print_config {
        let toml = config
            .to_toml_string()
            .map_err(|e| format_error("print config", &e.to_string()))?;
        return write_output(toml.trim_end(), None);
    }
    let resolver = Resolver::from_config(config).map_err(|e| format_error("configure", &e.to_string()))?;

    let sources: Vec<Option<PathBuf>> = if cli.inputs.is_empty() {
        vec![None]
    } else {
        cli.inputs.iter().cloned().map(Some).collect()
    };

    let mut documents = Vec::with_capacity(sources.len());
    for source in &sources {
        let json = match source {
            Some(path) => utils::read_input_file(path)?,
            None => utils::read_stdin()?,
        };
        let mut doc = load_document(&json, cli.input_format, &resolver).map_err(|e| match source {
            Some(path) => format!("{} ({})", e, path.display()),
            None => e,
        })?;
        if doc.id.is_none() {
            doc.id = source.as_deref().and_then(utils::document_name);
        }
        documents.push(doc);
    }

    let results = resolver.resolve_batch(&documents);
    for (source, result) in sources.iter().zip(results) {
        let output = result.map_err(|e| format_error("resolve", &e.to_string()))?;
        let json = output
            .to_json(cli.pretty)
            .map_err(|e| format_error("serialize", &e.to_string()))?;
        let target = match (&cli.output_dir, source) {
            (Some(dir), Some(path)) => Some(utils::output_path(dir, path)),
            (Some(dir), None) => Some(dir.join("stdin.json")),
            (None, _) => cli.output.clone(),
        };
        write_output(&json, target.as_deref())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsString;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multisieve.toml");
        std::fs::write(&path, "include_singletons = false\nmax_pronoun_distance = 1\n").unwrap();
        let args: Vec<OsString> = vec![
            "multisieve".into(),
            "--config".into(),
            path.into_os_string(),
            "-s".into(),
            "-g".into(),
        ];
        let cli = Cli::parse_from(args);
        let config = effective_config(&cli).unwrap();
        assert!(config.include_singletons);
        assert!(!config.fill_gaps);
        assert_eq!(config.max_pronoun_distance, 1);
    }

    #[test]
    fn missing_config_file() {
        let cli = Cli::parse_from(["multisieve", "--config", "/nonexistent/multisieve.toml"]);
        assert!(effective_config(&cli).unwrap_err().contains("load config"));
    }

    #[test]
    fn resolves_files_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("obama.json");
        std::fs::write(
            &input,
            r#"{
                "mentions": [
                    {"id": 0, "span": [0], "head_offset": 0, "head_pos": "name"},
                    {"id": 1, "span": [12], "head_offset": 12, "head_pos": "name"}
                ],
                "tokens": {"0": "Obama", "6": "lacht", "12": "Obama"}
            }"#,
        )
        .unwrap();
        let out = dir.path().join("out");
        let args: Vec<OsString> = vec![
            "multisieve".into(),
            "--input-format".into(),
            "mentions".into(),
            "--output-dir".into(),
            out.clone().into_os_string(),
            input.into_os_string(),
        ];
        let cli = Cli::parse_from(args);
        run(cli).unwrap();
        let written = std::fs::read_to_string(out.join("obama.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["document_id"], "obama");
        assert_eq!(value["groups"][0]["id"], "co1");
    }

    #[test]
    fn output_with_many_inputs_is_rejected() {
        let cli = Cli::parse_from(["multisieve", "-o", "x.json", "a.json", "b.json"]);
        assert!(run(cli).is_err());
    }
}
