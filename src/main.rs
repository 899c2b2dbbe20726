// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

// Core modules
mod pfc_config;
mod pfd_doc;
mod pfe_error;
mod pff_form;
mod pft_types;
mod pfu_params;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pfd_doc::Document;
use pfe_error::FormError;
use pff_form::ParamForm;

fn usage() {
    eprintln!("usage: physiform [--config PATH] [--set NAME=VALUE]... [--reset]");
    eprintln!();
    eprintln!("Loads the parameter config (deploying the embedded default on first");
    eprintln!("run), applies any --set edits, writes the document back (archiving");
    eprintln!("the previous version), and prints the resulting parameter table.");
    eprintln!("--reset archives the current config and restores the embedded default.");
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config_override: Option<PathBuf> = None;
    let mut edits: Vec<(String, String)> = Vec::new();
    let mut reset = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => match iter.next() {
                Some(path) => config_override = Some(PathBuf::from(path)),
                None => {
                    usage();
                    return ExitCode::FAILURE;
                }
            },
            "--set" => match iter.next().and_then(|pair| pair.split_once('=')) {
                Some((name, value)) => edits.push((name.to_string(), value.to_string())),
                None => {
                    usage();
                    return ExitCode::FAILURE;
                }
            },
            "--reset" => reset = true,
            _ => {
                usage();
                return ExitCode::FAILURE;
            }
        }
    }

    let path = config_override.unwrap_or_else(pfc_config::config_path);
    if reset {
        if let Err(e) = pfc_config::save_config_file(&path, pfc_config::default_config()) {
            eprintln!("FORM: ERROR {}", e);
            return ExitCode::FAILURE;
        }
        eprintln!("FORM: restored embedded default to {}", path.display());
    }
    match run(&path, &edits) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("FORM: ERROR {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Host integration flow: open document, load form, edit, save, persist
fn run(path: &Path, edits: &[(String, String)]) -> Result<(), FormError> {
    pfc_config::ensure_default_config(path)?;

    let xml = pfc_config::load_config_file(path)?;
    let mut doc = Document::parse(&xml)?;

    let mut form = ParamForm::new();
    form.load_from_doc(&doc)?;
    eprintln!(
        "FORM: loaded {} parameters from {}",
        pfu_params::FIELDS.len(),
        path.display()
    );

    if !edits.is_empty() {
        for (name, value) in edits {
            form.set_text(name, value)?;
            eprintln!("FORM: set {} = {}", name, value);
        }
        form.save_to_doc(&mut doc)?;
        pfc_config::save_config_file(path, &doc.to_xml()?)?;
        eprintln!("FORM: saved {}", path.display());
    }

    for (spec, value) in form.rows() {
        println!("{:<38} {:>24}  {}", spec.name, value.render(), spec.unit);
    }

    Ok(())
}
