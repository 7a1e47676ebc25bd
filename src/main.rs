/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     main.rs
 * Purpose:  Command-line entry point: runs a SADAL source file.
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * 
 * License:
 * This file is part of the SADAL interpreter project.
 * 
 * SADAL is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use sadal::config::{Config, DiagnosticFormat};
use sadal::diagnostics::DiagnosticPrinter;
use sadal::interpreter;

#[derive(Parser)]
#[command(name = "sadal")]
#[command(about = "Interpreter for the SADAL Ada-like language")]
#[command(version)]
struct Cli {
    /// SADAL source file to run
    file: PathBuf,

    /// Configuration file (defaults to ./sadal.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Diagnostic output format
    #[arg(long, value_enum)]
    diagnostics: Option<DiagnosticFormat>,

    /// Quote the offending source line under each diagnostic
    #[arg(long)]
    show_source: bool,

    /// List the declared variables before the success banner
    #[arg(long)]
    list_declarations: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match Config::discover(cli.config.as_deref(), Path::new(".")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sadal: {e}");
            return ExitCode::from(2);
        }
    };
    if let Some(format) = cli.diagnostics {
        config.diagnostics = format;
    }
    config.show_source |= cli.show_source;
    config.list_declarations |= cli.list_declarations;
    debug!("{:?}", config);

    let source = match std::fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("sadal: cannot read {}: {}", cli.file.display(), e);
            return ExitCode::from(2);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let report = interpreter::run(
        &source,
        stdin.lock(),
        BufWriter::new(stdout.lock()),
        &config,
    );

    if !report.succeeded {
        let printer = DiagnosticPrinter::new(source.as_str())
            .with_format(config.diagnostics)
            .with_source_lines(config.show_source);
        let stderr = io::stderr();
        if let Err(e) = printer.print_all(&mut stderr.lock(), &report.state.diagnostics) {
            eprintln!("sadal: cannot write diagnostics: {e}");
        }
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
