// Copyright 2026 The Lambdac Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs::File;
use std::io::{self, Read, Write};
use std::result::Result as StdResult;

use pico_args::Arguments;

use lambdac_engine::common::{excerpt, line_col};
use lambdac_engine::json::{self, Report};
use lambdac_engine::{Diagnostic, Result, Token, TokenKind, eprintln, parse, tokenize};

const VERSION: &str = "0.1";
const EXIT_FAILURE: i32 = 1;

macro_rules! die(
    ($($arg:tt)*) => { {
        eprintln!($($arg)*);
        std::process::exit(EXIT_FAILURE)
    } }
);

fn usage() -> ! {
    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| "<lambdac>".to_string());
    die!(
        concat!(
            "lambdac {}: Check curried-lambda expressions.\n\
         \n\
         USAGE:\n",
            "    {} [SUBCOMMAND] [OPTION...] [PATH]\n",
            "\n\
         OPTIONS:\n",
            "    -h, --help       show this message\n",
            "    --json           output JSON instead of text\n",
            "    --output FILE    path to write output file\n",
            "    --verbose        report token and diagnostic counts on stderr\n",
            "\n\
         SUBCOMMANDS:\n",
            "    tokens           Print the token table\n",
            "    check            Print diagnostics, exiting with 1 if there are any\n",
            "\n\
         PATH defaults to standard input.\n",
        ),
        VERSION,
        argv0
    );
}

#[derive(Clone, Default, Debug)]
struct Args {
    path: Option<String>,
    output: Option<String>,
    is_tokens: bool,
    is_json: bool,
    is_verbose: bool,
}

fn parse_args() -> StdResult<Args, Box<dyn std::error::Error>> {
    let mut parsed = Arguments::from_env();
    if parsed.contains(["-h", "--help"]) {
        usage();
    }

    let Some(subcommand) = parsed.subcommand()? else {
        eprintln!("error: subcommand required");
        usage();
    };

    let mut args: Args = Default::default();

    if subcommand == "tokens" {
        args.is_tokens = true;
    } else if subcommand == "check" {
    } else {
        eprintln!("error: unknown subcommand {}", subcommand);
        usage();
    }

    args.output = parsed.value_from_str("--output").ok();
    args.is_json = parsed.contains("--json");
    args.is_verbose = parsed.contains("--verbose");

    let free_arguments = parsed.finish();
    if free_arguments.len() > 1 {
        eprintln!("error: only one input path is accepted");
        usage();
    }
    args.path = free_arguments
        .first()
        .and_then(|path| path.to_str())
        .map(|s| s.to_owned());

    Ok(args)
}

fn read_source(path: Option<&str>) -> Result<String> {
    let mut contents = String::new();
    match path {
        Some(path) => {
            File::open(path)?.read_to_string(&mut contents)?;
        }
        None => {
            io::stdin().read_to_string(&mut contents)?;
        }
    }
    Ok(contents)
}

fn write_output(path: Option<&str>, output: &str) -> Result<()> {
    match path {
        Some(path) => File::create(path)?.write_all(output.as_bytes())?,
        None => io::stdout().write_all(output.as_bytes())?,
    }
    Ok(())
}

fn token_table(tokens: &[Token<'_>]) -> String {
    let mut out = format!("{:>4}  {:<16}  {:<12}  {}\n", "code", "kind", "text", "position");
    for tok in tokens {
        let text = if tok.kind() == TokenKind::NewLine {
            "\\n"
        } else {
            tok.text()
        };
        out.push_str(&format!(
            "{:>4}  {:<16}  {:<12}  {}\n",
            tok.code(),
            tok.kind().name(),
            text,
            tok.position()
        ));
    }
    out
}

fn diagnostic_list(source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for diag in diagnostics {
        let (line, col) = line_col(source, diag.start());
        let mut lines = diag.message().lines();
        let first = lines.next().unwrap_or_default();
        out.push_str(&format!("{}:{}: {}: {}\n", line, col, diag.code(), first));
        for rest in lines {
            out.push_str(&format!("    {}\n", rest.trim_start()));
        }
        let (start, length) = diag.clamped(source.chars().count());
        let snippet = excerpt(source, start, length);
        if !snippet.trim().is_empty() && !snippet.contains('\n') {
            out.push_str(&format!("    | {snippet}\n"));
        }
    }
    out
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {}", err);
            usage();
        }
    };
    let path_name = args.path.as_deref().unwrap_or("<stdin>");

    let source = match read_source(args.path.as_deref()) {
        Ok(source) => source,
        Err(err) => die!("input '{}' error: {}", path_name, err),
    };

    let tokens = tokenize(&source);
    let diagnostics = parse(&tokens);
    if args.is_verbose {
        eprintln!(
            "{}: {} tokens, {} diagnostics",
            path_name,
            tokens.len(),
            diagnostics.len()
        );
    }

    let output = if args.is_json {
        let listed: &[Token<'_>] = if args.is_tokens { &tokens } else { &[] };
        let report = Report::from_parts(&source, listed, &diagnostics);
        match json::to_string(&report) {
            Ok(mut out) => {
                out.push('\n');
                out
            }
            Err(err) => die!("json error: {}", err),
        }
    } else if args.is_tokens {
        token_table(&tokens)
    } else {
        diagnostic_list(&source, &diagnostics)
    };

    if let Err(err) = write_output(args.output.as_deref(), &output) {
        die!("output error: {}", err);
    }

    if !args.is_tokens && !diagnostics.is_empty() {
        std::process::exit(EXIT_FAILURE);
    }
}

#[test]
fn test_token_table() {
    let source = "(\\x\n";
    let table = token_table(&tokenize(source));
    let rows: Vec<&str> = table.lines().collect();
    assert_eq!(5, rows.len());
    assert!(rows[1].contains("OpenBracket"));
    assert!(rows[1].ends_with("0: 1"));
    assert!(rows[4].contains("NewLine"));
    assert!(rows[4].contains("\\n"));
}

#[test]
fn test_diagnostic_list() {
    let source = "(\\x ->\n x + y;";
    let listing = diagnostic_list(source, &parse(&tokenize(source)));
    let rows: Vec<&str> = listing.lines().collect();
    assert_eq!(
        "2:6: unknown_name: name `y` does not exist in current context",
        rows[0]
    );
    assert_eq!("    | y", rows[1]);
    assert!(rows[2].starts_with("2:7: unexpected_token: expected"));
}
