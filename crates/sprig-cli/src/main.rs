//! sprig - parse a source file and print its AST
//!
//! Runs the reference tokenizer and the parser over one file and prints the
//! result in the requested form.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use sprig_ast::Ast;
use sprig_parser::{ParserConfig, invert_whitespace, validate_within};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(about = "Parse a sprig source file and print its AST")]
struct Cli {
    /// Path to the source file
    file: PathBuf,

    /// Output form
    #[arg(long, value_enum, default_value = "source")]
    emit: Emit,

    /// Deepest nesting accepted before parsing fails
    #[arg(long, default_value_t = sprig_parser::parser::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log every parse stage
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Canonical source, one root expression per line
    Source,
    /// Indented node tree
    Tree,
    /// JSON serialization of the root block
    Json,
    /// Token stream after whitespace inversion
    Tokens,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,sprig_lexer=debug,sprig_parser=debug,sprig=debug")
        } else {
            EnvFilter::new("warn,sprig_parser=info,sprig=info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match std::fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to read {}: {}", cli.file.display(), e);
            process::exit(1);
        }
    };

    let tokens = match sprig_lexer::lex(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            error!("{}: {}", cli.file.display(), e);
            process::exit(1);
        }
    };
    debug!("lexed {} top-level tokens", tokens.len());

    if cli.emit == Emit::Tokens {
        print_tokens(tokens, cli.max_depth);
        return;
    }

    let config = ParserConfig::default().with_max_depth(cli.max_depth);
    let root = match sprig_parser::Parser::new(config).parse(tokens) {
        Ok(root) => root,
        Err(e) => {
            error!("{}: {}", cli.file.display(), e);
            process::exit(1);
        }
    };
    info!(
        "parsed {} ({})",
        cli.file.display(),
        if root.is_settled() {
            "settled"
        } else {
            "contains prototype nodes"
        }
    );

    match cli.emit {
        Emit::Source => print_source(&root),
        Emit::Tree => println!("{}", root.tree()),
        Emit::Json => match serde_json::to_string_pretty(&root) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize AST: {}", e);
                process::exit(1);
            }
        },
        Emit::Tokens => {}
    }
}

fn print_source(root: &Ast) {
    match root {
        Ast::Block { items, .. } => {
            for item in items {
                println!("{item}");
            }
        }
        other => println!("{other}"),
    }
}

fn print_tokens(mut tokens: Vec<sprig_lexer::Token>, max_depth: usize) {
    if let Err(e) = validate_within(&tokens, max_depth) {
        error!("{}", e);
        process::exit(1);
    }
    invert_whitespace(&mut tokens);
    for token in &tokens {
        println!("{token:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_emit_source() {
        let cli = Cli::try_parse_from(["sprig", "main.sp"]).unwrap();
        assert_eq!(cli.emit, Emit::Source);
        assert_eq!(cli.max_depth, sprig_parser::parser::DEFAULT_MAX_DEPTH);
        assert!(!cli.verbose);
    }

    #[test]
    fn emit_and_depth_flags() {
        let cli =
            Cli::try_parse_from(["sprig", "main.sp", "--emit", "tree", "--max-depth", "8", "-v"])
                .unwrap();
        assert_eq!(cli.emit, Emit::Tree);
        assert_eq!(cli.max_depth, 8);
        assert!(cli.verbose);

        assert!(Cli::try_parse_from(["sprig", "main.sp", "--emit", "yaml"]).is_err());
    }
}
