use amanc::{
    ast::{printer::print_unit, CompilationUnit},
    frontend::{tokenize, Parser, Token},
    read,
    utils::{AmanError, AmanResult, Diagnostic},
};
use clap::Parser as ClapParser;
use std::{path::PathBuf, time::Instant};

#[derive(ClapParser)]
#[command(
    author,
    version,
    about = "Front end for the Aman language: scanner, parser and AST builder",
    long_about = "Front end for the Aman language.\n\
                 Scans and parses one module, reporting every syntax error it can\n\
                 recover from in a single pass.\n\
                 \n\
                 Example usage:\n\
                 amanc demo.mod                    # Check syntax\n\
                 amanc demo.mod --tokens           # Dump the token stream\n\
                 amanc demo.mod --show-ast         # Display abstract syntax tree\n\
                 amanc demo.mod --pretty           # Print canonical source\n\
                 amanc demo.mod --verbose          # Verbose output\n\
                 amanc demo.mod --timing           # Show phase timing"
)]
struct Cli {
    // The path to the module to parse
    path: PathBuf,

    // Print every token with its position
    #[arg(long)]
    tokens: bool,

    // Show AST after parsing
    #[arg(long)]
    show_ast: bool,

    // Print the module back as canonical source
    #[arg(short, long)]
    pretty: bool,

    // Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    // Show phase timing
    #[arg(short, long)]
    timing: bool,
}

// Front-end statistics for the --timing table
#[derive(Debug, Default)]
struct ParseStats {
    lexer_time: f64,
    parser_time: f64,
    total_time: f64,
    token_count: usize,
    declaration_count: usize,
    diagnostic_count: usize,
}

// Print error message and exit with error code
fn fatal(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

// Scan once for the token dump and the token count
fn lexical_analysis(source: &str, stats: &mut ParseStats, verbose: bool) -> Vec<Token> {
    let lexer_start = Instant::now();
    let (tokens, _) = tokenize(source);
    stats.lexer_time = lexer_start.elapsed().as_secs_f64();
    stats.token_count = tokens.len();

    if verbose {
        println!("Lexical analysis completed in {:.3}s", stats.lexer_time);
        println!("  Generated {} tokens", stats.token_count);
    }
    tokens
}

fn parsing_phase(
    source: &str,
    stats: &mut ParseStats,
    verbose: bool,
) -> (CompilationUnit, Vec<Diagnostic>) {
    let parser_start = Instant::now();
    let (unit, diagnostics) = Parser::new(source).parse();
    stats.parser_time = parser_start.elapsed().as_secs_f64();
    stats.declaration_count = unit.block.declarations.len();
    stats.diagnostic_count = diagnostics.len();

    if verbose {
        println!("Parsing completed in {:.3}s", stats.parser_time);
        println!("  {} top-level declarations, {} diagnostics", stats.declaration_count, stats.diagnostic_count);
    }
    (unit, diagnostics)
}

fn run(args: &Cli) -> AmanResult<ParseStats> {
    let start_time = Instant::now();
    let mut stats = ParseStats::default();

    if args.verbose {
        println!("Parsing module: {}", args.path.display());
    }
    if !args.path.exists() {
        return Err(AmanError::file_read_error(format!(
            "Input file does not exist: {}",
            args.path.display()
        )));
    }

    let source = read(&args.path)?;
    if args.verbose {
        println!("Read {} bytes from input file", source.len());
    }

    let tokens = lexical_analysis(&source, &mut stats, args.verbose);
    if args.tokens {
        println!("\nTokens:");
        for token in &tokens {
            println!("  {:>4}:{:<4} {:<16} {}", token.line(), token.column(), format!("{:?}", token.kind), token);
        }
    }

    let (unit, diagnostics) = parsing_phase(&source, &mut stats, args.verbose);

    if args.show_ast {
        println!("\nAbstract Syntax Tree:");
        println!("{:#?}", unit);
    }

    for diagnostic in &diagnostics {
        eprintln!("{}: {}", args.path.display(), diagnostic);
    }

    if args.pretty && diagnostics.is_empty() {
        print!("{}", print_unit(&unit)?);
    }

    stats.total_time = start_time.elapsed().as_secs_f64();
    if !diagnostics.is_empty() {
        if args.timing {
            print_stats(&stats);
        }
        return Err(AmanError::SyntaxErrors {
            count: diagnostics.len(),
        });
    }
    Ok(stats)
}

fn print_stats(stats: &ParseStats) {
    println!("\nParse Statistics:");
    println!("  Lexical Analysis    {:>8.3}s", stats.lexer_time);
    println!("  Parsing             {:>8.3}s", stats.parser_time);
    println!("  Total Time          {:>8.3}s", stats.total_time);
    println!("  Tokens:             {}", stats.token_count);
    println!("  Declarations:       {}", stats.declaration_count);
    println!("  Diagnostics:        {}", stats.diagnostic_count);
}

fn main() {
    let args = Cli::parse();

    match run(&args) {
        Ok(stats) => {
            if args.timing {
                print_stats(&stats);
            }
            if args.verbose {
                println!("No syntax errors in {}", args.path.display());
            }
        }
        Err(e) => fatal(&e.to_string()),
    }
}
