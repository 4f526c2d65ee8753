//! Blifparser - BLIF netlist checker
//!
//! Parses a BLIF file and prints every problem found in it.
//!
//! # Usage
//!
//! ```bash
//! blifparser circuit.blif
//! blifparser -v --graph circuit.blif
//! ```

use std::path::PathBuf;

use blifparser::{
    error::Result,
    graph::{FileLoader, GraphBuilder},
    Blif,
};
use clap::Parser;

/// BLIF netlist parser and validator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the BLIF file
    #[arg(value_name = "BLIF_FILE")]
    blif_file: PathBuf,

    /// Verbosity level (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the connectivity graph after the report
    #[arg(long)]
    graph: bool,

    /// Print the connectivity graph as Graphviz DOT
    #[arg(long)]
    dot: bool,

    /// Print the canonical rendering of the parsed document
    #[arg(long)]
    render: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    // Parse the BLIF file
    let blif = blifparser::parse(&args.blif_file)?;
    tracing::info!(path = %args.blif_file.display(), "parsed");

    print_report(&blif);

    if args.render {
        println!();
        print!("{}", blif);
    }

    if args.graph || args.dot {
        let graph = GraphBuilder::new(FileLoader::beside(&args.blif_file)).build(&blif)?;

        if args.graph {
            println!();
            println!("GRAPH:\n");
            for node in graph.nodes() {
                println!(
                    "{} [{}] in: {:?} out: {:?}",
                    node.id, node.kind, node.pin_inputs, node.pin_outputs
                );
            }
            for (from, to, signal) in graph.edges() {
                println!("{} -> {} ({})", from.id, to.id, signal);
            }
            println!(
                "\n* longest label: {}, max fan-in: {}",
                graph.longest_label(),
                graph.max_fan_in()
            );
        }

        if args.dot {
            println!();
            print!("{}", graph.to_dot());
        }
    }

    Ok(())
}

fn print_report(blif: &Blif) {
    println!();
    println!("ISSUES LIST:\n");
    for problem in &blif.problems {
        println!("{}", problem);
    }
    println!();

    let warnings = blif.warnings();
    if !warnings.is_empty() {
        println!("WARNINGS:\n");
        for warning in &warnings {
            println!("{}", warning);
        }
        println!();
    }

    println!("{}", "=".repeat(50));
    println!("\nREPORT:\n");
    println!("* {} issues found", blif.problems.len());
}
