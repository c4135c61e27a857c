use std::path::Path;

use clap::Parser;
use lux::interpreter::loader::Loader;

/// lux is a small dynamically-typed scripting language with lexical
/// scoping and first-class closures.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells lux to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let loader = Loader::new();
    let evaluation = if args.file {
        loader.run_file(Path::new(&args.contents))
    } else {
        loader.run_source(&args.contents, "<script>")
    };

    for line in &evaluation.output {
        println!("{line}");
    }

    if let Some(error) = evaluation.error {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
