use clap::Parser;
use std::fs;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;
use svgo::{RecordingBackend, RenderOptions, SvgWriter, parse_document_from_reader, render};
use tracing_subscriber::EnvFilter;

/// Render a simple SVG file through the svgo scene graph
#[derive(Parser, Debug)]
#[command(name = "svgo", version)]
struct Args {
    /// Input SVG file
    input: PathBuf,

    /// Write the rendered SVG here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the backend call sequence instead of SVG
    #[arg(long)]
    trace: bool,

    /// Reset stroke width and color before every path
    #[arg(long)]
    reset_stroke_state: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let file = match fs::File::open(&args.input) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error reading input file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let doc = match parse_document_from_reader(BufReader::new(file)) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error parsing SVG file: {}", e);
            process::exit(2);
        }
    };

    let options = RenderOptions {
        reset_stroke_state: args.reset_stroke_state,
    };

    let output = if args.trace {
        let mut backend = RecordingBackend::new();
        // Recording cannot fail
        let Ok(()) = render(&doc, &mut backend, &options);
        let mut text = String::new();
        for call in backend.calls() {
            text.push_str(&call.to_string());
            text.push('\n');
        }
        text
    } else {
        let mut writer = SvgWriter::new();
        match render(&doc, &mut writer, &options).and_then(|()| writer.finish(&doc.title)) {
            Ok(svg) => svg,
            Err(e) => {
                eprintln!("Error rendering SVG: {}", e);
                process::exit(3);
            }
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing output file '{}': {}", path.display(), e);
                process::exit(3);
            }
        }
        None => print!("{}", output),
    }
}
