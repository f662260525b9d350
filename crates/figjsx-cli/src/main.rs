use clap::{Parser, Subcommand};
use figjsx_codegen::{collect, compile, component_module, Escaping, RenderContext, RenderOptions};
use figjsx_model::Node;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "figjsx")]
#[command(about = "Design document to JSX + Tailwind generator")]
#[command(version)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one .jsx module per page frame and component
    Build {
        /// Design file JSON (file response or bare node tree)
        path: String,

        /// Output directory (defaults to the input's directory)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// JSON object mapping image refs to resolved paths
        #[arg(long)]
        images: Option<String>,

        /// JSON object mapping component ids to names, merged over the
        /// names collected from the document
        #[arg(long)]
        components: Option<String>,

        /// Escape JSX-significant characters in text and alt attributes
        #[arg(long)]
        escape: bool,
    },

    /// Check a design file for errors without writing output
    Check {
        /// Design file JSON
        path: String,
    },

    /// Print the class string derived for one node
    Classes {
        /// Design file JSON
        path: String,

        /// Node id, e.g. `12:34`
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Command::Build {
            path,
            out,
            images,
            components,
            escape,
        } => cmd_build(&path, out, images.as_deref(), components.as_deref(), escape),
        Command::Check { path } => cmd_check(&path),
        Command::Classes { path, id } => cmd_classes(&path, &id),
    }
}

fn fail(message: String) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        fail(format!("file not found: {path}"));
    }
    std::fs::read_to_string(p).unwrap_or_else(|e| fail(format!("reading {path}: {e}")))
}

fn load_document(path: &str) -> Node {
    let source = read_source(path);
    figjsx_model::parse_document(&source).unwrap_or_else(|e| fail(format!("{path}: {e}")))
}

/// Read a flat `{ "key": "value" }` JSON table.
fn load_table(path: Option<&str>) -> HashMap<String, String> {
    let Some(path) = path else {
        return HashMap::new();
    };
    let source = read_source(path);
    serde_json::from_str(&source)
        .unwrap_or_else(|e| fail(format!("{path}: expected a JSON object of strings: {e}")))
}

fn cmd_build(
    path: &str,
    out: Option<PathBuf>,
    images: Option<&str>,
    extra_components: Option<&str>,
    escape: bool,
) {
    let root = load_document(path);

    let images = load_table(images);
    let mut components = collect::component_names(&root);
    components.extend(load_table(extra_components));

    for image_ref in collect::image_refs(&root) {
        if !images.contains_key(&image_ref) {
            log::warn!("image {image_ref} has no resolved path; its src will be empty");
        }
    }

    let options = RenderOptions {
        escaping: if escape { Escaping::Jsx } else { Escaping::Raw },
        ..RenderOptions::default()
    };
    let ctx = RenderContext::new(&components, &images).with_options(options);
    let output = compile(&root, &ctx);

    let dir = out.unwrap_or_else(|| {
        Path::new(path)
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf()
    });
    if let Err(e) = std::fs::create_dir_all(&dir) {
        fail(format!("creating {}: {e}", dir.display()));
    }

    let known: Vec<&str> = output
        .components
        .iter()
        .map(|c| c.component_name.as_str())
        .collect();

    for generated in output.iter() {
        let module = component_module(&generated.component_name, &generated.jsx, &known)
            .unwrap_or_else(|e| fail(e.to_string()));
        let file = dir.join(format!("{}.jsx", generated.component_name));
        if let Err(e) = std::fs::write(&file, module) {
            fail(format!("writing {}: {e}", file.display()));
        }
        eprintln!("Built: {}", file.display());
    }
}

fn cmd_check(path: &str) {
    let root = load_document(path);
    let components = collect::component_names(&root);
    let images = HashMap::new();
    let ctx = RenderContext::new(&components, &images);
    let output = compile(&root, &ctx);

    eprintln!(
        "OK: {path} ({} pages, {} components, {} images)",
        output.pages.len(),
        output.components.len(),
        collect::image_refs(&root).len()
    );
}

fn cmd_classes(path: &str, id: &str) {
    let root = load_document(path);
    match root.find(id) {
        Some(node) => println!("{}", figjsx_codegen::class_string(node)),
        None => fail(format!("no node with id {id} in {path}")),
    }
}
