use std::env;
use std::path::{Path, PathBuf};

use chunk_model::DocChunk;
use creature_parser::{extract_creatures, write_outputs, ParserConfig};
use page_chunker::chunk_cache::{load_chunks, save_chunks};
use page_chunker::{default_backend, generate_chunks, open_source, ChunkingParams, LayoutBackend, CHUNKING_DEFAULTS};

const SRD_FILE_NAME: &str = "SRD-OGL_V5.1.pdf";

fn print_usage() {
    eprintln!(
        "Usage:\n\
         srd-extract [SRC_PDF] [--data DIR] [--layout FILE] [--page-id N] [--rebuild]\n\
         \n\
           SRC_PDF        defaults to ~/Nextcloud/Tabletop/Campaigns/publishing/{SRD_FILE_NAME}, then ./{SRD_FILE_NAME}\n\
           --data DIR     output directory (default: $SRD_DATA_DIR, then ./data)\n\
           --layout FILE  read a layout JSON dump instead of the PDF\n\
           --page-id N    decode a single page (debugging; the chunk cache is not written)\n\
           --rebuild      ignore chunks.json and decode again\n\
         Notes: RUST_LOG controls verbosity (default: info)"
    );
}

#[derive(Debug, Default)]
struct Args {
    src: Option<PathBuf>,
    data: Option<PathBuf>,
    layout: Option<PathBuf>,
    page_id: Option<u32>,
    rebuild: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut out = Args::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--data" => { if i+1<args.len() { out.data = Some(PathBuf::from(&args[i+1])); i+=2; } else { return Err("--data requires dir".into()); } }
            "--layout" => { if i+1<args.len() { out.layout = Some(PathBuf::from(&args[i+1])); i+=2; } else { return Err("--layout requires path".into()); } }
            "--page-id" => {
                if i+1<args.len() {
                    out.page_id = Some(args[i+1].parse().map_err(|e| format!("--page-id: {e}"))?);
                    i+=2;
                } else { return Err("--page-id requires number".into()); }
            }
            "--rebuild" => { out.rebuild = true; i+=1; }
            flag if flag.starts_with('-') => return Err(format!("unknown option {flag}")),
            positional => {
                if out.src.is_some() { return Err(format!("unexpected argument {positional}")); }
                out.src = Some(PathBuf::from(positional));
                i+=1;
            }
        }
    }
    Ok(out)
}

/// Explicit path, else the publishing folder under the home directory, else the working directory.
fn resolve_src(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(p) = explicit { return p; }
    let published = dirs::home_dir()
        .map(|home| home.join("Nextcloud").join("Tabletop").join("Campaigns").join("publishing").join(SRD_FILE_NAME));
    match published {
        Some(p) if p.is_file() => p,
        _ => PathBuf::from(SRD_FILE_NAME),
    }
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| env::var_os("SRD_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn decode(args: &Args, cache_path: &Path) -> Result<Vec<DocChunk>, String> {
    let (path, backend) = match &args.layout {
        Some(layout) => (layout.clone(), LayoutBackend::Json),
        None => (resolve_src(args.src.clone()), default_backend()),
    };
    if !path.is_file() {
        return Err(format!("\"{}\" does not exist", path.display()));
    }
    log::info!("* decoding \"{}\"", path.display());
    let source = open_source(&path, backend).map_err(|e| e.to_string())?;
    let params = ChunkingParams { page_id: args.page_id, ..ChunkingParams::default() };
    let chunks = generate_chunks(source.as_ref(), &params).map_err(|e| e.to_string())?;
    if args.page_id.is_none() {
        save_chunks(cache_path, &chunks).map_err(|e| e.to_string())?;
    }
    Ok(chunks)
}

fn run(args: Args) -> Result<(), String> {
    let data_dir = resolve_data_dir(args.data.clone());
    let cache_path = data_dir.join(CHUNKING_DEFAULTS.chunks_file_name);

    let cached = if args.rebuild || args.page_id.is_some() {
        None
    } else {
        load_chunks(&cache_path).map_err(|e| e.to_string())?
    };
    let chunks = match cached {
        Some(chunks) => chunks,
        None => decode(&args, &cache_path)?,
    };
    log::info!("{} chunk(s)", chunks.len());

    let creatures = extract_creatures(&chunks, &ParserConfig::default()).map_err(|e| e.to_string())?;
    write_outputs(&data_dir, &creatures).map_err(|e| e.to_string())?;
    println!("{} creature(s) written to {}", creatures.len(), data_dir.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") { print_usage(); return; }
    let res = parse_args(&args).and_then(run);
    if let Err(err) = res {
        eprintln!("Error: {}", err);
        print_usage();
        std::process::exit(1);
    }
}
