//! gltf-info - inspect glTF and GLB files
//!
//! Parses a file with the requested options and prints what it contains.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as _;
use quickgltf_core::{error_message, Document, GltfError, Options, SceneWalker};
use quickgltf_io::Parser;
use thiserror::Error;

/// Failures of the tool itself, kept apart from parse failures.
#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Gltf(#[from] GltfError),

    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(clap::Parser, Debug)]
#[command(name = "gltf-info")]
#[command(about = "Parse a glTF/GLB file and summarize its contents")]
#[command(version)]
struct Cli {
    /// Input .gltf or .glb file
    path: PathBuf,

    /// Accept accessors with double precision components
    #[arg(long)]
    allow_double: bool,

    /// Read external buffer files into memory
    #[arg(long)]
    load_buffers: bool,

    /// Read external image files into memory
    #[arg(long)]
    load_images: bool,

    /// Copy the GLB binary chunk into memory
    #[arg(long)]
    load_embedded: bool,

    /// Enable KHR_texture_basisu
    #[arg(long)]
    basisu: bool,

    /// Enable MSFT_texture_dds
    #[arg(long)]
    dds: bool,

    /// Use the portable base64 decoder
    #[arg(long)]
    portable: bool,

    /// Do not require an `asset` object with a `version`
    #[arg(long)]
    skip_asset_check: bool,

    /// Range-check every index after parsing
    #[arg(long)]
    validate: bool,

    /// Print the world-space origin of every node in every scene
    #[arg(long)]
    walk_scenes: bool,

    /// Print the whole document as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ALLOW_DOUBLE_PRECISION_ACCESSORS, self.allow_double);
        options.set(Options::LOAD_EXTERNAL_FILE_BUFFERS, self.load_buffers);
        options.set(Options::LOAD_EXTERNAL_FILE_IMAGES, self.load_images);
        options.set(Options::LOAD_CONTAINER_EMBEDDED_BUFFERS, self.load_embedded);
        options.set(Options::ENABLE_BASIS_UNIVERSAL_TEXTURE_EXTENSION, self.basisu);
        options.set(Options::ENABLE_DDS_TEXTURE_EXTENSION, self.dds);
        options.set(Options::FORCE_PORTABLE_DECODING, self.portable);
        options.set(Options::SKIP_ASSET_FIELD_VALIDATION, self.skip_asset_check);
        options
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::debug!("{:?}", err);
            eprintln!("error: {}", err);
            if let CliError::Gltf(err) = &err {
                eprintln!("{}: {}", err.code(), error_message(err.code()));
            }
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let options = cli.options();
    log::info!("parsing {} with {:?}", cli.path.display(), options);

    let document = Parser::new().load_from_path(&cli.path, options)?;
    if cli.validate {
        document.validate_indices()?;
    }

    let mut out = if cli.json {
        serde_json::to_string_pretty(&document).map_err(CliError::Serialize)? + "\n"
    } else {
        summarize(&document)
    };
    if cli.walk_scenes {
        out.push_str(&walk_scenes(&document)?);
    }
    Ok(out)
}

fn summarize(document: &Document) -> String {
    let mut out = String::new();

    if let Some(asset) = &document.asset {
        let _ = writeln!(out, "glTF {}", asset.version);
        if let Some(generator) = &asset.generator {
            let _ = writeln!(out, "  generator: {}", generator);
        }
    }
    if !document.extensions_used.is_empty() {
        let _ = writeln!(out, "extensions used: {}", document.extensions_used.join(", "));
    }
    if !document.extensions_required.is_empty() {
        let _ = writeln!(
            out,
            "extensions required: {}",
            document.extensions_required.join(", ")
        );
    }

    let _ = writeln!(out, "buffers: {}", document.buffers.len());
    for (i, buffer) in document.buffers.iter().enumerate() {
        let loaded = if buffer.data.bytes().is_some() { "loaded" } else { "not loaded" };
        let _ = writeln!(out, "  [{}] {} bytes, {}", i, buffer.byte_length, loaded);
    }
    let _ = writeln!(out, "buffer views: {}", document.buffer_views.len());
    let _ = writeln!(out, "accessors: {}", document.accessors.len());
    for (i, accessor) in document.accessors.iter().enumerate() {
        let _ = writeln!(
            out,
            "  [{}] {:?} x {:?}, count {}",
            i, accessor.accessor_type, accessor.component_type, accessor.count
        );
    }
    let _ = writeln!(out, "images: {}", document.images.len());
    for (i, image) in document.images.iter().enumerate() {
        let mime = image.data.mime_type().as_str().unwrap_or("unknown");
        let _ = writeln!(out, "  [{}] {}", i, mime);
    }
    let _ = writeln!(out, "textures: {}", document.textures.len());
    let _ = writeln!(out, "meshes: {}", document.meshes.len());
    for (i, mesh) in document.meshes.iter().enumerate() {
        let name = mesh.name.as_deref().unwrap_or("");
        let _ = writeln!(out, "  [{}] {} ({} primitives)", i, name, mesh.primitives.len());
    }
    let _ = writeln!(out, "nodes: {}", document.nodes.len());
    let _ = writeln!(out, "scenes: {}", document.scenes.len());
    if let Some(scene) = document.default_scene_index() {
        let _ = writeln!(out, "default scene: {}", scene);
    }

    out
}

fn walk_scenes(document: &Document) -> Result<String, GltfError> {
    let mut out = String::new();
    for scene_index in 0..document.scenes.len() {
        let _ = writeln!(out, "scene {}:", scene_index);
        for visited in SceneWalker::new(document, scene_index)? {
            let visited = visited?;
            let m = visited.world_matrix;
            let _ = writeln!(
                out,
                "  node {} at ({}, {}, {})",
                visited.node_index, m[12], m[13], m[14]
            );
        }
    }
    Ok(out)
}
