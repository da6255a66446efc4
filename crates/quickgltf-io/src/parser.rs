//! Top-level glTF/GLB parser.
//!
//! Parsing happens in two steps. [`Parser::load_gltf`] and
//! [`Parser::load_binary_gltf`] check the directory, tokenize the JSON and
//! validate the `asset` block, producing a [`Gltf`]. [`Gltf::parse`] then
//! consumes it and builds the [`Document`].

use std::path::{Path, PathBuf};

use quickgltf_core::{
    Accessor, Buffer, BufferView, DataSource, Document, GltfError, Image, Mesh, MimeType, Node,
    Options, Result, Scene, Texture,
};
use serde_json::Value;

use crate::data_buffer::GltfDataBuffer;
use crate::entities::{self, EntityContext};
use crate::glb::{self, BinChunk};
use crate::json::{self, Object};
use crate::loader;

/// Entry point for parsing. Holds no state, so one parser can be reused for
/// any number of documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Validates a `.gltf` JSON document.
    ///
    /// `directory` is where relative URIs are resolved and must exist.
    pub fn load_gltf(
        &self,
        data: &GltfDataBuffer,
        directory: &Path,
        options: Options,
    ) -> Result<Gltf> {
        check_directory(directory)?;
        let root: Value = serde_json::from_slice(data.bytes())?;
        Gltf::new(root, directory, options, None)
    }

    /// Validates a `.glb` container and the JSON document inside it.
    pub fn load_binary_gltf(
        &self,
        data: &GltfDataBuffer,
        directory: &Path,
        options: Options,
    ) -> Result<Gltf> {
        check_directory(directory)?;
        let chunks = glb::split_chunks(data.bytes())?;
        let root: Value = serde_json::from_slice(chunks.json)?;
        let embedded = chunks.bin.map(|bin| embedded_buffer(data, bin, options));
        Gltf::new(root, directory, options, embedded)
    }

    /// Reads and fully parses a `.gltf` or `.glb` file.
    ///
    /// The container format is detected from the file's magic bytes, and
    /// relative URIs resolve against the file's directory.
    pub fn load_from_path(&self, path: impl AsRef<Path>, options: Options) -> Result<Document> {
        let path = path.as_ref();
        let data = GltfDataBuffer::from_path(path)?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let gltf = if data.is_binary() {
            self.load_binary_gltf(&data, directory, options)?
        } else {
            self.load_gltf(&data, directory, options)?
        };
        gltf.parse()
    }
}

fn check_directory(directory: &Path) -> Result<()> {
    if directory.is_dir() {
        Ok(())
    } else {
        Err(GltfError::InvalidPath(directory.to_path_buf()))
    }
}

fn embedded_buffer(data: &GltfDataBuffer, bin: BinChunk, options: Options) -> DataSource {
    let end = bin.offset + bin.length;
    if options.contains(Options::LOAD_CONTAINER_EMBEDDED_BUFFERS) {
        return DataSource::Vector {
            bytes: data.bytes()[bin.offset..end].to_vec(),
            mime_type: MimeType::GltfBuffer,
        };
    }
    match data.path() {
        Some(path) => DataSource::FilePath {
            path: path.to_path_buf(),
            byte_range: Some(bin.offset as u64..end as u64),
            mime_type: MimeType::GltfBuffer,
        },
        None => DataSource::ContainerChunk { byte_offset: bin.offset, byte_length: bin.length },
    }
}

/// A tokenized document whose `asset` block passed validation.
#[derive(Debug)]
pub struct Gltf {
    root: Object,
    directory: PathBuf,
    options: Options,
    embedded_buffer: Option<DataSource>,
}

impl Gltf {
    fn new(
        root: Value,
        directory: &Path,
        options: Options,
        embedded_buffer: Option<DataSource>,
    ) -> Result<Self> {
        let Value::Object(root) = root else {
            return Err(GltfError::invalid("root: the document must be a JSON object"));
        };

        if !options.contains(Options::SKIP_ASSET_FIELD_VALIDATION) {
            check_asset(&root)?;
        }

        Ok(Gltf { root, directory: directory.to_path_buf(), options, embedded_buffer })
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Parses every supported category and loads the external files the
    /// options ask for. The first error discards the whole document.
    pub fn parse(mut self) -> Result<Document> {
        let embedded = self.embedded_buffer.take();

        let mut document = Document {
            asset: entities::parse_asset(&self.root),
            extensions_used: json::string_array(&self.root, "extensionsUsed", "root")?,
            extensions_required: json::string_array(&self.root, "extensionsRequired", "root")?,
            buffers: self.parse_buffers(embedded)?,
            buffer_views: self.parse_buffer_views()?,
            accessors: self.parse_accessors()?,
            images: self.parse_images()?,
            textures: self.parse_textures()?,
            meshes: self.parse_meshes()?,
            nodes: self.parse_nodes()?,
            scenes: self.parse_scenes()?,
            default_scene: json::optional_usize(&self.root, "scene", "root")?,
        };

        loader::load_external_files(&mut document, self.options)?;
        Ok(document)
    }

    fn context(&self) -> EntityContext<'_> {
        EntityContext { directory: &self.directory, options: self.options }
    }

    fn parse_array<T>(
        &self,
        name: &str,
        mut parse: impl FnMut(usize, &Value, &str) -> Result<T>,
    ) -> Result<Vec<T>> {
        let parsed = json::array_elements(&self.root, name, "root")?
            .enumerate()
            .map(|(i, value)| parse(i, value, &format!("{}[{}]", name, i)))
            .collect::<Result<Vec<T>>>()?;
        log::debug!("parsed {} {}", parsed.len(), name);
        Ok(parsed)
    }

    fn parse_buffers(&self, mut embedded: Option<DataSource>) -> Result<Vec<Buffer>> {
        let cx = self.context();
        let buffers = self.parse_array("buffers", |i, value, ctx| {
            entities::parse_buffer(value, i, &mut embedded, &cx, ctx)
        })?;
        if embedded.is_some() {
            log::warn!("binary chunk present but no buffer refers to it");
        }
        Ok(buffers)
    }

    fn parse_buffer_views(&self) -> Result<Vec<BufferView>> {
        self.parse_array("bufferViews", |_, value, ctx| entities::parse_buffer_view(value, ctx))
    }

    fn parse_accessors(&self) -> Result<Vec<Accessor>> {
        let cx = self.context();
        self.parse_array("accessors", |_, value, ctx| entities::parse_accessor(value, &cx, ctx))
    }

    fn parse_images(&self) -> Result<Vec<Image>> {
        let cx = self.context();
        self.parse_array("images", |_, value, ctx| entities::parse_image(value, &cx, ctx))
    }

    fn parse_textures(&self) -> Result<Vec<Texture>> {
        let cx = self.context();
        self.parse_array("textures", |_, value, ctx| entities::parse_texture(value, &cx, ctx))
    }

    fn parse_meshes(&self) -> Result<Vec<Mesh>> {
        self.parse_array("meshes", |_, value, ctx| entities::parse_mesh(value, ctx))
    }

    fn parse_nodes(&self) -> Result<Vec<Node>> {
        self.parse_array("nodes", |_, value, ctx| entities::parse_node(value, ctx))
    }

    fn parse_scenes(&self) -> Result<Vec<Scene>> {
        self.parse_array("scenes", |_, value, ctx| entities::parse_scene(value, ctx))
    }
}

fn check_asset(root: &Object) -> Result<()> {
    let version = root
        .get("asset")
        .and_then(Value::as_object)
        .and_then(|asset| asset.get("version"))
        .and_then(Value::as_str);

    match version {
        Some(version) => {
            log::debug!("glTF asset version {}", version);
            Ok(())
        }
        None => Err(GltfError::InvalidOrMissingAssetField(
            "`asset` must be an object with a string `version`".to_string(),
        )),
    }
}
