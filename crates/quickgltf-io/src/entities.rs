//! Per-element parsers for the top-level glTF arrays.
//!
//! Each function turns one JSON array element into its typed entity. The
//! caller supplies `ctx`, the element's path in the document (`"meshes[2]"`),
//! which prefixes every error and log message.

use std::collections::HashMap;
use std::path::Path;

use quickgltf_core::{
    Accessor, AccessorType, AssetInfo, Buffer, BufferTarget, BufferView, ComponentType,
    DataSource, GltfError, Image, Mesh, MimeType, Node, NodeTransform, Options, Primitive,
    PrimitiveType, Result, Scene, Texture, Trs,
};
use serde_json::Value;

use crate::extensions;
use crate::json::{self, Object};
use crate::uri;

/// State shared by all element parsers of one document.
#[derive(Debug, Clone, Copy)]
pub struct EntityContext<'a> {
    pub directory: &'a Path,
    pub options: Options,
}

impl EntityContext<'_> {
    fn portable(&self) -> bool {
        self.options.contains(Options::FORCE_PORTABLE_DECODING)
    }
}

pub fn parse_buffer(
    value: &Value,
    index: usize,
    embedded: &mut Option<DataSource>,
    cx: &EntityContext<'_>,
    ctx: &str,
) -> Result<Buffer> {
    let object = json::as_object(value, ctx)?;
    let byte_length = json::required_usize(object, "byteLength", ctx)?;

    let data = match json::optional_str(object, "uri", ctx)? {
        Some(uri) => uri::decode_uri(uri, cx.directory, cx.portable())?,
        // Only the first buffer may refer to the container's binary chunk.
        None if index == 0 => embedded.take().ok_or_else(|| {
            GltfError::invalid(format!("{}: no `uri` and no binary chunk to use", ctx))
        })?,
        None => return Err(GltfError::invalid(format!("{}: missing required field `uri`", ctx))),
    };

    Ok(Buffer { byte_length, data, name: json::optional_string(object, "name", ctx)? })
}

pub fn parse_buffer_view(value: &Value, ctx: &str) -> Result<BufferView> {
    let object = json::as_object(value, ctx)?;

    let target = match json::optional_u64(object, "target", ctx)? {
        None => None,
        Some(code) => {
            let target = BufferTarget::from_code(code);
            if target.is_none() {
                log::warn!("{}: ignoring unknown target {}", ctx, code);
            }
            target
        }
    };

    Ok(BufferView {
        buffer_index: json::required_usize(object, "buffer", ctx)?,
        byte_offset: json::optional_usize(object, "byteOffset", ctx)?.unwrap_or(0),
        byte_length: json::required_usize(object, "byteLength", ctx)?,
        byte_stride: json::optional_usize(object, "byteStride", ctx)?,
        target,
        name: json::optional_string(object, "name", ctx)?,
    })
}

pub fn parse_accessor(value: &Value, cx: &EntityContext<'_>, ctx: &str) -> Result<Accessor> {
    let object = json::as_object(value, ctx)?;

    let code = json::required_u64(object, "componentType", ctx)?;
    let component_type = ComponentType::from_code(code);
    if component_type == ComponentType::Double
        && !cx.options.contains(Options::ALLOW_DOUBLE_PRECISION_ACCESSORS)
    {
        return Err(GltfError::restricted(format!(
            "{}: double precision components are not enabled",
            ctx
        )));
    }
    if component_type == ComponentType::Invalid {
        log::warn!("{}: unknown componentType {}", ctx, code);
    }

    let tag = json::required_str(object, "type", ctx)?;
    let accessor_type = AccessorType::from_tag(tag);
    if accessor_type == AccessorType::Invalid {
        log::warn!("{}: unknown type {:?}", ctx, tag);
    }

    Ok(Accessor {
        component_type,
        accessor_type,
        count: json::required_usize(object, "count", ctx)?,
        buffer_view_index: json::optional_usize(object, "bufferView", ctx)?,
        byte_offset: json::optional_usize(object, "byteOffset", ctx)?.unwrap_or(0),
        normalized: json::optional_bool(object, "normalized", ctx)?.unwrap_or(false),
        name: json::optional_string(object, "name", ctx)?,
    })
}

pub fn parse_image(value: &Value, cx: &EntityContext<'_>, ctx: &str) -> Result<Image> {
    let object = json::as_object(value, ctx)?;
    let mime_type = json::optional_str(object, "mimeType", ctx)?;

    let data = match (object.contains_key("uri"), object.contains_key("bufferView")) {
        (true, true) => {
            return Err(GltfError::invalid(format!(
                "{}: `uri` and `bufferView` are mutually exclusive",
                ctx
            )))
        }
        (true, false) => {
            let uri = json::required_str(object, "uri", ctx)?;
            let source = uri::decode_uri(uri, cx.directory, cx.portable())?;
            match mime_type {
                Some(mime) => with_mime_type(source, MimeType::from_mime_str(mime)),
                None => source,
            }
        }
        (false, true) => {
            let buffer_view = json::required_usize(object, "bufferView", ctx)?;
            let mime = mime_type.ok_or_else(|| {
                GltfError::invalid(format!("{}: `bufferView` requires `mimeType`", ctx))
            })?;
            DataSource::BufferView { buffer_view, mime_type: MimeType::from_mime_str(mime) }
        }
        (false, false) => {
            return Err(GltfError::invalid(format!(
                "{}: needs either `uri` or `bufferView`",
                ctx
            )))
        }
    };

    Ok(Image { data, name: json::optional_string(object, "name", ctx)? })
}

fn with_mime_type(source: DataSource, mime_type: MimeType) -> DataSource {
    match source {
        DataSource::Vector { bytes, .. } => DataSource::Vector { bytes, mime_type },
        DataSource::FilePath { path, byte_range, .. } => {
            DataSource::FilePath { path, byte_range, mime_type }
        }
        DataSource::BufferView { buffer_view, .. } => {
            DataSource::BufferView { buffer_view, mime_type }
        }
        chunk @ DataSource::ContainerChunk { .. } => chunk,
    }
}

pub fn parse_texture(value: &Value, cx: &EntityContext<'_>, ctx: &str) -> Result<Texture> {
    let object = json::as_object(value, ctx)?;
    let source = json::optional_usize(object, "source", ctx)?;

    let (image_index, fallback_image_index) = match json::optional_object(object, "extensions", ctx)? {
        None => {
            let source = source.ok_or_else(|| {
                GltfError::invalid(format!("{}: missing required field `source`", ctx))
            })?;
            (Some(source), None)
        }
        Some(ext) => match extensions::texture_source_from_extensions(ext, cx.options, ctx)? {
            Some(index) => (Some(index), source),
            None => (source, None),
        },
    };

    Ok(Texture {
        image_index,
        fallback_image_index,
        sampler_index: json::optional_usize(object, "sampler", ctx)?,
        name: json::optional_string(object, "name", ctx)?,
    })
}

pub fn parse_mesh(value: &Value, ctx: &str) -> Result<Mesh> {
    let object = json::as_object(value, ctx)?;

    let primitives = json::array_elements(object, "primitives", ctx)?
        .enumerate()
        .map(|(i, primitive)| parse_primitive(primitive, &format!("{}.primitives[{}]", ctx, i)))
        .collect::<Result<Vec<_>>>()?;

    Ok(Mesh { primitives, name: json::optional_string(object, "name", ctx)? })
}

fn parse_primitive(value: &Value, ctx: &str) -> Result<Primitive> {
    let object = json::as_object(value, ctx)?;

    let attributes = json::required_object(object, "attributes", ctx)?
        .iter()
        .map(|(semantic, accessor)| {
            let key = format!("attributes.{}", semantic);
            let index = accessor.as_u64().ok_or_else(|| {
                GltfError::invalid(format!("{}: `{}` must be an unsigned integer", ctx, key))
            })?;
            Ok((semantic.clone(), json::to_usize(index, ctx, &key)?))
        })
        .collect::<Result<HashMap<_, _>>>()?;

    let primitive_type = match json::optional_u64(object, "mode", ctx)? {
        None => PrimitiveType::default(),
        Some(mode) => PrimitiveType::from_mode(mode).ok_or_else(|| {
            GltfError::invalid(format!("{}: `mode` {} is not a primitive topology", ctx, mode))
        })?,
    };

    Ok(Primitive {
        attributes,
        primitive_type,
        indices_accessor: json::optional_usize(object, "indices", ctx)?,
        material_index: json::optional_usize(object, "material", ctx)?,
    })
}

pub fn parse_node(value: &Value, ctx: &str) -> Result<Node> {
    let object = json::as_object(value, ctx)?;

    let has_trs = ["translation", "rotation", "scale"]
        .iter()
        .any(|key| object.contains_key(*key));

    let transform = match read_numbers::<16>(object, "matrix", ctx) {
        Some(matrix) => {
            if has_trs {
                log::debug!("{}: both `matrix` and TRS given, keeping the matrix", ctx);
            }
            NodeTransform::Matrix(matrix)
        }
        None => {
            let identity = Trs::default();
            NodeTransform::Trs(Trs {
                translation: read_numbers(object, "translation", ctx)
                    .unwrap_or(identity.translation),
                rotation: read_numbers(object, "rotation", ctx).unwrap_or(identity.rotation),
                scale: read_numbers(object, "scale", ctx).unwrap_or(identity.scale),
            })
        }
    };

    Ok(Node {
        mesh_index: json::optional_usize(object, "mesh", ctx)?,
        children: json::index_array(object, "children", ctx)?,
        transform,
        name: json::optional_string(object, "name", ctx)?,
    })
}

/// Reads a fixed-length number array. Anything malformed is discarded.
fn read_numbers<const N: usize>(object: &Object, key: &str, ctx: &str) -> Option<[f32; N]> {
    let value = object.get(key)?;
    let parsed = value.as_array().filter(|a| a.len() == N).and_then(|array| {
        let mut out = [0.0f32; N];
        for (slot, element) in out.iter_mut().zip(array) {
            *slot = element.as_f64()? as f32;
        }
        Some(out)
    });
    if parsed.is_none() {
        log::warn!("{}: discarding `{}`, expected {} numbers", ctx, key, N);
    }
    parsed
}

pub fn parse_scene(value: &Value, ctx: &str) -> Result<Scene> {
    let object = json::as_object(value, ctx)?;
    Ok(Scene {
        node_indices: json::index_array(object, "nodes", ctx)?,
        name: json::optional_string(object, "name", ctx)?,
    })
}

/// Reads the `asset` block; strings of the wrong type are treated as absent.
pub fn parse_asset(root: &Object) -> Option<AssetInfo> {
    let asset = root.get("asset")?.as_object()?;
    let text = |key: &str| asset.get(key).and_then(Value::as_str).map(str::to_owned);
    Some(AssetInfo {
        version: text("version").unwrap_or_default(),
        min_version: text("minVersion"),
        generator: text("generator"),
        copyright: text("copyright"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickgltf_core::ErrorCode;
    use serde_json::json;

    fn cx(options: Options) -> EntityContext<'static> {
        EntityContext { directory: Path::new("."), options }
    }

    #[test]
    fn test_buffer_view_defaults() {
        let view = parse_buffer_view(&json!({"buffer": 0, "byteLength": 12}), "v").unwrap();
        assert_eq!(view.byte_offset, 0);
        assert_eq!(view.byte_stride, None);
        assert_eq!(view.target, None);

        let view = parse_buffer_view(
            &json!({"buffer": 1, "byteLength": 4, "byteOffset": 8, "target": 34963}),
            "v",
        )
        .unwrap();
        assert_eq!(view.byte_offset, 8);
        assert_eq!(view.target, Some(BufferTarget::ElementArrayBuffer));

        assert!(parse_buffer_view(&json!({"byteLength": 4}), "v").is_err());
    }

    #[test]
    fn test_unknown_target_dropped() {
        let view =
            parse_buffer_view(&json!({"buffer": 0, "byteLength": 4, "target": 1}), "v").unwrap();
        assert_eq!(view.target, None);
    }

    #[test]
    fn test_buffer_takes_embedded_chunk() {
        let mut embedded = Some(DataSource::ContainerChunk { byte_offset: 28, byte_length: 8 });
        let buffer =
            parse_buffer(&json!({"byteLength": 8}), 0, &mut embedded, &cx(Options::empty()), "b")
                .unwrap();
        assert_eq!(buffer.data, DataSource::ContainerChunk { byte_offset: 28, byte_length: 8 });
        assert!(embedded.is_none());

        let err = parse_buffer(&json!({"byteLength": 8}), 1, &mut None, &cx(Options::empty()), "b")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidGltf);
    }

    #[test]
    fn test_double_accessor_gate() {
        let value = json!({"componentType": 5130, "type": "SCALAR", "count": 1});
        let err = parse_accessor(&value, &cx(Options::empty()), "a").unwrap_err();
        assert_eq!(err.code(), ErrorCode::RestrictedValue);

        let accessor =
            parse_accessor(&value, &cx(Options::ALLOW_DOUBLE_PRECISION_ACCESSORS), "a").unwrap();
        assert_eq!(accessor.component_type, ComponentType::Double);
    }

    #[test]
    fn test_accessor_lenient_enums() {
        let value = json!({"componentType": 1, "type": "VEC5", "count": 2});
        let accessor = parse_accessor(&value, &cx(Options::empty()), "a").unwrap();
        assert_eq!(accessor.component_type, ComponentType::Invalid);
        assert_eq!(accessor.accessor_type, AccessorType::Invalid);
        assert!(!accessor.normalized);
    }

    #[test]
    fn test_image_sources() {
        let cx = cx(Options::empty());
        let both = json!({"uri": "a.png", "bufferView": 0, "mimeType": "image/png"});
        assert!(parse_image(&both, &cx, "i").is_err());
        assert!(parse_image(&json!({"name": "nothing"}), &cx, "i").is_err());
        assert!(parse_image(&json!({"bufferView": 0}), &cx, "i").is_err());

        let image = parse_image(&json!({"bufferView": 2, "mimeType": "image/ktx2"}), &cx, "i")
            .unwrap();
        assert_eq!(image.data, DataSource::BufferView { buffer_view: 2, mime_type: MimeType::Ktx2 });

        let image =
            parse_image(&json!({"uri": "tex.bin", "mimeType": "image/jpeg"}), &cx, "i").unwrap();
        assert_eq!(image.data.mime_type(), MimeType::Jpeg);
    }

    #[test]
    fn test_texture_fallback_ordering() {
        let basisu = cx(Options::ENABLE_BASIS_UNIVERSAL_TEXTURE_EXTENSION);
        let value = json!({"source": 0, "extensions": {"KHR_texture_basisu": {"source": 1}}});

        let texture = parse_texture(&value, &basisu, "t").unwrap();
        assert_eq!(texture.image_index, Some(1));
        assert_eq!(texture.fallback_image_index, Some(0));

        let texture = parse_texture(&value, &cx(Options::empty()), "t").unwrap();
        assert_eq!(texture.image_index, Some(0));
        assert_eq!(texture.fallback_image_index, None);
    }

    #[test]
    fn test_texture_missing_source() {
        let plain = cx(Options::empty());
        assert!(parse_texture(&json!({"sampler": 0}), &plain, "t").is_err());

        let texture = parse_texture(&json!({"extensions": {}}), &plain, "t").unwrap();
        assert_eq!(texture.image_index, None);
    }

    #[test]
    fn test_primitive_defaults_and_mode() {
        let mesh = parse_mesh(
            &json!({"primitives": [{"attributes": {"POSITION": 0, "_CUSTOM": 3}}]}),
            "m",
        )
        .unwrap();
        let primitive = &mesh.primitives[0];
        assert_eq!(primitive.primitive_type, PrimitiveType::Triangles);
        assert_eq!(primitive.attributes["_CUSTOM"], 3);

        assert!(parse_mesh(&json!({"primitives": [{}]}), "m").is_err());
        assert!(parse_mesh(&json!({"primitives": [{"attributes": {}, "mode": 9}]}), "m").is_err());
        assert!(parse_mesh(&json!({}), "m").unwrap().primitives.is_empty());
    }

    #[test]
    fn test_node_transforms() {
        let node = parse_node(&json!({}), "n").unwrap();
        assert!(node.transform.is_identity());

        let node = parse_node(&json!({"translation": [1, 2, 3], "scale": [2, 2]}), "n").unwrap();
        match node.transform {
            NodeTransform::Trs(trs) => {
                assert_eq!(trs.translation, [1.0, 2.0, 3.0]);
                assert_eq!(trs.scale, [1.0, 1.0, 1.0]);
            }
            other => panic!("expected TRS, got {:?}", other),
        }

        let mut matrix = vec![0.0; 16];
        matrix[0] = 2.0;
        let node =
            parse_node(&json!({"matrix": matrix, "translation": [5, 5, 5]}), "n").unwrap();
        assert!(matches!(node.transform, NodeTransform::Matrix(m) if m[0] == 2.0));

        let node = parse_node(&json!({"matrix": [1, 0, 0]}), "n").unwrap();
        assert!(node.transform.is_identity());
    }

    #[test]
    fn test_asset_block() {
        let root = json!({"asset": {"version": "2.0", "generator": "hand"}});
        let asset = parse_asset(root.as_object().unwrap()).unwrap();
        assert_eq!(asset.version, "2.0");
        assert_eq!(asset.generator.as_deref(), Some("hand"));
        assert_eq!(asset.copyright, None);
    }
}
