//! End-to-end parsing of small hand-written documents.

use std::path::Path;

use base64::Engine as _;
use quickgltf_core::{
    AccessorType, ComponentType, DataSource, ErrorCode, MimeType, Options, PrimitiveType,
    SceneWalker,
};
use quickgltf_io::{GltfDataBuffer, Parser};

fn manifest_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

fn triangle_gltf() -> String {
    let mut bytes = Vec::new();
    for value in [1.0f32, 2.0, 3.0] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    let payload = base64::engine::general_purpose::STANDARD.encode(&bytes);

    format!(
        r#"{{
            "asset": {{"version": "2.0", "generator": "hand written"}},
            "buffers": [{{
                "byteLength": 12,
                "uri": "data:application/octet-stream;base64,{}"
            }}],
            "bufferViews": [{{"buffer": 0, "byteLength": 12, "target": 34962}}],
            "accessors": [{{
                "bufferView": 0,
                "componentType": 5126,
                "count": 1,
                "type": "VEC3"
            }}],
            "meshes": [{{"primitives": [{{"attributes": {{"POSITION": 0}}}}]}}],
            "nodes": [{{"mesh": 0, "translation": [0, 1, 0]}}],
            "scenes": [{{"nodes": [0]}}],
            "scene": 0
        }}"#,
        payload
    )
}

#[test]
fn test_parse_minimal_triangle() {
    let json = triangle_gltf();
    let data = GltfDataBuffer::from_slice(json.as_bytes());
    let document = Parser::new()
        .load_gltf(&data, manifest_dir(), Options::empty())
        .expect("valid document")
        .parse()
        .expect("parses");

    assert_eq!(document.asset.as_ref().unwrap().generator.as_deref(), Some("hand written"));

    assert_eq!(document.buffers.len(), 1);
    let buffer = &document.buffers[0];
    assert_eq!(buffer.byte_length, 12);
    assert_eq!(buffer.data.mime_type(), MimeType::OctetStream);
    let bytes = buffer.data.bytes().unwrap();
    assert_eq!(bytes.len(), 12);
    assert_eq!(f32::from_le_bytes(bytes[8..12].try_into().unwrap()), 3.0);

    let accessor = &document.accessors[0];
    assert_eq!(accessor.component_type, ComponentType::Float);
    assert_eq!(accessor.accessor_type, AccessorType::Vec3);
    assert_eq!(accessor.count, 1);
    assert_eq!(accessor.buffer_view_index, Some(0));
    assert_eq!(accessor.byte_offset, 0);

    let primitive = &document.meshes[0].primitives[0];
    assert_eq!(primitive.attributes.get("POSITION"), Some(&0));
    assert_eq!(primitive.primitive_type, PrimitiveType::Triangles);

    assert_eq!(document.nodes[0].mesh_index, Some(0));
    assert_eq!(document.scenes[0].node_indices, vec![0]);
    assert_eq!(document.default_scene_index(), Some(0));

    document.validate_indices().expect("all indices in range");

    let visited: Vec<_> = SceneWalker::new(&document, 0)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(visited.len(), 1);
    assert_eq!(visited[0].world_matrix[13], 1.0);
}

#[test]
fn test_load_from_path_resolves_relative_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.bin"), [4u8, 3, 2, 1]).unwrap();
    std::fs::write(dir.path().join("albedo.png"), b"\x89PNG").unwrap();
    let gltf_path = dir.path().join("scene.gltf");
    std::fs::write(
        &gltf_path,
        r#"{
            "asset": {"version": "2.0"},
            "buffers": [{"byteLength": 4, "uri": "data.bin"}],
            "images": [{"uri": "albedo.png"}]
        }"#,
    )
    .unwrap();

    let parser = Parser::new();

    let document = parser.load_from_path(&gltf_path, Options::empty()).unwrap();
    assert_eq!(
        document.buffers[0].data,
        DataSource::FilePath {
            path: dir.path().join("data.bin"),
            byte_range: None,
            mime_type: MimeType::OctetStream,
        }
    );

    let options = Options::LOAD_EXTERNAL_FILE_BUFFERS | Options::LOAD_EXTERNAL_FILE_IMAGES;
    let document = parser.load_from_path(&gltf_path, options).unwrap();
    assert_eq!(document.buffers[0].data.bytes(), Some(&[4u8, 3, 2, 1][..]));
    assert_eq!(document.images[0].data.bytes(), Some(&b"\x89PNG"[..]));
    assert_eq!(document.images[0].data.mime_type(), MimeType::Png);
}

#[test]
fn test_missing_external_file_fails_only_when_loading() {
    let dir = tempfile::tempdir().unwrap();
    let gltf_path = dir.path().join("scene.gltf");
    std::fs::write(
        &gltf_path,
        r#"{"asset": {"version": "2.0"}, "buffers": [{"byteLength": 4, "uri": "gone.bin"}]}"#,
    )
    .unwrap();

    let parser = Parser::new();
    assert!(parser.load_from_path(&gltf_path, Options::empty()).is_ok());

    let err = parser
        .load_from_path(&gltf_path, Options::LOAD_EXTERNAL_FILE_BUFFERS)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::FileLoadFailed);
}

#[test]
fn test_parser_is_reusable() {
    let parser = Parser::new();
    let json = triangle_gltf();
    let data = GltfDataBuffer::from_slice(json.as_bytes());
    for _ in 0..3 {
        let document = parser
            .load_gltf(&data, manifest_dir(), Options::FORCE_PORTABLE_DECODING)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(document.buffers[0].data.bytes().map(<[u8]>::len), Some(12));
    }
}

#[test]
fn test_error_classes() {
    let parser = Parser::new();
    let cases: [(&str, ErrorCode); 4] = [
        ("not json", ErrorCode::InvalidJson),
        (r#"{"buffers": []}"#, ErrorCode::InvalidOrMissingAssetField),
        (r#"{"asset": {"version": "2.0"}, "buffers": {}}"#, ErrorCode::InvalidGltf),
        (
            r#"{"asset": {"version": "2.0"}, "buffers": [{"byteLength": 1, "uri": "data:x;utf8,a"}]}"#,
            ErrorCode::RestrictedValue,
        ),
    ];

    for (json, expected) in cases {
        let data = GltfDataBuffer::from_slice(json.as_bytes());
        let err = parser
            .load_gltf(&data, manifest_dir(), Options::empty())
            .and_then(|gltf| gltf.parse())
            .unwrap_err();
        assert_eq!(err.code(), expected, "input: {}", json);
    }
}
