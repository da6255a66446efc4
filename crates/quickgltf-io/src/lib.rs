//! quickgltf IO library
//!
//! Parses glTF 2.0 JSON documents and GLB containers into a
//! [`quickgltf_core::Document`].
//!
//! ```no_run
//! use quickgltf_core::Options;
//! use quickgltf_io::Parser;
//!
//! let document = Parser::new()
//!     .load_from_path("scene.gltf", Options::LOAD_EXTERNAL_FILE_BUFFERS)
//!     .unwrap();
//! println!("{} meshes", document.meshes.len());
//! ```

pub mod data_buffer;
pub mod entities;
pub mod extensions;
pub mod glb;
pub mod json;
pub mod loader;
pub mod parser;
pub mod uri;

pub use data_buffer::GltfDataBuffer;
pub use parser::{Gltf, Parser};
pub use uri::decode_uri;
