//! Wire formats - xBRL-JSON and XBRL XML parsing, emission and entrypoint
//! inference.

mod document_codec;
mod entrypoint;
mod json_reader;
mod wire_model;
mod xml_reader;
mod xml_tree;


pub use document_codec::{DocumentCodec, FileFormat};
pub use entrypoint::infer_entrypoint;
