//! Reading path data and simulation parameters, writing vertex files.

mod input2d;
mod path_file;
mod tokenizer;
mod vertex;

pub use input2d::SimParams;
pub use path_file::read_path_data;
pub use tokenizer::{tokenize, Command, PathOp, Token, Tokenized};
pub use vertex::{vertex_file_name, write_vertices, VERTEX_EXTENSION};
