//! Compiler for the Jack language, producing text for the nand2tetris stack
//! VM.
pub mod driver;
pub mod error;
pub mod parse_tree;
pub mod parser;
pub mod sym_table;
pub mod token_reader;
pub mod tokenizer;
pub mod tokens;
pub mod vm_compilation_engine;
pub mod vm_writer;
pub mod xml_compilation_engine;

use error::Result;
use parse_tree::Class;
use token_reader::TokenReader;
use tokenizer::Tokenizer;

/// Tokenizes and parses the single class in `text`.
pub fn parse_source(text: &str) -> Result<Class> {
    let tokens = Tokenizer::new().tokenize(text)?;
    parser::parse_class(&mut TokenReader::new(tokens))
}

/// Compiles the class in `text` to VM code.
pub fn compile_source(text: &str) -> Result<String> {
    let class = parse_source(text)?;
    vm_compilation_engine::compile(&class)
}
