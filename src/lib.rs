#![deny(unused_must_use)]
#![warn(clippy::pedantic)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

#[cfg(feature = "codegen")]
pub mod codegen;
#[cfg(feature = "emission")]
pub mod emission;
#[cfg(feature = "lexer")]
pub mod lexer;
#[cfg(feature = "semantic_analysis")]
pub mod semantic_analysis;
#[cfg(feature = "translator")]
pub mod translator;

/// Scans and translates `source` in one go.
#[cfg(feature = "translator")]
pub fn compile(source: &str) -> Result<codegen::Listing, translator::TranslateError> {
    let stream = lexer::lex(source);
    translator::translate(&stream).map(|translation| translation.listing)
}
