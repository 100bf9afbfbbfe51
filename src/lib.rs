mod block;
mod config;
mod error;
mod highlight;
mod inline;
mod parser;
mod typst;
mod writer;

pub use block::{Block, Document, Span, Token, TokenClass};
pub use config::{CalloutConfig, CodeConfig, Config, PageConfig, ThemeConfig};
pub use error::Error;
pub use highlight::tokenize;
pub use inline::format_inline;
pub use writer::to_markup;

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_pdf::PdfOptions;

/// Parse lesson markup into a vector of blocks.
pub fn parse(markup: &str) -> Document {
    parser::parse(markup)
}

/// Serialize the parsed tree as pretty-printed JSON.
pub fn markup_to_json(markup: &str) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&parse(markup))?)
}

/// Convert lesson markup to Typst markup using default config.
pub fn markup_to_typst(markup: &str) -> String {
    markup_to_typst_with_config(markup, &Config::compiled_default())
}

/// Convert lesson markup to Typst markup with custom config.
pub fn markup_to_typst_with_config(markup: &str, config: &Config) -> String {
    let blocks = parse(markup);
    typst::blocks_to_typst(&blocks, config)
}

/// Convert lesson markup to PDF bytes using default config.
pub fn markup_to_pdf(markup: &str) -> Result<Vec<u8>, Error> {
    markup_to_pdf_with_config(markup, &Config::compiled_default())
}

/// Convert lesson markup to PDF bytes with custom config.
pub fn markup_to_pdf_with_config(markup: &str, config: &Config) -> Result<Vec<u8>, Error> {
    use typst_library::layout::PagedDocument;

    let typst_content = markup_to_typst_with_config(markup, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;
    log::info!("compiled {} pages", doc.pages.len());

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Pdf(format!("{:?}", e)))
}
