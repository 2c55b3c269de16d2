// PDF text extraction on real documents

use crate::common::PdfDir;
use pdfvec::core::indexer::{PdfExtractor, TextExtractor};

#[test]
fn test_single_page_text_extracted() {
    let fixture = PdfDir::with_pdf("one.pdf", &["Hello page one"]);

    let text = PdfExtractor::new().extract_text(&fixture.files[0]).unwrap();

    assert!(text.contains("Hello page one"), "got {text:?}");
}

#[test]
fn test_pages_concatenated_in_order() {
    let fixture = PdfDir::with_pdf("two.pdf", &["Hello page one", "Second page here"]);

    let text = PdfExtractor::new().extract_text(&fixture.files[0]).unwrap();

    let first = text.find("Hello page one").expect("page one text missing");
    let second = text.find("Second page here").expect("page two text missing");
    assert!(first < second, "pages out of order: {text:?}");
    assert!(!text.contains("\u{c}"), "unexpected page marker in {text:?}");
}
