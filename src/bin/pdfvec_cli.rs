//! pdfvec CLI - build vector indexes from a directory of PDFs
//!
//! # Examples
//!
//! ```bash
//! # Index ./pdfs into ./vector_index (prompts for the API key)
//! pdfvec index
//!
//! # Explicit directories, key from the environment
//! GOOGLE_API_KEY=... pdfvec index papers/ --output indexes/
//!
//! # Machine-readable summary
//! pdfvec --format json index papers/
//!
//! # Show configuration
//! pdfvec show-config
//! ```

use clap::Parser;
use pdfvec::cli::{run, Cli};
use pdfvec::PdfVecError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        if e
            .downcast_ref::<PdfVecError>()
            .is_some_and(PdfVecError::is_credential_error)
        {
            eprintln!("Pass --api-key or set GOOGLE_API_KEY.");
        }
        std::process::exit(1);
    }
}
