//! Embedding client tests against a local stub of the Gemini API

mod test_gemini;
