//! Tierforge daemon library.
//!
//! The daemon exposes one generation endpoint: it gates requests against a
//! free-preview quota, builds a fixed instructional prompt, forwards it to
//! an OpenAI-compatible completion API and returns the raw labelled blob.

pub mod config;
pub mod llm;
pub mod prompt;
pub mod routes;
pub mod server;
