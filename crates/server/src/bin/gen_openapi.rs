//! Print the proxy's OpenAPI document, or write it to the path given as the
//! first argument.

use server::openapi::ApiDoc;
use std::process::ExitCode;
use utoipa::OpenApi;

fn main() -> ExitCode {
    let doc = match ApiDoc::openapi().to_pretty_json() {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("failed to serialize OpenAPI document: {err}");
            return ExitCode::FAILURE;
        }
    };

    match std::env::args().nth(1) {
        Some(path) => {
            if let Err(err) = std::fs::write(&path, doc) {
                eprintln!("failed to write {path}: {err}");
                return ExitCode::FAILURE;
            }
        }
        None => println!("{doc}"),
    }
    ExitCode::SUCCESS
}
