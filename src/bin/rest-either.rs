//! # rest-either - one request, one outcome
//!
//! Sends a single request through the never-failing client and prints the
//! result: the payload on success, the problem details otherwise.
//!
//! ## Usage
//!
//! ```bash
//! export REST_EITHER_BASE_URL=https://api.example.com
//! rest-either get todos/9
//! rest-either get users page=2 Accept:application/json
//! rest-either --auth "Bearer 123" post users name=john age=30
//! rest-either --timeout 2.5 delete users/1
//! ```
//!
//! Exits with status 1 when the outcome is a problem or the arguments are
//! invalid.

use clap::Parser;
use rest_either::{logging, run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {suggestion}");
            }
            std::process::exit(1);
        }
    }
}
