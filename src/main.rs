// batchmin - minify the bundled script and stylesheets
// Entry point with clean separation of concerns

use batchmin::cli::CliHandler;

#[tokio::main]
async fn main() {
    let handler = CliHandler::new();

    if let Err(e) = handler.run().await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
