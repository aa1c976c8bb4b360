use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match expease_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "expease exited with an error");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
