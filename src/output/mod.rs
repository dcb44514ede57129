pub mod json;
pub mod text;

use crate::error::TaskboardError;

/// Report a command failure on stdout (JSON) or stderr (text) and return
/// the exit code.
pub fn report_error(e: &TaskboardError, json_output: bool) -> i32 {
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json::error(e)).unwrap_or_default()
        );
    } else {
        eprintln!("Error: {}", e.message);
    }
    1
}

/// Print a success envelope.
pub fn print_success(data: serde_json::Value) {
    match serde_json::to_string_pretty(&json::success(data)) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error: {e}"),
    }
}
