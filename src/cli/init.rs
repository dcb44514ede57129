use serde_json::json;

use crate::db::connection;
use crate::output;

pub fn run(json_output: bool) -> i32 {
    match connection::init_db() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "database initialized");
            if json_output {
                output::print_success(json!({ "path": path.to_string_lossy() }));
            } else {
                println!("Initialized taskboard at {}", path.display());
            }
            0
        }
        Err(e) => output::report_error(&e, json_output),
    }
}
