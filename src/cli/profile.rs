use crate::cli::commands::ProfileCommands;
use crate::config::Config;
use crate::db::connection;
use crate::error::TaskboardError;
use crate::output;

pub fn run(cmd: ProfileCommands, json_output: bool) -> i32 {
    let result = match cmd {
        ProfileCommands::Show => run_show(json_output),
        ProfileCommands::Set { first_name, last_name, email } => {
            run_set(first_name, last_name, email, json_output)
        }
    };
    match result {
        Ok(code) => code,
        Err(e) => output::report_error(&e, json_output),
    }
}

fn run_show(json_output: bool) -> Result<i32, TaskboardError> {
    // Fail early outside a board directory.
    connection::find_board_root()?;
    let profile = Config::load().profile;

    if json_output {
        output::print_success(output::json::profile_json(&profile));
    } else {
        output::text::print_profile(&profile);
    }
    Ok(0)
}

/// Empty strings clear a field.
fn apply(field: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        let v = v.trim().to_string();
        *field = if v.is_empty() { None } else { Some(v) };
    }
}

fn run_set(
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    connection::find_board_root()?;
    if let Some(e) = email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        if !e.contains('@') {
            return Err(TaskboardError::validation(format!("Invalid email: {e}")));
        }
    }

    let mut config = Config::load();
    apply(&mut config.profile.first_name, first_name);
    apply(&mut config.profile.last_name, last_name);
    apply(&mut config.profile.email, email);
    config.save()?;

    if json_output {
        output::print_success(output::json::profile_json(&config.profile));
    } else {
        output::text::print_profile(&config.profile);
    }
    Ok(0)
}
