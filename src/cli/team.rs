use serde_json::json;

use crate::cli::commands::TeamCommands;
use crate::config::Config;
use crate::db::connection;
use crate::error::TaskboardError;
use crate::output;
use crate::repo::team_repo;

pub async fn run(cmd: TeamCommands, json_output: bool) -> i32 {
    let result = match cmd {
        TeamCommands::List => run_list(json_output).await,
        TeamCommands::Add { email, name, role, admin } => {
            run_add(&email, name.as_deref(), &role, admin, json_output).await
        }
        TeamCommands::Remove { id } => run_remove(id, json_output).await,
        TeamCommands::Sync => run_sync(json_output).await,
    };
    match result {
        Ok(code) => code,
        Err(e) => output::report_error(&e, json_output),
    }
}

async fn run_list(json_output: bool) -> Result<i32, TaskboardError> {
    let store = connection::open_store()?;
    let members = team_repo::list_members(&store).await?;

    if json_output {
        let members_json: Vec<_> = members.iter().map(output::json::member_json).collect();
        output::print_success(json!({ "members": members_json }));
    } else {
        output::text::print_member_list(&members);
    }
    Ok(0)
}

async fn run_add(
    email: &str,
    name: Option<&str>,
    role: &str,
    admin: bool,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let store = connection::open_store()?;
    let member = team_repo::add_member(&store, email, name, Some(role), admin).await?;

    if json_output {
        output::print_success(output::json::member_json(&member));
    } else {
        println!("Added member: {} <{}> (#{})", member.name, member.email, member.id);
    }
    Ok(0)
}

async fn run_remove(id: i64, json_output: bool) -> Result<i32, TaskboardError> {
    let store = connection::open_store()?;
    team_repo::remove_member(&store, id).await?;

    if json_output {
        output::print_success(json!({ "removed": { "id": id } }));
    } else {
        println!("Removed member #{id}");
    }
    Ok(0)
}

async fn run_sync(json_output: bool) -> Result<i32, TaskboardError> {
    let store = connection::open_store()?;
    let profile = Config::load().profile;
    let member = team_repo::sync_profile(&store, &profile).await?;

    if json_output {
        output::print_success(output::json::member_json(&member));
    } else {
        println!("Synced member: {} <{}> (#{})", member.name, member.email, member.id);
    }
    Ok(0)
}
