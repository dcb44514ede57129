use crate::error::TaskboardError;
use crate::models::{MemberId, NewMember, Profile, TeamMember, DEFAULT_ROLE, OWNER_ROLE};
use crate::store::{to_record, DataStore, Direction, Query, Record, TEAM_MEMBERS};

pub async fn list_members(store: &dyn DataStore) -> Result<Vec<TeamMember>, TaskboardError> {
    let query = Query::new().order_by("id", Direction::Asc);
    let records = store.query(TEAM_MEMBERS, &query).await?;
    Ok(records.iter().filter_map(TeamMember::from_record).collect())
}

pub async fn find_member_by_email(
    store: &dyn DataStore,
    email: &str,
) -> Result<Option<TeamMember>, TaskboardError> {
    let records = store
        .query(TEAM_MEMBERS, &Query::new().eq("email", email))
        .await?;
    Ok(records.iter().find_map(TeamMember::from_record))
}

/// Add a member. The name falls back to the part of the email before `@`
/// and the role to "Developer".
pub async fn add_member(
    store: &dyn DataStore,
    email: &str,
    name: Option<&str>,
    role: Option<&str>,
    is_admin: bool,
) -> Result<TeamMember, TaskboardError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(TaskboardError::validation("Member email must not be blank"));
    }
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or(email));
    let role = role.map(str::trim).filter(|r| !r.is_empty()).unwrap_or(DEFAULT_ROLE);

    let row = NewMember {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        is_admin,
        avatar_url: None,
    };
    insert_member(store, &row).await
}

pub async fn remove_member(store: &dyn DataStore, id: MemberId) -> Result<(), TaskboardError> {
    store.delete(TEAM_MEMBERS, id).await.map_err(|e| {
        if e.is_missing_row() {
            TaskboardError::member_not_found(id)
        } else {
            e
        }
    })
}

/// Make sure the current user is on the roster: inserted as an admin owner
/// the first time, name refreshed afterwards.
pub async fn sync_profile(store: &dyn DataStore, profile: &Profile) -> Result<TeamMember, TaskboardError> {
    let email = profile
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| {
            TaskboardError::validation("Profile has no email. Use `taskboard profile set --email`.")
        })?;
    let full_name = match profile.full_name() {
        n if n.is_empty() => "Eu".to_string(),
        n => n,
    };

    match find_member_by_email(store, email).await? {
        None => {
            let row = NewMember {
                name: full_name,
                email: email.to_string(),
                role: OWNER_ROLE.to_string(),
                is_admin: true,
                avatar_url: None,
            };
            insert_member(store, &row).await
        }
        Some(mut member) => {
            let mut patch = Record::new();
            patch.insert("name".into(), full_name.clone().into());
            store.update(TEAM_MEMBERS, member.id, patch).await?;
            member.name = full_name;
            Ok(member)
        }
    }
}

async fn insert_member(store: &dyn DataStore, row: &NewMember) -> Result<TeamMember, TaskboardError> {
    let record = store.insert(TEAM_MEMBERS, to_record(row)?).await?;
    TeamMember::from_record(&record)
        .ok_or_else(|| TaskboardError::store("Store returned a malformed team member record"))
}
