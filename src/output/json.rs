use serde_json::{json, Value};

use crate::board::{Column, Columns};
use crate::error::TaskboardError;
use crate::models::{Profile, Project, ProjectCounts, Task, TeamMember};
use crate::repo::TaskCounts;

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskboardError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn project_json(p: &Project) -> Value {
    json!({
        "id": p.id,
        "name": p.name,
        "description": p.description,
        "status": p.status.as_str(),
        "created_at": p.created_at
    })
}

pub fn project_counts_json(c: &ProjectCounts) -> Value {
    json!({
        "total": c.total,
        "pending": c.pending,
        "active": c.active,
        "paused": c.paused,
        "finished": c.finished
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "status": t.status.as_str(),
        "tag": t.tag,
        "tag_class": t.tag_class,
        "project_id": t.project_id
    })
}

pub fn task_counts_json(c: &TaskCounts) -> Value {
    json!({
        "total": c.total,
        "todo": c.todo,
        "doing": c.doing,
        "paused": c.paused,
        "done": c.done,
        "percentage": (c.percentage * 10.0).round() / 10.0
    })
}

fn column_json(c: &Column) -> Value {
    let items: Vec<_> = c
        .items
        .iter()
        .map(|i| {
            json!({
                "id": i.id,
                "content": i.content,
                "tag": i.tag,
                "tag_class": i.tag_class
            })
        })
        .collect();
    json!({
        "key": c.key.as_str(),
        "title": c.title,
        "count": c.len(),
        "items": items
    })
}

pub fn columns_json(columns: &Columns) -> Value {
    Value::Array(columns.iter().map(column_json).collect())
}

pub fn member_json(m: &TeamMember) -> Value {
    json!({
        "id": m.id,
        "name": m.name,
        "email": m.email,
        "role": m.role,
        "is_admin": m.is_admin,
        "avatar_url": m.avatar_url,
        "initials": m.initials()
    })
}

pub fn profile_json(p: &Profile) -> Value {
    json!({
        "first_name": p.first_name,
        "last_name": p.last_name,
        "email": p.email,
        "full_name": p.full_name(),
        "initials": p.initials()
    })
}
