use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{
    Appointment, AppointmentDraft, AppointmentStatus, AppointmentType, ChatMessage, ChatSession,
};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).unwrap_or_else(|_| Utc::now().naive_utc())
}

// ── Sessions ──

pub fn get_session(conn: &Connection, id: &str) -> anyhow::Result<Option<ChatSession>> {
    let result = conn.query_row(
        "SELECT id, user_id, appointment_id, created_at FROM chat_sessions WHERE id = ?1",
        params![id],
        |row| {
            let created_at_str: String = row.get(3)?;
            Ok(ChatSession {
                id: row.get(0)?,
                user_id: row.get(1)?,
                appointment_id: row.get(2)?,
                created_at: parse_datetime(&created_at_str),
            })
        },
    );

    match result {
        Ok(session) => Ok(Some(session)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn create_session(conn: &Connection, id: &str, user_id: i64) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO chat_sessions (id, user_id) VALUES (?1, ?2)
         ON CONFLICT(id) DO NOTHING",
        params![id, user_id],
    )?;
    Ok(())
}

pub fn link_session_appointment(
    conn: &Connection,
    session_id: &str,
    appointment_id: i64,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE chat_sessions SET appointment_id = ?1 WHERE id = ?2",
        params![appointment_id, session_id],
    )?;
    Ok(count > 0)
}

// ── Messages ──

pub fn append_message(
    conn: &Connection,
    session_id: &str,
    role: &str,
    content: &str,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO chat_messages (session_id, role, content) VALUES (?1, ?2, ?3)",
        params![session_id, role, content],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The newest `limit` messages of a session, returned in chronological
/// order for use as LLM context.
pub fn get_recent_messages(
    conn: &Connection,
    session_id: &str,
    limit: i64,
) -> anyhow::Result<Vec<ChatMessage>> {
    let mut stmt = conn.prepare(
        "SELECT id, session_id, role, content, created_at
         FROM chat_messages WHERE session_id = ?1
         ORDER BY id DESC LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![session_id, limit], |row| {
        let created_at_str: String = row.get(4)?;
        Ok(ChatMessage {
            id: row.get(0)?,
            session_id: row.get(1)?,
            role: row.get(2)?,
            content: row.get(3)?,
            created_at: parse_datetime(&created_at_str),
        })
    })?;

    let mut messages = vec![];
    for row in rows {
        messages.push(row?);
    }
    messages.reverse();
    Ok(messages)
}

// ── Appointments ──

pub fn create_appointment(
    conn: &Connection,
    user_id: i64,
    draft: &AppointmentDraft,
) -> anyhow::Result<i64> {
    let appointment_date = draft.appointment_date.format(DATETIME_FORMAT).to_string();

    conn.execute(
        "INSERT INTO appointments
            (user_id, title, description, appointment_date, duration_minutes,
             appointment_type, location, notes, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'pending')",
        params![
            user_id,
            draft.title,
            draft.description,
            appointment_date,
            draft.duration_minutes,
            draft.appointment_type.as_str(),
            draft.location,
            draft.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_appointment_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<Appointment>> {
    let result = conn.query_row(
        "SELECT id, user_id, title, description, appointment_date, duration_minutes,
                appointment_type, location, notes, status, created_at, updated_at
         FROM appointments WHERE id = ?1",
        params![id],
        |row| Ok(parse_appointment_row(row)),
    );

    match result {
        Ok(appointment) => Ok(Some(appointment?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_appointments_for_user(
    conn: &Connection,
    user_id: i64,
    limit: i64,
) -> anyhow::Result<Vec<Appointment>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, title, description, appointment_date, duration_minutes,
                appointment_type, location, notes, status, created_at, updated_at
         FROM appointments WHERE user_id = ?1
         ORDER BY appointment_date DESC LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![user_id, limit], |row| Ok(parse_appointment_row(row)))?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

pub fn update_appointment_status(
    conn: &Connection,
    id: i64,
    status: &AppointmentStatus,
) -> anyhow::Result<bool> {
    let now = Utc::now().naive_utc().format(DATETIME_FORMAT).to_string();
    let count = conn.execute(
        "UPDATE appointments SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )?;
    Ok(count > 0)
}

fn parse_appointment_row(row: &rusqlite::Row) -> anyhow::Result<Appointment> {
    let appointment_date_str: String = row.get(4)?;
    let type_str: String = row.get(6)?;
    let status_str: String = row.get(9)?;
    let created_at_str: String = row.get(10)?;
    let updated_at_str: String = row.get(11)?;

    Ok(Appointment {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        appointment_date: parse_datetime(&appointment_date_str),
        duration_minutes: row.get(5)?,
        appointment_type: AppointmentType::parse(&type_str),
        location: row.get(7)?,
        notes: row.get(8)?,
        status: AppointmentStatus::parse(&status_str),
        created_at: parse_datetime(&created_at_str),
        updated_at: parse_datetime(&updated_at_str),
    })
}
