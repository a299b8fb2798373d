use std::sync::Arc;

use chrono::Local;

use crate::db::queries;
use crate::services::ai::Message;
use crate::services::extraction;
use crate::state::AppState;

/// How much transcript is replayed to the LLM per turn.
const HISTORY_LIMIT: i64 = 20;

const SYSTEM_PROMPT: &str = r#"You are a helpful appointment scheduling assistant. Your role is to:

1. Help users schedule appointments by collecting necessary information
2. Provide friendly and professional responses
3. Ask clarifying questions when needed
4. Confirm appointment details before scheduling
5. Handle appointment modifications and cancellations

Key information to collect for appointments:
- Type of appointment (medical, consultation, general, follow-up)
- Preferred date and time (accept formats like "tomorrow at 2 PM", "Monday morning", "next Friday at 3:30 PM")
- Duration (default 60 minutes)
- Location preference
- Any special notes or requirements

When users provide date/time information, acknowledge it and confirm the details before creating the appointment.

Always be polite, professional, and helpful. If you're unsure about something, ask for clarification."#;

pub struct ChatReply {
    pub message: String,
    pub appointment_created: bool,
    pub appointment_id: Option<i64>,
}

/// One conversational turn: replay recent history to the LLM, detect a
/// scheduling intent in the exchange, and persist any resulting
/// appointment. An LLM failure propagates to the caller before anything is
/// written; a persistence failure after a successful reply is logged and
/// swallowed so the user still gets the conversational response.
pub async fn process_message(
    state: &Arc<AppState>,
    session_id: &str,
    user_id: i64,
    message: &str,
) -> anyhow::Result<ChatReply> {
    let history = {
        let db = state.db.lock().unwrap();
        if queries::get_session(&db, session_id)?.is_none() {
            queries::create_session(&db, session_id, user_id)?;
        }
        queries::get_recent_messages(&db, session_id, HISTORY_LIMIT)?
    };

    let mut messages: Vec<Message> = history
        .iter()
        .map(|m| Message {
            role: m.role.clone(),
            content: m.content.clone(),
        })
        .collect();

    messages.push(Message {
        role: "user".to_string(),
        content: message.to_string(),
    });

    let reply = state.llm.chat(SYSTEM_PROMPT, &messages).await?;

    // The reference instant is injected here so the extraction pipeline
    // itself never touches the clock.
    let now = Local::now().naive_local();
    let draft = extraction::extract_appointment(message, &reply, now);

    let mut appointment_id = None;
    if let Some(draft) = draft {
        let db = state.db.lock().unwrap();
        match queries::create_appointment(&db, user_id, &draft) {
            Ok(id) => {
                appointment_id = Some(id);
                if let Err(e) = queries::link_session_appointment(&db, session_id, id) {
                    tracing::warn!(error = %e, session = session_id, "failed to link appointment to session");
                }
                tracing::info!(
                    session = session_id,
                    appointment = id,
                    kind = draft.appointment_type.as_str(),
                    "appointment created from conversation"
                );
            }
            Err(e) => {
                // Creation silently fails from the user's point of view;
                // the conversational reply still goes out.
                tracing::error!(error = %e, session = session_id, "failed to persist extracted appointment");
            }
        }
    }

    {
        let db = state.db.lock().unwrap();
        queries::append_message(&db, session_id, "user", message)?;
        queries::append_message(&db, session_id, "assistant", &reply)?;
    }

    Ok(ChatReply {
        message: reply,
        appointment_created: appointment_id.is_some(),
        appointment_id,
    })
}
