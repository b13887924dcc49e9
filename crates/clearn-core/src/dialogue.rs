use std::time::Duration;

use tracing::debug;
use tracing::warn;

use super::reducer::SiteEffect;
use super::state::ChatMessage;
use super::state::ChatRole;

pub const WELCOME_TEXT: &str = "Hello! I'm the CLearn study assistant. I can help you with \
questions, point you to study materials, and share career tips. How can I assist you today?";

pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "Explain quantum physics concepts",
    "Help me prepare for my exam",
    "Predict my learning progress",
    "What are the best study techniques?",
];

/// A reply waiting for its delay to expire. It carries its own prompt, so
/// replies can never attach to a different request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub session_id: u64,
    pub request_id: u64,
    pub prompt: String,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    id: u64,
    transcript: Vec<ChatMessage>,
    draft: String,
    next_request_id: u64,
}

impl ChatSession {
    fn new(id: u64) -> Self {
        Self {
            id,
            transcript: Vec::new(),
            draft: String::new(),
            next_request_id: 1,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    fn push(&mut self, role: ChatRole, text: String) -> ChatMessage {
        let message = ChatMessage {
            role,
            text,
            seq: self.transcript.len() as u64 + 1,
            ts_ms: chrono::Utc::now().timestamp_millis(),
        };
        self.transcript.push(message.clone());
        message
    }
}

#[derive(Debug, Clone)]
pub struct DialogueEngine {
    reply_delay: Duration,
    session: Option<ChatSession>,
    next_session_id: u64,
    visible: bool,
}

impl DialogueEngine {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            reply_delay,
            session: None,
            next_session_id: 1,
            visible: false,
        }
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        self.session
            .as_ref()
            .map_or(&[], |session| session.transcript())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn open(&mut self) -> Vec<SiteEffect> {
        self.ensure_session();
        if self.visible {
            return Vec::new();
        }
        self.visible = true;
        vec![SiteEffect::SetChatVisible(true)]
    }

    /// Hides the widget. The session stays alive and pending replies still land.
    pub fn close(&mut self) -> Vec<SiteEffect> {
        if !self.visible {
            return Vec::new();
        }
        self.visible = false;
        vec![SiteEffect::SetChatVisible(false)]
    }

    pub fn set_draft(&mut self, text: String) -> Vec<SiteEffect> {
        let session = self.ensure_session();
        session.draft.clone_from(&text);
        vec![SiteEffect::SetDraft(text)]
    }

    pub fn use_suggested_prompt(&mut self, index: usize) -> Vec<SiteEffect> {
        let Some(prompt) = SUGGESTED_PROMPTS.get(index) else {
            warn!(index, "ignoring unknown suggested prompt");
            return Vec::new();
        };
        self.set_draft((*prompt).to_string())
    }

    pub fn submit_draft(&mut self) -> Vec<SiteEffect> {
        let draft = self
            .session
            .as_ref()
            .map(|session| session.draft.clone())
            .unwrap_or_default();
        self.submit(&draft)
    }

    pub fn submit(&mut self, text: &str) -> Vec<SiteEffect> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let reply_delay = self.reply_delay;
        let session = self.ensure_session();
        let message = session.push(ChatRole::User, trimmed.to_string());
        session.draft.clear();
        let request_id = session.next_request_id;
        session.next_request_id += 1;
        debug!(session_id = session.id, request_id, "chat message submitted");

        vec![
            SiteEffect::AppendMessage(message),
            SiteEffect::SetDraft(String::new()),
            SiteEffect::ScheduleReply(PendingReply {
                session_id: session.id,
                request_id,
                prompt: trimmed.to_string(),
                delay: reply_delay,
            }),
        ]
    }

    pub fn deliver_reply(
        &mut self,
        session_id: u64,
        request_id: u64,
        text: String,
    ) -> Vec<SiteEffect> {
        let Some(session) = self
            .session
            .as_mut()
            .filter(|session| session.id == session_id)
        else {
            debug!(session_id, request_id, "dropping reply for a session that is gone");
            return Vec::new();
        };
        let message = session.push(ChatRole::Assistant, text);
        vec![
            SiteEffect::AppendMessage(message),
            SiteEffect::ScrollTranscriptToEnd,
        ]
    }

    /// Drops the session; replies still in flight are discarded on arrival.
    pub fn teardown(&mut self) -> Vec<SiteEffect> {
        if let Some(session) = self.session.take() {
            debug!(session_id = session.id, "chat session torn down");
        }
        self.close()
    }

    fn ensure_session(&mut self) -> &mut ChatSession {
        let next_session_id = &mut self.next_session_id;
        self.session.get_or_insert_with(|| {
            let id = *next_session_id;
            *next_session_id += 1;
            debug!(session_id = id, "chat session created");
            ChatSession::new(id)
        })
    }
}
