//! Help assistant.
//!
//! A keyword matcher over a fixed FAQ list. The reply is delivered after a
//! short delay on a tokio task; the `ChatBot` that owns the transcript
//! aborts any reply still pending when it is closed or dropped, so nothing
//! is appended to a transcript nobody holds.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use uuid::Uuid;

// ═══════════════════════════════════════════
// Canned content
// ═══════════════════════════════════════════

pub const WELCOME_MESSAGE: &str = "Hello! I'm your AidPoint assistant. I can help you with information about hospitals, insurance, appointments, and more. How can I assist you today?";

pub const FALLBACK_REPLY: &str = "I'm sorry, I didn't understand that. Here are some topics I can help with:\n\n• Insurance and billing questions\n• How to book appointments\n• Hospital hours and availability\n• Appointment cancellation\n• General healthcare information\n\nTry asking about any of these topics!";

pub const GREETING_REPLY: &str = "Hello! I'm here to help you with any questions about AidPoint. You can ask me about booking appointments, insurance, hospital information, or any other healthcare-related queries.";

pub const THANKS_REPLY: &str = "You're welcome! Is there anything else I can help you with today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQS: &[Faq] = &[
    Faq {
        question: "What insurance do you accept?",
        answer: "Our partner hospitals accept various insurance plans including Blue Cross, Aetna, Medicare, Medicaid, Humana, Cigna, and United Healthcare. You can filter hospitals by accepted insurance on our search page.",
    },
    Faq {
        question: "How do I book an appointment?",
        answer: "To book an appointment: 1) Search for doctors by specialization or hospital, 2) Select a doctor and view their profile, 3) Click \"Book Appointment\" and fill in your details, 4) Choose your preferred date and time. You'll need to create an account first.",
    },
    Faq {
        question: "What are hospital timings?",
        answer: "Most hospitals operate 24/7 for emergencies. Regular consultation hours are typically 9 AM to 6 PM. Specific doctor availability varies - you can check individual doctor schedules on their profile pages.",
    },
    Faq {
        question: "How can I cancel my appointment?",
        answer: "You can cancel appointments from your \"My Appointments\" page. Click on the appointment and select \"Cancel\" from the options menu. Please cancel at least 24 hours in advance when possible.",
    },
    Faq {
        question: "What information do I need for booking?",
        answer: "For booking appointments, you'll need: your full name, phone number, email address, preferred date and time, and a brief description of your concern or reason for the visit.",
    },
];

/// (word in the message, word in the FAQ question). An FAQ matches when
/// any pair is present on both sides.
const KEYWORD_PAIRS: &[(&str, &str)] = &[
    ("insurance", "insurance"),
    ("book", "book"),
    ("appointment", "appointment"),
    ("timing", "timing"),
    ("hours", "timing"),
    ("cancel", "cancel"),
    ("information", "information"),
];

/// Pick the reply for a message. FAQs are tried in list order and the
/// first match wins, so "cancel my appointment" lands on the booking FAQ.
pub fn reply_for(input: &str) -> &'static str {
    let message = input.to_lowercase();

    let matched = FAQS.iter().find(|faq| {
        let question = faq.question.to_lowercase();
        KEYWORD_PAIRS
            .iter()
            .any(|(said, asked)| message.contains(said) && question.contains(asked))
    });

    if let Some(faq) = matched {
        faq.answer
    } else if message.contains("hello") || message.contains("hi") {
        GREETING_REPLY
    } else if message.contains("thank") {
        THANKS_REPLY
    } else {
        FALLBACK_REPLY
    }
}

/// Reply after `delay`. Dropping the future cancels the reply.
pub async fn respond(input: &str, delay: Duration) -> &'static str {
    let reply = reply_for(input);
    tokio::time::sleep(delay).await;
    reply
}

// ═══════════════════════════════════════════
// Transcript
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// One chat window: its transcript plus the replies still on their way.
/// Must be used inside a tokio runtime.
pub struct ChatBot {
    transcript: Arc<Mutex<Vec<ChatMessage>>>,
    pending: Vec<JoinHandle<()>>,
    reply_delay: Duration,
}

impl ChatBot {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            transcript: Arc::new(Mutex::new(vec![ChatMessage::new(
                WELCOME_MESSAGE,
                Sender::Bot,
            )])),
            pending: Vec::new(),
            reply_delay,
        }
    }

    /// Append the user's message now and schedule the reply. Blank input
    /// is ignored and returns false.
    pub fn send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        lock_transcript(&self.transcript).push(ChatMessage::new(text, Sender::User));

        let reply = reply_for(text);
        let transcript = Arc::clone(&self.transcript);
        let delay = self.reply_delay;
        self.pending.retain(|handle| !handle.is_finished());
        self.pending.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            lock_transcript(&transcript).push(ChatMessage::new(reply, Sender::Bot));
        }));
        true
    }

    /// Snapshot of the conversation so far.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        lock_transcript(&self.transcript).clone()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }

    /// Abort every reply that has not arrived yet.
    pub fn close(&mut self) {
        let aborted = self.pending.len();
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        if aborted > 0 {
            tracing::debug!(aborted, "Chat closed with pending replies");
        }
    }
}

/// The transcript is append-only, so a poisoned lock still guards a
/// consistent list and is recovered rather than dropping messages.
fn lock_transcript(transcript: &Mutex<Vec<ChatMessage>>) -> MutexGuard<'_, Vec<ChatMessage>> {
    transcript.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Chat transcript lock poisoned, recovering");
        poisoned.into_inner()
    })
}

impl Drop for ChatBot {
    fn drop(&mut self) {
        self.close();
    }
}
