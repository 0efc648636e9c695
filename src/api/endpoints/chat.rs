//! Help assistant endpoints.
//!
//! - `GET /api/chat`: welcome message and the FAQ list
//! - `POST /api/chat`: answer one message after the configured delay

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::chat::{self, ChatMessage, Faq, Sender};

#[derive(Debug, Serialize)]
pub struct ChatIntro {
    pub welcome: ChatMessage,
    pub faqs: &'static [Faq],
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
    pub reply: ChatMessage,
}

pub async fn intro() -> Json<ChatIntro> {
    Json(ChatIntro {
        welcome: ChatMessage::new(chat::WELCOME_MESSAGE, Sender::Bot),
        faqs: chat::FAQS,
    })
}

pub async fn send(
    State(ctx): State<ApiContext>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is empty".into()));
    }

    let message = ChatMessage::new(request.message.as_str(), Sender::User);
    // A client that disconnects drops this future and the pending reply with it
    let reply = chat::respond(&request.message, ctx.core.config.chat_reply_delay).await;

    Ok(Json(ChatResponse {
        message,
        reply: ChatMessage::new(reply, Sender::Bot),
    }))
}
