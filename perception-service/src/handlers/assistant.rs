use crate::dtos::{
    AltTextRequest, AltTextResponse, ChatGptRequest, ChatGptResponse, ChatRequest, ChatResponse,
    ReadAloudRequest, ReadAloudResponse, SimplifyRequest, SimplifyResponse,
};
use crate::models::{ChatMessage, ChatRole};
use crate::services::providers::{CompletionOptions, Message, ModelKind, Role};
use crate::services::{prompts, read_aloud, relay, suggestions};
use crate::startup::AppState;
use axum::{
    extract::State,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::StreamExt;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let existing = match &req.conversation_id {
        Some(id) => Some(
            state
                .conversations
                .get(id)
                .await?
                .ok_or_else(|| AppError::not_found("Conversation not found"))?,
        ),
        None => None,
    };

    let mut messages = vec![Message::system(prompts::ASSISTANT_SYSTEM_PROMPT)];
    if let Some(conversation) = &existing {
        messages.extend(conversation.messages.iter().map(|turn| {
            let role = match turn.role {
                ChatRole::User => Role::User,
                ChatRole::Assistant => Role::Assistant,
            };
            Message::new(role, turn.content.clone())
        }));
    }
    messages.push(Message::user(req.message.clone()));

    let completion = state
        .provider
        .complete(&messages, &CompletionOptions::default())
        .await?;
    let reply = completion
        .text
        .unwrap_or_else(|| prompts::CHAT_FALLBACK.to_string());

    let turns = vec![
        ChatMessage::user(req.message),
        ChatMessage::assistant(reply.clone()),
    ];
    let conversation = match existing {
        Some(conversation) => state.conversations.append(&conversation.id, turns).await?,
        None => state.conversations.create(&req.user_id, turns).await?,
    };

    let suggestions = suggestions::extract(&reply);

    tracing::info!(
        conversation_id = %conversation.id,
        turns = conversation.messages.len(),
        suggestion_count = suggestions.len(),
        "Chat reply generated"
    );

    Ok(Json(ChatResponse {
        conversation_id: conversation.id,
        message: reply,
        suggestions,
    }))
}

pub async fn chatgpt(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ChatGptRequest>,
) -> Result<Response, AppError> {
    let messages = req.messages();
    let options = CompletionOptions {
        model: ModelKind::Chat,
        temperature: Some(req.temperature),
        max_tokens: Some(req.max_tokens),
    };

    if req.stream {
        let upstream = state.provider.complete_stream(&messages, &options).await?;
        let events = relay::relay(upstream).map(|frame| Event::default().json_data(frame));

        tracing::debug!(message_count = messages.len(), "Streaming completion started");

        return Ok(Sse::new(events).into_response());
    }

    let completion = state.provider.complete(&messages, &options).await?;

    Ok(Json(ChatGptResponse {
        message: completion
            .text
            .unwrap_or_else(|| prompts::CHAT_FALLBACK.to_string()),
        usage: completion.usage,
        model: completion.model,
    })
    .into_response())
}

pub async fn simplify(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SimplifyRequest>,
) -> Result<Json<SimplifyResponse>, AppError> {
    let messages = [
        Message::system(prompts::simplify_system_prompt(
            req.reading_level.grade_band(),
        )),
        Message::user(req.text.clone()),
    ];
    let options = CompletionOptions {
        model: ModelKind::Chat,
        temperature: Some(prompts::SIMPLIFY_TEMPERATURE),
        max_tokens: Some(prompts::SIMPLIFY_MAX_TOKENS),
    };

    let completion = state.provider.complete(&messages, &options).await?;
    let simplified = completion.text.unwrap_or_else(|| req.text.clone());

    Ok(Json(SimplifyResponse {
        original: req.text,
        simplified,
        reading_level: req.reading_level,
    }))
}

pub async fn generate_alt_text(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AltTextRequest>,
) -> Result<Json<AltTextResponse>, AppError> {
    if req.use_cache {
        if let Some(entry) = state.alt_text.get(&req.image_url).await? {
            tracing::debug!(image_url = %req.image_url, "Alt text cache hit");
            return Ok(Json(AltTextResponse {
                alt_text: entry.alt_text,
                cached: true,
            }));
        }
    }

    let messages = [
        Message::system(prompts::ALT_TEXT_SYSTEM_PROMPT),
        Message::user_with_image(prompts::ALT_TEXT_USER_PROMPT, req.image_url.clone()),
    ];
    let options = CompletionOptions {
        model: ModelKind::Vision,
        temperature: None,
        max_tokens: Some(prompts::ALT_TEXT_MAX_TOKENS),
    };

    let completion = state.provider.complete(&messages, &options).await?;
    let alt_text = completion
        .text
        .unwrap_or_else(|| prompts::ALT_TEXT_FALLBACK.to_string());

    state.alt_text.put(&req.image_url, &alt_text).await?;

    tracing::info!(image_url = %req.image_url, "Alt text generated");

    Ok(Json(AltTextResponse {
        alt_text,
        cached: false,
    }))
}

pub async fn read_aloud(
    ValidatedJson(req): ValidatedJson<ReadAloudRequest>,
) -> Result<Json<ReadAloudResponse>, AppError> {
    let schedule = read_aloud::schedule(&req.text, req.words_per_minute);

    Ok(Json(ReadAloudResponse {
        text: req.text,
        word_timings: schedule.word_timings,
        total_duration: schedule.total_duration,
        words_per_minute: req.words_per_minute,
    }))
}
