//! HTTP API endpoint handlers.
//!
//! Write handlers only validate input and hand off to a use case; the use
//! case persists and then publishes to the broadcast registry. A failed
//! broadcast never changes the response.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

use crate::{
    domain::{
        AuthorName, CommentId, PostBody, Reply, ReportReason, ThreadId, ThreadTitle,
        ValueObjectError,
    },
    infrastructure::dto::http::{
        CommentDetailDto, ConnectionsDto, CreatePostRequest, CreateThreadRequest, LikesDto,
        ReportListDto, ReportRequest, ThreadDetailDto, ThreadSummaryDto,
    },
    ui::state::AppState,
    usecase::{
        CommunityError, CreateCommentUseCase, CreateReplyUseCase, CreateThreadUseCase,
        LikeCommentUseCase, LikeThreadUseCase, ReportCommentUseCase,
    },
};

use super::error::ApiError;

const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Number of open event streams
pub async fn connection_count(State(state): State<Arc<AppState>>) -> Json<ConnectionsDto> {
    Json(ConnectionsDto {
        connections: state.registry.size(),
    })
}

/// List threads, newest first
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ThreadSummaryDto>>, ApiError> {
    let threads = state
        .repository
        .list_threads()
        .await
        .map_err(CommunityError::from)?;

    let mut summaries = Vec::with_capacity(threads.len());
    for thread in threads {
        let comment_count = state
            .repository
            .list_comments(&thread.id)
            .await
            .map_err(CommunityError::from)?
            .len();
        summaries.push(ThreadSummaryDto {
            thread,
            comment_count,
        });
    }

    Ok(Json(summaries))
}

/// Thread detail with comments and their replies
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> Result<Json<ThreadDetailDto>, ApiError> {
    let thread_id = parse_thread_id(thread_id)?;
    let thread = state
        .repository
        .get_thread(&thread_id)
        .await
        .map_err(CommunityError::from)?;
    let comments = state
        .repository
        .list_comments(&thread_id)
        .await
        .map_err(CommunityError::from)?;

    let mut details = Vec::with_capacity(comments.len());
    for comment in comments {
        let replies = state
            .repository
            .list_replies(&comment.id)
            .await
            .map_err(CommunityError::from)?;
        details.push(CommentDetailDto { comment, replies });
    }

    Ok(Json(ThreadDetailDto {
        thread,
        comments: details,
    }))
}

/// Create a thread
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateThreadRequest>,
) -> Result<(StatusCode, Json<ThreadSummaryDto>), ApiError> {
    let title = ThreadTitle::new(request.title)?;
    let body = PostBody::new(request.body)?;
    let author = AuthorName::new(request.author)?;

    let thread = CreateThreadUseCase::new(state.repository.clone())
        .execute(title, body, author)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ThreadSummaryDto {
            thread,
            comment_count: 0,
        }),
    ))
}

/// Comment on a thread; broadcasts `new_comment`
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CommentDetailDto>), ApiError> {
    let thread_id = parse_thread_id(thread_id)?;
    let author = AuthorName::new(request.author)?;
    let body = PostBody::new(request.body)?;

    let comment = CreateCommentUseCase::new(state.repository.clone(), state.publisher())
        .execute(thread_id, author, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentDetailDto {
            comment,
            replies: Vec::new(),
        }),
    ))
}

/// Like a thread; broadcasts `thread_liked`
pub async fn like_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> Result<Json<LikesDto>, ApiError> {
    let thread_id = parse_thread_id(thread_id)?;

    let likes = LikeThreadUseCase::new(state.repository.clone(), state.publisher())
        .execute(thread_id)
        .await?;

    Ok(Json(LikesDto { likes }))
}

/// Like a comment; broadcasts `comment_liked`
pub async fn like_comment(
    State(state): State<Arc<AppState>>,
    Path((thread_id, comment_id)): Path<(String, String)>,
) -> Result<Json<LikesDto>, ApiError> {
    let thread_id = parse_thread_id(thread_id)?;
    let comment_id = parse_comment_id(comment_id)?;

    let likes = LikeCommentUseCase::new(state.repository.clone(), state.publisher())
        .execute(thread_id, comment_id)
        .await?;

    Ok(Json(LikesDto { likes }))
}

/// Reply to a comment; broadcasts `new_reply`
pub async fn create_reply(
    State(state): State<Arc<AppState>>,
    Path((thread_id, comment_id)): Path<(String, String)>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Reply>), ApiError> {
    let thread_id = parse_thread_id(thread_id)?;
    let comment_id = parse_comment_id(comment_id)?;
    let author = AuthorName::new(request.author)?;
    let body = PostBody::new(request.body)?;

    let reply = CreateReplyUseCase::new(state.repository.clone(), state.publisher())
        .execute(thread_id, comment_id, author, body)
        .await?;

    Ok((StatusCode::CREATED, Json(reply)))
}

/// Report a comment for moderation. Not broadcast.
pub async fn report_comment(
    State(state): State<Arc<AppState>>,
    Path((thread_id, comment_id)): Path<(String, String)>,
    Json(request): Json<ReportRequest>,
) -> Result<StatusCode, ApiError> {
    let thread_id = parse_thread_id(thread_id)?;
    let comment_id = parse_comment_id(comment_id)?;
    let reason = ReportReason::new(request.reason)?;

    ReportCommentUseCase::new(state.repository.clone())
        .execute(thread_id, comment_id, reason)
        .await?;

    Ok(StatusCode::CREATED)
}

/// Moderation queue, newest first. Requires the admin password header.
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ReportListDto>, ApiError> {
    let supplied = headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok());
    if supplied != Some(state.admin_password.as_str()) {
        tracing::warn!("Rejected admin request with missing or wrong password");
        return Err(ApiError::unauthorized());
    }

    let reports = state
        .repository
        .list_reports()
        .await
        .map_err(CommunityError::from)?;

    Ok(Json(ReportListDto { reports }))
}

// Malformed ids in the path cannot name an existing document
fn parse_thread_id(raw: String) -> Result<ThreadId, ApiError> {
    ThreadId::new(raw).map_err(|e| not_found(e, "Thread"))
}

fn parse_comment_id(raw: String) -> Result<CommentId, ApiError> {
    CommentId::new(raw).map_err(|e| not_found(e, "Comment"))
}

fn not_found(err: ValueObjectError, kind: &str) -> ApiError {
    let value = match err {
        ValueObjectError::InvalidId { value, .. } => value,
        other => other.to_string(),
    };
    ApiError::new(StatusCode::NOT_FOUND, format!("{kind} not found: {value}"))
}
