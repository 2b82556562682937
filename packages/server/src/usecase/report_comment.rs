//! UseCase: コメントの通報
//!
//! 通報はモデレーション用の記録であり、リアルタイム配信はしない。

use std::sync::Arc;

use crate::domain::{CommentId, CommunityRepository, Report, ReportReason, ThreadId, Timestamp};

use super::error::CommunityError;

/// 通報のユースケース
pub struct ReportCommentUseCase {
    repository: Arc<dyn CommunityRepository>,
}

impl ReportCommentUseCase {
    pub fn new(repository: Arc<dyn CommunityRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        thread_id: ThreadId,
        comment_id: CommentId,
        reason: ReportReason,
    ) -> Result<Report, CommunityError> {
        let report = Report::new(thread_id, comment_id, reason, Timestamp::now());
        self.repository.insert_report(report.clone()).await?;
        tracing::info!(
            report_id = %report.id,
            comment_id = %report.comment_id,
            "Comment reported"
        );
        Ok(report)
    }
}
