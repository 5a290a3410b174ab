//! Calls to the text generator with token accounting.

use upskill_core::types::DbId;
use upskill_db::repositories::AiInteractionRepo;
use upskill_generation::{CompletionRequest, GenerationError};

use crate::state::AppState;

/// Run one completion and record its token usage for `user_id`.
///
/// The usage insert is best-effort: a failure is logged and the completion
/// is still returned.
pub async fn complete_and_record(
    state: &AppState,
    user_id: DbId,
    interaction_type: &str,
    request: &CompletionRequest,
) -> Result<String, GenerationError> {
    let completion = state.generator.complete(request).await?;

    if let Err(e) = AiInteractionRepo::record(
        &state.pool,
        user_id,
        interaction_type,
        completion.total_tokens,
    )
    .await
    {
        tracing::warn!(
            user_id,
            interaction_type,
            error = %e,
            "Failed to record AI interaction",
        );
    }

    tracing::debug!(
        user_id,
        interaction_type,
        tokens = completion.total_tokens,
        "AI completion finished",
    );

    Ok(completion.content)
}
