use ragdesk_logging::{rag_error, rag_info, rag_warn};

use crate::{FailureKind, IngestOutcome, IngestRequest, RagApi};

/// Runs the text and file sub-requests in order.
///
/// Each present payload gets its own request. Any accepted sub-request makes
/// the whole submission a success, except that a rejected file ends the
/// sequence with the server's detail. Transport or body failures end it with
/// a connection error.
pub async fn run_ingest(api: &dyn RagApi, request: &IngestRequest) -> IngestOutcome {
    let mut success = false;

    if let Some(text) = &request.text {
        match api
            .ingest_texts(std::slice::from_ref(text), &request.source)
            .await
        {
            Ok(()) => {
                rag_info!("ingested text ({} bytes) source={}", text.len(), request.source);
                success = true;
            }
            Err(err) if err.is_http_status() => {
                rag_warn!("text ingestion refused: {}", err);
            }
            Err(err) => {
                rag_error!("text ingestion failed: {}", err);
                return IngestOutcome::ConnectionError(err.to_string());
            }
        }
    }

    if let Some(file) = &request.file {
        match api.ingest_file(file).await {
            Ok(()) => {
                rag_info!(
                    "ingested file {} ({} bytes)",
                    file.file_name,
                    file.content.len()
                );
                success = true;
            }
            Err(err) => {
                return match &err.kind {
                    FailureKind::Rejected { detail, .. } => {
                        rag_warn!("file {} rejected: {}", file.file_name, detail);
                        IngestOutcome::FileRejected {
                            detail: detail.clone(),
                        }
                    }
                    _ => {
                        rag_error!("file ingestion failed: {}", err);
                        IngestOutcome::ConnectionError(err.to_string())
                    }
                };
            }
        }
    }

    if success {
        IngestOutcome::Succeeded
    } else {
        IngestOutcome::Failed
    }
}
