use serde::{Deserialize, Serialize};

use crate::contract::{ResultsResponse, ScreenRequest, ScreenResponse};
use crate::presentation::{bound_edits, PresentationSurface, RowView};
use crate::screen::{QueryOutcome, ScreenError, SearchScreen};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    SelectionOutOfRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: ScreenResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request<P: PresentationSurface>(
    screen: &mut SearchScreen<P>,
    request: ScreenRequest,
) -> TransportResponse {
    match dispatch(screen, request) {
        Ok(response) => TransportResponse::Ok { response },
        Err(error) => TransportResponse::Err {
            error: map_screen_error(error),
        },
    }
}

pub fn handle_json<P: PresentationSurface>(
    screen: &mut SearchScreen<P>,
    payload: &str,
) -> String {
    let response = match serde_json::from_str::<ScreenRequest>(payload) {
        Ok(request) => handle_request(screen, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    serde_json::to_string(&response).expect("transport response should serialize")
}

fn dispatch<P: PresentationSurface>(
    screen: &mut SearchScreen<P>,
    request: ScreenRequest,
) -> Result<ScreenResponse, ScreenError> {
    match request {
        ScreenRequest::QueryChange(change) => {
            let query = change.query.as_deref().unwrap_or_default();
            let outcome = screen.apply_query(query);
            Ok(ScreenResponse::Results(results_response(screen, outcome)))
        }
        ScreenRequest::Submit(submit) => {
            screen.on_query_text_submit(&submit.query);
            Ok(ScreenResponse::Submitted)
        }
        ScreenRequest::Select(select) => {
            let navigation = screen.select(select.position)?;
            Ok(ScreenResponse::Navigate(navigation))
        }
    }
}

fn results_response<P: PresentationSurface>(
    screen: &SearchScreen<P>,
    outcome: QueryOutcome,
) -> ResultsResponse {
    let (changed, edits) = match outcome {
        QueryOutcome::Unchanged => (false, Vec::new()),
        QueryOutcome::Applied { script, .. } => (true, bound_edits(&script)),
    };
    let visibility = screen.visibility();
    ResultsResponse {
        query: screen.current_query().to_string(),
        changed,
        rows: screen.displayed().iter().map(RowView::bind).collect(),
        edits,
        results_visible: visibility.results_visible,
        no_results_visible: visibility.no_results_visible,
    }
}

fn map_screen_error(error: ScreenError) -> ErrorResponse {
    match error {
        ScreenError::SelectionOutOfRange { .. } => ErrorResponse {
            code: ErrorCode::SelectionOutOfRange,
            message: error.to_string(),
        },
    }
}
