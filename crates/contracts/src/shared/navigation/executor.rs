//! Resolution result -> terminal action for the page shell.

use serde::Serialize;

use super::error::ErrorCode;
use super::resolver::{RenderTarget, ResolutionResult};

/// Status used for alias redirects; repeated requests must land on the same target.
pub const PERMANENT_REDIRECT: u16 = 308;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackAction {
    pub label: String,
    pub location: String,
}

/// Структурированная ошибка для панели ошибок
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub title: String,
    pub message: String,
    pub code: ErrorCode,
    pub fallback_action: FallbackAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TerminalAction {
    Redirect { location: String, status: u16 },
    Render(RenderTarget),
    Error(ErrorReport),
}

pub fn execute(result: ResolutionResult) -> TerminalAction {
    match result {
        ResolutionResult::Redirect(target) => TerminalAction::Redirect {
            location: target.to_url(),
            status: PERMANENT_REDIRECT,
        },
        ResolutionResult::Render(target) => TerminalAction::Render(target),
        ResolutionResult::Error(error) => TerminalAction::Error(ErrorReport {
            title: error.code.title().to_string(),
            message: error.message,
            code: error.code,
            fallback_action: FallbackAction {
                label: "Ir a la vista principal".to_string(),
                location: error.fallback.to_url(),
            },
        }),
    }
}
