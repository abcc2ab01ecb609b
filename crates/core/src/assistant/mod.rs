//! Assistant module - intent parsing and the ask orchestrator.

mod assistant_model;
mod assistant_service;
mod assistant_traits;
mod intent;

#[cfg(test)]
mod assistant_service_tests;

pub use assistant_model::AskResponse;
pub use assistant_service::AssistantService;
pub use assistant_traits::AssistantServiceTrait;
pub use intent::{parse_intent, Intent};
