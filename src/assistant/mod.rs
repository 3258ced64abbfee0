//! Rule-based HR question answering

pub mod intent;
pub mod responder;

pub use intent::{INTENT_RULES, Intent, IntentClassifier, IntentRule, classify};
pub use responder::{GUIDANCE, answer, respond};
