pub mod accounts;
pub mod ai_suggestions;
pub mod games;
pub mod prelude;
pub mod translations;
