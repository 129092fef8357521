pub use super::accounts::Entity as Accounts;
pub use super::ai_suggestions::Entity as AiSuggestions;
pub use super::games::Entity as Games;
pub use super::translations::Entity as Translations;
