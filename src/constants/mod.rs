pub mod providers;
pub mod quiz_prompt;
