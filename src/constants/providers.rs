pub const OPENAI_DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const GEMINI_DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models/";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;
