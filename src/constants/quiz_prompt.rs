/// Title used when a quiz request does not carry one.
pub const DEFAULT_QUIZ_TITLE: &str = "SPI対策クイズ";

/// File the default prompt template is read from at startup.
pub const DEFAULT_PROMPT_TEMPLATE_PATH: &str = "prompt.md";

/// Token cap sent to every provider.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;
