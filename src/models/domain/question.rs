/// One quiz item as produced by the LLM. Its shape belongs to the prompt
/// author, so it is carried through untouched.
pub type Question = serde_json::Value;
