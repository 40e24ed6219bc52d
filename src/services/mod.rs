pub mod providers;
pub mod quiz_service;
pub mod template_service;
