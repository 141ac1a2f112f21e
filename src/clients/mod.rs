pub mod mailer;
pub mod openai;

pub use mailer::Mailer;
pub use openai::OpenAiClient;
