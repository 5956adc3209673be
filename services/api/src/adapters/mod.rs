pub mod coach_llm;

pub use coach_llm::OpenAiCoachAdapter;
