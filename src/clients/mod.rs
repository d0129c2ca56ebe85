pub mod groq;

pub use groq::{GenerationError, GroqClient, ResponseFormat, TextGenerator};
