pub mod gemini;
pub mod model;
