// Shared prompt fragments for the delegated backends.
// Request-specific prompts are built in generation::prompts.

/// System message sent with every hosted chat-completions request.
pub const RESUME_WRITER_SYSTEM: &str =
    "You are a professional resume writer. Be concise and professional.";
