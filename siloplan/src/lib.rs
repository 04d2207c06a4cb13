pub mod commands;
pub mod handlers;
pub mod session;

// Re-export commonly used handler functions for convenience
pub use handlers::{build_form, expand_path, load_posts_from_file};
pub use session::{Flow, Session, run_session};
