use std::sync::Arc;

pub trait Logger: Send + Sync {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// Diagnostic channel for failures that have no user-facing path.
    fn error(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync>;
}

pub fn join_namespace(current: Option<&str>, namespace: &str) -> String {
    match current {
        Some(current) => format!("{}:{}", current, namespace),
        None => namespace.to_string(),
    }
}
