pub mod core;
pub mod execute_effect;
pub mod main;
pub mod render;
pub mod run;
pub mod snapshot;
pub mod upload_form;
#[cfg(test)]
mod tests;
