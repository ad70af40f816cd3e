//! Back-office console for the course catalog: user and course management
//! over the hosted REST backend.
pub mod backend;
pub mod console;
pub mod course_form;
pub mod helpers;
pub mod image_picker;
pub mod loading;
pub mod local_storage;
pub mod modal_stack;
pub mod models;
pub mod notifier;
pub mod resource_store;
pub mod run_tool;
pub mod session;

#[cfg(test)]
mod tests;
