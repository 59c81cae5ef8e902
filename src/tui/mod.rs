//! Terminal user interface for the rates dashboard.
//!
//! Message-driven: the poller and input reader feed one mpsc channel, and
//! [`event::update`] folds each message into [`App`] before the next draw.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
