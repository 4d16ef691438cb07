#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod element;
pub mod event;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod settings;
pub mod state;
pub mod style;
pub mod widgets;

pub use app::ScreenNoteApp;
pub use command::{Command, CommandError, CommandHistory};
pub use element::{DrawableObject, ObjectKind};
pub use event::{EditorEvent, EventBus};
pub use input::{InputEvent, InputHandler};
pub use renderer::Renderer;
pub use settings::{Settings, SettingsProvider};
pub use state::{EditorState, StateSnapshot};
