pub mod dispatch;

pub use dispatch::{PresentationAction, render};
