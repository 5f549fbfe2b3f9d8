pub mod constants;
pub mod deck;
pub mod easing;
pub mod error;
pub mod layout;
pub mod motion;
pub mod panel;
pub mod presets;
pub mod rotating;
pub mod scheduler;
pub mod scroll;
pub mod section;
pub mod style;
pub mod timeline;
pub mod toggle;
pub mod trigger;

pub use deck::*;
pub use easing::*;
pub use error::*;
pub use layout::*;
pub use motion::*;
pub use panel::*;
pub use rotating::*;
pub use scheduler::*;
pub use scroll::*;
pub use section::*;
pub use style::*;
pub use timeline::*;
pub use toggle::*;
pub use trigger::*;
