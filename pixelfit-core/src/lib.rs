mod content;
mod resize;
mod viewport;

pub use content::*;
pub use resize::*;
pub use viewport::*;
