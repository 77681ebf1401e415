mod asset_loader_error;
mod format_error;
mod loading_error;
mod saving_error;
mod validation_error;

pub use asset_loader_error::*;
pub use format_error::*;
pub use loading_error::*;
pub use saving_error::*;
pub use validation_error::*;
