pub mod car;
pub mod macros;
pub mod user;
pub mod view;

pub use car::*;
pub use user::*;
pub use view::*;
