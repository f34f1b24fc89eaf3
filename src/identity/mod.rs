//! Identity service module: the external collaborator validated
//! credentials are emitted toward

mod console;
mod handler;
mod traits;

pub use console::ConsoleIdentityService;
pub use handler::IdentitySubmitHandler;
pub use traits::{AuthFlow, IdentityService};

#[cfg(test)]
pub use traits::{MockIdentityService, Session};
