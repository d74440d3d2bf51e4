pub mod app;
pub mod auth;
pub mod notify;
pub mod store;
pub mod validation;

pub use app::AppError;
pub use auth::AuthError;
pub use notify::NotifyError;
pub use store::StoreError;
pub use validation::ValidationError;
