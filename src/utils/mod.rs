pub mod config;
pub mod credentials;
pub mod env_config;
pub mod logger;
pub(crate) mod photodex_toml;

pub use config::*;
pub use credentials::nas_password;
pub use env_config::{apply_env, load_dotenv};
pub use logger::{Colors, setup_logging};
