//! Assembly classification used during API analysis.

mod framework_filter;
mod public_key_token;

pub use framework_filter::{DependencyFilter, DotNetFrameworkFilter, FrameworkDefinition};
pub use public_key_token::PublicKeyToken;
