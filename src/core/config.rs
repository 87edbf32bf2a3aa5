mod secret;
mod settings;
mod source;
mod types;

pub(crate) use types::Settings;
