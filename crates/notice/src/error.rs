use thiserror::Error;

/// Errors surfaced synchronously by the notice manager.
///
/// Everything else (duplicate keys, unknown-key closes, a surface that never
/// becomes ready) is defined behavior rather than an error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// Duration was negative, NaN or infinite.
	#[error("invalid duration {0}: expected a finite number of seconds >= 0")]
	InvalidDuration(f64),

	/// Extra attribute name is outside the allow-listed prefixes.
	#[error("attribute `{0}` is not allowed; expected a `data-` or `aria-` name")]
	DisallowedAttribute(String),

	/// Stack configuration cannot produce a layout.
	#[error("invalid stack configuration: {0}")]
	InvalidStack(&'static str),

	/// Manager configuration failed to parse.
	#[error("invalid manager configuration: {0}")]
	Config(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
