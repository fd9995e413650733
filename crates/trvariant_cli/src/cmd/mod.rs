/// Format conversion command.
pub mod convert;
/// Key path lookup command.
pub mod get;
/// Tree statistics command.
pub mod info;
/// Deep merge command.
pub mod merge;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod util;
