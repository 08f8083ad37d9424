//! One module per subcommand. Each exposes an `execute` function.

pub mod completions;
pub mod config;
pub mod init;
pub mod new;
pub mod post_gen;
pub mod serve;
