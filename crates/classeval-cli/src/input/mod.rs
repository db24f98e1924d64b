pub mod delimited;
pub mod file;
pub mod stdin;
