mod common;
mod credentials;
