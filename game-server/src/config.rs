use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4002".to_string())
                .parse()
                .expect("Invalid PORT"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
