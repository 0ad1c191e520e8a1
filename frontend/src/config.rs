use roster::config::try_load;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/";

pub struct ClientConfig {
    pub endpoint: String,
}

impl ClientConfig {
    pub fn load() -> Self {
        Self {
            endpoint: try_load("INTERESTS_ENDPOINT", DEFAULT_ENDPOINT),
        }
    }
}
