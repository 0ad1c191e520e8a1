use std::path::PathBuf;

/// Interests synthetic users are drawn from.
pub const INTEREST_POOL: [&str; 30] = [
    "python",
    "ml",
    "data science",
    "visualizations",
    "django",
    "flask",
    "backend",
    "html",
    "css",
    "javascript",
    "react",
    "node.js",
    "frontend",
    "sql",
    "nosql",
    "cloud",
    "aws",
    "devops",
    "security",
    "ai",
    "nlp",
    "big data",
    "statistics",
    "java",
    "kotlin",
    "android",
    "ios",
    "swift",
    "tensorflow",
    "pytorch",
];

pub struct Batch {
    pub users: usize,
    pub interests_per_user: usize,
    pub threshold: f64,
    pub top_n: usize,
    pub data: PathBuf,
    pub output: PathBuf,
}
